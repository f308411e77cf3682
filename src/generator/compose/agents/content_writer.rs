use crate::generator::context::GeneratorContext;
use crate::generator::pipeline::graph::Stage;
use crate::generator::step_forward_agent::StepForwardAgent;
use crate::generator::types::GenerationRequest;
use crate::llm::client::types::{AgentSpec, TaskSpec};

#[derive(Default)]
pub struct ContentWriter;

impl StepForwardAgent for ContentWriter {
    fn stage(&self) -> Stage {
        Stage::Writing
    }

    fn agent_spec(&self, _context: &GeneratorContext, request: &GenerationRequest) -> AgentSpec {
        AgentSpec {
            role: "Content Writer".to_string(),
            goal: format!(
                "Create engaging {} content while maintaining accuracy and professional tone.",
                request.content_type()
            ),
            backstory: "Professional content writer with expertise in creating engaging, \
                        well-structured content for various audiences and formats."
                .to_string(),
            capabilities: vec![],
        }
    }

    fn task_spec(&self, request: &GenerationRequest, upstream: Option<&str>) -> TaskSpec {
        TaskSpec {
            description: format!(
                r#"Create {} content about {} that:
1. Matches {} audience expectations
2. Maintains professional tone and clarity
3. Incorporates research findings effectively
4. Stays within {} words
5. Includes proper citations and references"#,
                request.content_type(),
                request.topic(),
                request.target_audience(),
                request.max_words(),
            ),
            expected_output: format!(
                r#"Professional {} in Markdown with:
- Clear structure and formatting
- Engaging yet informative tone
- Proper source citations
- References section"#,
                request.content_type()
            ),
            context: upstream.map(|brief| format!("Research brief:\n{}", brief)),
        }
    }
}
