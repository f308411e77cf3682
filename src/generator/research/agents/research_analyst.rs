use crate::generator::context::GeneratorContext;
use crate::generator::pipeline::graph::Stage;
use crate::generator::step_forward_agent::{StepForwardAgent, current_date_line};
use crate::generator::types::GenerationRequest;
use crate::llm::client::types::{AgentCapability, AgentSpec, TaskSpec};

/// 调研分析师 - 负责检索主题的最新进展、专家观点、数据与可信来源
#[derive(Default)]
pub struct ResearchAnalyst;

impl StepForwardAgent for ResearchAnalyst {
    fn stage(&self) -> Stage {
        Stage::Research
    }

    fn agent_spec(&self, context: &GeneratorContext, request: &GenerationRequest) -> AgentSpec {
        AgentSpec {
            role: "Senior Research Analyst".to_string(),
            goal: format!(
                "Research and analyze {} for a {} aimed at a {} audience.",
                request.topic(),
                request.content_type(),
                request.target_audience()
            ),
            backstory: "Expert research analyst with advanced skills in data synthesis and analysis. \
                        Specialized in creating comprehensive research briefs with verified sources."
                .to_string(),
            capabilities: vec![AgentCapability::WebSearch {
                result_count: context.config.search.result_count,
            }],
        }
    }

    fn task_spec(&self, request: &GenerationRequest, _upstream: Option<&str>) -> TaskSpec {
        TaskSpec {
            description: format!(
                r#"Conduct comprehensive research on {} considering:
- Target audience: {}
- Content type: {}
- Maximum length: {} words
{}

Include:
1. Latest developments and trends
2. Expert insights and analysis
3. Relevant statistics and data
4. Credible source citations"#,
                request.topic(),
                request.target_audience(),
                request.content_type(),
                request.max_words(),
                current_date_line(),
            ),
            expected_output: r#"Detailed research report with:
- Executive summary
- Key findings and insights
- Verified facts and statistics
- Source citations and references"#
                .to_string(),
            context: None,
        }
    }
}
