//! 内容生成流水线 - 按任务图依次执行调研与写作，显式交接调研简报

use anyhow::{Context, anyhow};
use std::collections::HashMap;
use thiserror::Error;

use crate::credential::{CredentialError, CredentialPolicy};
use crate::generator::compose::agents::content_writer::ContentWriter;
use crate::generator::context::GeneratorContext;
use crate::generator::research::agents::research_analyst::ResearchAnalyst;
use crate::generator::step_forward_agent::StepForwardAgent;
use crate::generator::types::{GeneratedArtifact, GenerationRequest};
use crate::llm::client::types::ModelSpec;
use crate::session::SessionContext;

pub mod graph;

use graph::{Stage, TaskGraph};

/// 生成错误，消息中始终保留原始原因
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API Key Error: {0}")]
    Credential(#[from] CredentialError),
    #[error("Content Generation Error: {0:#}")]
    Runtime(anyhow::Error),
}

/// 内容生成流水线
pub struct ContentPipeline<'a> {
    context: &'a GeneratorContext,
    graph: TaskGraph,
}

impl<'a> ContentPipeline<'a> {
    pub fn new(context: &'a GeneratorContext) -> Self {
        Self {
            context,
            graph: TaskGraph::content_pipeline(),
        }
    }

    fn agent_for(stage: Stage) -> &'static dyn StepForwardAgent {
        match stage {
            Stage::Research => &ResearchAnalyst,
            Stage::Writing => &ContentWriter,
        }
    }

    /// 执行完整流水线，返回写作阶段的输出
    pub async fn generate(
        &self,
        session: &SessionContext,
        request: &GenerationRequest,
    ) -> Result<GeneratedArtifact, GenerationError> {
        let policy = CredentialPolicy::new(self.context.config.credential.clone());
        let credential = policy.validate(session.credential().map(|c| c.expose()))?;

        let llm = &self.context.config.llm;
        let model = ModelSpec {
            provider: llm.provider.clone(),
            model: llm.model.clone(),
            credential,
            temperature: request.temperature(),
            max_tokens: llm.max_tokens,
        };

        let order = self
            .graph
            .execution_order()
            .map_err(GenerationError::Runtime)?;
        let mut outputs: HashMap<Stage, String> = HashMap::new();

        for stage in order {
            let upstream = self.graph.upstream_input(stage, &outputs);
            let output = Self::agent_for(stage)
                .execute(self.context, &model, request, upstream.as_deref())
                .await
                .with_context(|| format!("{} stage failed", stage))
                .map_err(GenerationError::Runtime)?;
            outputs.insert(stage, output);
        }

        let terminal = self
            .graph
            .terminal()
            .ok_or_else(|| GenerationError::Runtime(anyhow!("task graph has no terminal stage")))?;
        let content = outputs.remove(&terminal).ok_or_else(|| {
            GenerationError::Runtime(anyhow!("{} stage produced no output", terminal))
        })?;

        let artifact = GeneratedArtifact::new(content);
        if artifact.exceeds(request.max_words()) {
            tracing::warn!(
                word_count = artifact.word_count(),
                max_words = request.max_words(),
                "generated content exceeds the requested word ceiling"
            );
        }
        Ok(artifact)
    }
}
