//! LLM客户端 - 为生成流水线提供统一的编排运行时接口

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use rig::completion::PromptError;

use crate::config::{LLMConfig, SearchConfig};
use crate::llm::tools::web_search::AgentToolWebSearch;

mod providers;
pub mod types;

use providers::ProviderClient;
use types::{AgentCapability, AgentSpec, ModelSpec, TaskSpec};

/// 编排运行时：以给定模型执行一个角色的一个任务，返回自由文本结果
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    async fn run_task(&self, model: &ModelSpec, agent: &AgentSpec, task: &TaskSpec)
    -> Result<String>;
}

/// 基于rig的LLM客户端
#[derive(Clone)]
pub struct LLMClient {
    llm: LLMConfig,
    search: SearchConfig,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(llm: LLMConfig, search: SearchConfig) -> Self {
        Self { llm, search }
    }

    /// 按角色声明的能力初始化工具
    fn init_search_tool(&self, agent: &AgentSpec) -> Result<Option<AgentToolWebSearch>> {
        let Some(AgentCapability::WebSearch { result_count }) = agent.capabilities.first() else {
            return Ok(None);
        };

        let mut search_config = self.search.clone();
        search_config.result_count = *result_count;
        let tool = AgentToolWebSearch::from_config(&search_config)
            .map_err(|e| anyhow!("Failed to initialize search tool: {}", e))?;
        Ok(Some(tool))
    }
}

#[async_trait]
impl AgentRuntime for LLMClient {
    async fn run_task(
        &self,
        model: &ModelSpec,
        agent: &AgentSpec,
        task: &TaskSpec,
    ) -> Result<String> {
        let search = self.init_search_tool(agent)?;
        let client = ProviderClient::new(model)
            .with_context(|| format!("Failed to create {} client", model.provider))?;
        let provider_agent = client.create_agent(model, &agent.preamble(), search.as_ref())?;
        let user_prompt = task.user_prompt();

        tracing::debug!(
            role = %agent.role,
            model = %model.model,
            tools = agent.has_tools(),
            prompt_len = user_prompt.len(),
            "running agent task"
        );

        if !agent.has_tools() {
            return provider_agent.prompt(&user_prompt).await;
        }

        match provider_agent
            .multi_turn(&user_prompt, self.llm.max_iterations)
            .await
        {
            Ok(response) => Ok(response),
            Err(PromptError::MaxDepthError { max_depth, .. }) => Err(anyhow!(
                "{} did not finish within {} tool-calling turns",
                agent.role,
                max_depth
            )),
            Err(e) => Err(e.into()),
        }
    }
}
