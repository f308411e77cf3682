//! LLM Provider支持模块

use anyhow::Result;
use rig::{
    agent::{Agent, AgentBuilder},
    client::CompletionClient,
    completion::{CompletionModel, Prompt, PromptError},
    providers::gemini::completion::gemini_api_types::{AdditionalParameters, GenerationConfig},
};

use crate::config::LLMProvider;
use crate::llm::client::types::ModelSpec;
use crate::llm::tools::web_search::AgentToolWebSearch;

/// 统一的Provider客户端枚举
#[derive(Clone)]
pub enum ProviderClient {
    Gemini(rig::providers::gemini::Client),
    OpenAI(rig::providers::openai::Client),
    Anthropic(rig::providers::anthropic::Client),
}

impl ProviderClient {
    /// 根据模型句柄创建相应的provider客户端
    pub fn new(spec: &ModelSpec) -> Result<Self> {
        let api_key = spec.credential.expose();
        match spec.provider {
            LLMProvider::Gemini => {
                let client = rig::providers::gemini::Client::builder(api_key).build()?;
                Ok(ProviderClient::Gemini(client))
            }
            LLMProvider::OpenAI => {
                let client = rig::providers::openai::Client::builder(api_key).build();
                Ok(ProviderClient::OpenAI(client))
            }
            LLMProvider::Anthropic => {
                let client = rig::providers::anthropic::ClientBuilder::new(api_key).build()?;
                Ok(ProviderClient::Anthropic(client))
            }
        }
    }

    /// 创建Agent，search不为空时绑定网络搜索工具
    pub fn create_agent(
        &self,
        spec: &ModelSpec,
        preamble: &str,
        search: Option<&AgentToolWebSearch>,
    ) -> Result<ProviderAgent> {
        let agent = match self {
            ProviderClient::Gemini(client) => {
                let gen_cfg = GenerationConfig::default();
                let cfg = AdditionalParameters::default().with_config(gen_cfg);

                let builder = client
                    .agent(&spec.model)
                    .preamble(preamble)
                    .max_tokens(spec.max_tokens.into())
                    .temperature(spec.temperature)
                    .additional_params(serde_json::to_value(cfg)?);
                ProviderAgent::Gemini(build_agent(builder, search))
            }
            ProviderClient::OpenAI(client) => {
                let builder = client
                    .completion_model(&spec.model)
                    .completions_api()
                    .into_agent_builder()
                    .preamble(preamble)
                    .max_tokens(spec.max_tokens.into())
                    .temperature(spec.temperature);
                ProviderAgent::OpenAI(build_agent(builder, search))
            }
            ProviderClient::Anthropic(client) => {
                let builder = client
                    .agent(&spec.model)
                    .preamble(preamble)
                    .max_tokens(spec.max_tokens.into())
                    .temperature(spec.temperature);
                ProviderAgent::Anthropic(build_agent(builder, search))
            }
        };
        Ok(agent)
    }
}

/// 绑定工具后的builder类型不同，因此在各分支内分别build
fn build_agent<M: CompletionModel>(
    builder: AgentBuilder<M>,
    search: Option<&AgentToolWebSearch>,
) -> Agent<M> {
    match search {
        Some(search) => builder.tool(search.clone()).build(),
        None => builder.build(),
    }
}

/// 统一的Agent枚举
pub enum ProviderAgent {
    Gemini(Agent<rig::providers::gemini::completion::CompletionModel>),
    OpenAI(Agent<rig::providers::openai::CompletionModel>),
    Anthropic(Agent<rig::providers::anthropic::completion::CompletionModel>),
}

impl ProviderAgent {
    /// 执行单轮prompt
    pub async fn prompt(&self, prompt: &str) -> Result<String> {
        match self {
            ProviderAgent::Gemini(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::OpenAI(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::Anthropic(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
        }
    }

    /// 执行多轮对话，允许Agent调用工具
    pub async fn multi_turn(
        &self,
        prompt: &str,
        max_iterations: usize,
    ) -> Result<String, PromptError> {
        match self {
            ProviderAgent::Gemini(agent) => agent.prompt(prompt).multi_turn(max_iterations).await,
            ProviderAgent::OpenAI(agent) => agent.prompt(prompt).multi_turn(max_iterations).await,
            ProviderAgent::Anthropic(agent) => {
                agent.prompt(prompt).multi_turn(max_iterations).await
            }
        }
    }
}
