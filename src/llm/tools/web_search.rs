//! 网络搜索工具，仅供调研角色使用

use rig::tool::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SearchConfig;

/// 网络搜索工具
#[derive(Debug, Clone)]
pub struct AgentToolWebSearch {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    result_count: usize,
}

/// 搜索参数
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WebSearchArgs {
    /// 搜索关键词
    pub query: String,
}

/// 单条搜索结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SearchHit>,
}

/// 搜索工具错误
#[derive(Debug, Error)]
pub enum WebSearchError {
    #[error("{0} is not set")]
    MissingApiKey(String),
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl AgentToolWebSearch {
    /// 按配置初始化，缺少API KEY时失败
    pub fn from_config(config: &SearchConfig) -> Result<Self, WebSearchError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| WebSearchError::MissingApiKey(config.api_key_env.clone()))?;

        Ok(Self::new(&config.endpoint, api_key, config.result_count))
    }

    pub fn new(endpoint: &str, api_key: String, result_count: usize) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            api_key,
            result_count,
        }
    }

    pub fn result_count(&self) -> usize {
        self.result_count
    }

    async fn search(&self, args: &WebSearchArgs) -> Result<Vec<SearchHit>, WebSearchError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&serde_json::json!({
                "q": args.query,
                "num": self.result_count,
            }))
            .send()
            .await?
            .error_for_status()?;

        let body: SerperResponse = response.json().await?;
        Ok(body.organic.into_iter().take(self.result_count).collect())
    }
}

impl Tool for AgentToolWebSearch {
    const NAME: &'static str = "web_search";

    type Error = WebSearchError;
    type Args = WebSearchArgs;
    type Output = Vec<SearchHit>;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Search the internet with a text query. Returns result titles, links and snippets.".to_string(),
            parameters: serde_json::to_value(schemars::schema_for!(WebSearchArgs))
                .unwrap_or_default(),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        println!("   🔧 tool called...web_search@{:?}", args.query);
        let hits = self.search(&args).await?;
        tracing::debug!(query = %args.query, hits = hits.len(), "web search finished");
        Ok(hits)
    }
}
