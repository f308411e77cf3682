use std::sync::Arc;

use crate::config::Config;
use crate::llm::client::{AgentRuntime, LLMClient};

#[derive(Clone)]
pub struct GeneratorContext {
    /// 编排运行时，用于与模型通信
    pub runtime: Arc<dyn AgentRuntime>,
    /// 配置
    pub config: Config,
}

impl GeneratorContext {
    /// 创建使用rig客户端的生成器上下文
    pub fn new(config: Config) -> Self {
        let runtime = Arc::new(LLMClient::new(config.llm.clone(), config.search.clone()));
        Self { runtime, config }
    }

    /// 使用指定的编排运行时
    pub fn with_runtime(config: Config, runtime: Arc<dyn AgentRuntime>) -> Self {
        Self { runtime, config }
    }
}
