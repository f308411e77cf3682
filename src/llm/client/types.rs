//! 交给编排运行时的模型、角色与任务描述

use crate::config::LLMProvider;
use crate::credential::Credential;

/// 模型句柄配置
#[derive(Debug, Clone)]
pub struct ModelSpec {
    pub provider: LLMProvider,
    pub model: String,
    pub credential: Credential,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Agent可绑定的能力
#[derive(Debug, Clone, PartialEq)]
pub enum AgentCapability {
    /// 网络搜索，参数为每次搜索的结果数
    WebSearch { result_count: usize },
}

/// 角色描述
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSpec {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub capabilities: Vec<AgentCapability>,
}

impl AgentSpec {
    pub fn has_tools(&self) -> bool {
        !self.capabilities.is_empty()
    }

    /// 角色的系统提示词
    pub fn preamble(&self) -> String {
        format!(
            "You are {}. {}\nYour personal goal is: {}",
            self.role, self.backstory, self.goal
        )
    }
}

/// 任务描述
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSpec {
    pub description: String,
    pub expected_output: String,
    /// 上游任务交接过来的内容
    pub context: Option<String>,
}

impl TaskSpec {
    /// 任务的用户提示词
    pub fn user_prompt(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str("Current Task: ");
        prompt.push_str(self.description.trim());
        prompt.push_str("\n\n");

        if let Some(context) = &self.context {
            prompt.push_str("This is the context you're working with:\n");
            prompt.push_str(context.trim());
            prompt.push_str("\n\n");
        }

        prompt.push_str("This is the expected criteria for your final answer: ");
        prompt.push_str(self.expected_output.trim());
        prompt.push_str(
            "\nYou MUST return the actual complete content as the final answer, not a summary.",
        );
        prompt
    }
}
