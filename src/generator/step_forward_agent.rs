use anyhow::Result;
use async_trait::async_trait;

use crate::generator::context::GeneratorContext;
use crate::generator::pipeline::graph::Stage;
use crate::generator::types::GenerationRequest;
use crate::llm::client::types::{AgentSpec, ModelSpec, TaskSpec};

/// 当前日期行，写入调研任务，便于模型检索最新进展
pub fn current_date_line() -> String {
    format!("Current date: {} (UTC)", chrono::Utc::now().format("%Y-%m-%d"))
}

/// 流水线中的一个角色Agent：声明角色与任务，执行逻辑统一
#[async_trait]
pub trait StepForwardAgent: Send + Sync {
    /// 该Agent负责的流水线阶段
    fn stage(&self) -> Stage;

    /// 角色配置
    fn agent_spec(&self, context: &GeneratorContext, request: &GenerationRequest) -> AgentSpec;

    /// 任务配置，upstream为上游阶段交接过来的内容
    fn task_spec(&self, request: &GenerationRequest, upstream: Option<&str>) -> TaskSpec;

    /// 可选的后处理钩子
    fn post_process(&self, output: String) -> String {
        output.trim().to_string()
    }

    /// 默认实现的execute方法
    async fn execute(
        &self,
        context: &GeneratorContext,
        model: &ModelSpec,
        request: &GenerationRequest,
        upstream: Option<&str>,
    ) -> Result<String> {
        let agent = self.agent_spec(context, request);
        let task = self.task_spec(request, upstream);

        println!("🤖 执行 {} 智能体 ({})...", self.stage(), agent.role);
        let output = context.runtime.run_task(model, &agent, &task).await?;
        let output = self.post_process(output);

        tracing::info!(stage = %self.stage(), chars = output.len(), "stage finished");
        println!("✅ Sub-Agent [{}]执行完成", self.stage());
        Ok(output)
    }
}
