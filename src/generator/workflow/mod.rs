use crate::generator::context::GeneratorContext;
use crate::generator::pipeline::ContentPipeline;
use crate::generator::types::{GenerationRequest, RequestError};
use crate::outlet::{DiskOutlet, Downloads, TempWorkspace, artifact_file_stem};
use crate::render::{self, DocumentLayout};
use crate::session::SessionContext;

use anyhow::Result;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// 时间跟踪作用域
pub struct TimingScope {
    start_time: Instant,
    phase_start_times: HashMap<&'static str, Instant>,
    phase_durations: Vec<(&'static str, Duration)>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase_start_times: HashMap::new(),
            phase_durations: vec![],
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &'static str) {
        self.phase_start_times.insert(phase_name, Instant::now());
    }

    /// 结束一个阶段的计时
    pub fn end_phase(&mut self, phase_name: &'static str) -> Option<Duration> {
        let duration = self.phase_start_times.remove(phase_name)?.elapsed();
        self.phase_durations.push((phase_name, duration));
        Some(duration)
    }

    pub fn get_total_duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 获取格式化的执行时间报告
    pub fn generate_timing_report(&self) -> String {
        let mut report = format!(
            "总执行时间: {:.2}秒\n",
            self.get_total_duration().as_secs_f64()
        );
        for (phase, duration) in &self.phase_durations {
            report.push_str(&format!("- {}: {:.3}秒\n", phase, duration.as_secs_f64()));
        }
        report
    }
}

/// 时间跟踪常量
pub struct TimingKeys;

impl TimingKeys {
    pub const GENERATION: &'static str = "generation";
    pub const RENDER: &'static str = "render";
}

/// 执行一次完整交互：生成 → 渲染 → 提供下载 → 清理临时文件
pub async fn run_interaction(
    context: &GeneratorContext,
    layout: &dyn DocumentLayout,
    session: &mut SessionContext,
    request: &GenerationRequest,
) -> Result<Downloads> {
    let mut timing = TimingScope::new();
    session.clear_artifact();

    println!(
        "🚀 Generating {} about \"{}\" for a {} audience...",
        request.content_type(),
        request.topic(),
        request.target_audience()
    );
    timing.start_phase(TimingKeys::GENERATION);
    let artifact = ContentPipeline::new(context).generate(session, request).await?;
    timing.end_phase(TimingKeys::GENERATION);

    println!("\n### Generated Content\n\n{}\n", artifact.content());
    session.store_artifact(artifact.clone());

    timing.start_phase(TimingKeys::RENDER);
    let stem = artifact_file_stem(request.topic(), request.content_type());
    let downloads = {
        let mut workspace = TempWorkspace::create(&context.config.temp_root)?;
        let pdf_path = workspace.register(&format!("{}.pdf", stem));
        let pdf_bytes = render::render(artifact.content(), request.topic(), &pdf_path, layout)?;
        DiskOutlet::new(context.config.output_path.clone()).offer(&stem, &pdf_bytes, artifact.content())?
    };
    timing.end_phase(TimingKeys::RENDER);

    tracing::info!(session = %session.id(), "\n{}", timing.generate_timing_report());
    println!("✅ Content generated successfully! You can now download it in your preferred format.");

    Ok(downloads)
}

/// 顶层错误边界：任何错误都只影响本次交互，会话保持可用
pub async fn handle_interaction(
    context: &GeneratorContext,
    layout: &dyn DocumentLayout,
    session: &mut SessionContext,
    request: &GenerationRequest,
) -> Option<Downloads> {
    match run_interaction(context, layout, session, request).await {
        Ok(downloads) => Some(downloads),
        Err(e) => {
            tracing::error!(session = %session.id(), "interaction failed: {:#}", e);
            eprintln!("❌ An error occurred: {}", e);
            eprintln!("Please try again or contact support if the issue persists.");
            None
        }
    }
}

/// 依次处理每个请求，返回成功完成的交互数
pub async fn launch<I>(
    context: &GeneratorContext,
    layout: &dyn DocumentLayout,
    session: &mut SessionContext,
    requests: I,
) -> usize
where
    I: IntoIterator<Item = Result<GenerationRequest, RequestError>>,
{
    let mut completed = 0;
    for request in requests {
        match request {
            Ok(request) => {
                if handle_interaction(context, layout, session, &request)
                    .await
                    .is_some()
                {
                    completed += 1;
                }
            }
            Err(e) => eprintln!("⚠️ {}", e),
        }
    }
    completed
}

// Include tests
#[cfg(test)]
mod tests;
