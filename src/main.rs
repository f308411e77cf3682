use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};

use content_studio::cli::Args;
use content_studio::config::Config;
use content_studio::credential::{CredentialGate, ProcessEnv, StdinPrompt};
use content_studio::generator::context::GeneratorContext;
use content_studio::generator::workflow::launch;
use content_studio::logging::init_logging;
use content_studio::render::PdfLayout;
use content_studio::session::SessionContext;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = args.to_config()?;
    init_logging(config.verbose);

    let mut session = SessionContext::new();
    tracing::debug!(session = %session.id(), "session started");

    // 凭证闸门在异步运行时创建之前执行，此时进程只有主线程
    let mut gate = CredentialGate::new(config.credential.clone(), ProcessEnv, StdinPrompt::new());
    gate.obtain_credential(&mut session)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build async runtime")?;

    runtime.block_on(run(&args, &config, &mut session))
}

async fn run(args: &Args, config: &Config, session: &mut SessionContext) -> Result<()> {
    let context = GeneratorContext::new(config.clone());
    let layout = PdfLayout::load(&config.render).context("Failed to prepare PDF layout")?;

    let requests = topics(args, config.interactive).map(|topic| args.generation_request(&topic));
    let completed = launch(&context, &layout, session, requests).await;

    tracing::info!(completed, "session finished");
    Ok(())
}

/// 命令行主题优先，交互模式下继续从标准输入逐行读取，输入流关闭时结束
fn topics(args: &Args, interactive: bool) -> Box<dyn Iterator<Item = String>> {
    let first = args.topic.clone().into_iter();
    if !interactive {
        return Box::new(first);
    }

    let from_stdin = std::iter::from_fn(|| {
        print!("\n📝 Enter your topic: ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    });
    Box::new(first.chain(from_stdin))
}
