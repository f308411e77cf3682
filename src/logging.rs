//! 日志初始化

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// 未设置 RUST_LOG 时使用的过滤规则
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "content_studio=debug"
    } else {
        "content_studio=info"
    }
}

/// 初始化全局日志，重复初始化时保留已有的订阅者
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let fmt_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
