use tracing_subscriber::{EnvFilter, fmt};

/// 初始化日志系统
///
/// 支持通过 RUST_LOG 环境变量控制日志级别
/// 默认级别: info
///
/// 可在每个测试中调用，重复初始化会被忽略
///
/// 示例:
/// - RUST_LOG=debug cargo test
/// - RUST_LOG=rue2e=trace cargo test
pub fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_test_writer()
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Logger initialized");
    }
}
