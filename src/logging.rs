// ==========================================
// 电影节排片助手 - 日志系统
// ==========================================
// 基于 tracing / tracing-subscriber
// 级别由 RUST_LOG 控制,FESTIVAL_PLANNER_LOG_FORMAT=json 切换为 JSON 输出
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 未设置 RUST_LOG 时的默认过滤器
pub const DEFAULT_FILTER: &str = "info";

/// 日志输出格式环境变量
pub const LOG_FORMAT_ENV: &str = "FESTIVAL_PLANNER_LOG_FORMAT";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 例如 RUST_LOG=festival_planner=debug
/// - FESTIVAL_PLANNER_LOG_FORMAT: `json` 时输出结构化日志
///
/// # 示例
/// ```no_run
/// use festival_planner::logging;
/// logging::init();
/// ```
pub fn init() {
    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        init_json();
        return;
    }

    // 重复初始化时忽略
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// JSON 格式输出（一行一条事件）
pub fn init_json() {
    let _ = fmt()
        .json()
        .with_env_filter(env_filter())
        .with_current_span(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 初始化测试环境的日志系统
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
