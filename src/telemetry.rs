//! 日志初始化

use tracing_subscriber::EnvFilter;

use crate::env::{core::LogLevel, EnvVar};

/// 安装全局 fmt 订阅者
///
/// `RUST_LOG` 优先于 `level`。已存在全局订阅者时不做任何事并返回 `false`。
pub fn init_tracing(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// 按 `TRANSLATION_STORE_LOG_LEVEL` 安装订阅者
pub fn init_tracing_from_env() -> bool {
    let level = LogLevel::get().unwrap_or_else(|_| "info".to_string());
    init_tracing(&level)
}
