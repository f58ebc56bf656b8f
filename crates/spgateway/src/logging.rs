//! 基于 tracing 的日志初始化
//!
//! 库本身只产生 tracing 事件, 是否安装订阅器由调用方决定。

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别, 设置了 RUST_LOG 时以环境变量为准
    #[serde(default = "default_level")]
    pub level: String,

    /// `pretty` 或 `json`
    #[serde(default = "default_format")]
    pub format: String,

    /// 是否输出文件名和行号
    #[serde(default)]
    pub show_source_location: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            show_source_location: false,
        }
    }
}

impl LogConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// 安装全局订阅器, 重复调用返回 [`Error::Logging`]
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| Error::Logging(format!("无效的日志级别 {}: {}", config.level, e)))?;

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.is_json() {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_file(config.show_source_location)
                    .with_line_number(config.show_source_location),
            )
            .try_init()
    };

    result.map_err(|e| Error::Logging(e.to_string()))?;

    tracing::info!(level = %config.level, format = %config.format, "logging initialized");

    Ok(())
}
