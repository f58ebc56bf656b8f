//! 商店凭证与配置加载
//!
//! # 示例
//! ```no_run
//! use spgateway::Settings;
//!
//! let settings = Settings::builder()
//!     .add_dotenv()
//!     .add_file("config/spgateway.toml")
//!     .add_environment()
//!     .build()
//!     .unwrap();
//!
//! let store = settings.store();
//! println!("商店代号: {}", store.merchant_id());
//! ```

use std::fmt;
use std::path::Path;

use config::{Environment, File};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::logging::LogConfig;
use crate::store::Store;

/// 商店凭证: 商店代号, HashKey, HashIV
///
/// HashKey/HashIV 同时用作签名密钥和 TradeInfo 的 AES 密钥/IV。
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub merchant_id: String,
    pub hash_key: String,
    pub hash_iv: String,
}

impl Config {
    pub fn new(
        merchant_id: impl Into<String>,
        hash_key: impl Into<String>,
        hash_iv: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            hash_key: hash_key.into(),
            hash_iv: hash_iv.into(),
        }
    }

    /// HashKey 和 HashIV 不能为空
    pub fn validate(&self) -> Result<()> {
        if self.hash_key.is_empty() {
            return Err(Error::Validation("hash_key 不能为空".to_string()));
        }
        if self.hash_iv.is_empty() {
            return Err(Error::Validation("hash_iv 不能为空".to_string()));
        }
        Ok(())
    }
}

// 不输出密钥
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("merchant_id", &self.merchant_id)
            .field("hash_key", &"***")
            .field("hash_iv", &"***")
            .finish()
    }
}

/// 完整配置
///
/// ```toml
/// [spgateway]
/// merchant_id = "3430112"
/// hash_key = "12345678901234567890123456789012"
/// hash_iv = "1234567890123456"
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub spgateway: Config,

    #[serde(default)]
    pub logging: LogConfig,
}

impl Settings {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::new()
    }

    pub fn store(&self) -> Store {
        Store::new(self.spgateway.clone())
    }
}

/// 配置构建器
pub struct SettingsBuilder {
    config_builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            config_builder: config::Config::builder(),
        }
    }

    /// 添加配置文件, 格式由扩展名决定 (toml/json/yaml...), 文件不存在时忽略
    pub fn add_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_builder = self
            .config_builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// 添加环境变量支持, 使用 APP_ 前缀, 双下划线分隔层级
    ///
    /// 例如 `APP__SPGATEWAY__HASH_KEY`
    pub fn add_environment(mut self) -> Self {
        self.config_builder = self
            .config_builder
            .add_source(Environment::with_prefix("APP").separator("__"));
        self
    }

    /// 从 .env 文件加载环境变量, 忽略错误
    pub fn add_dotenv(self) -> Self {
        let _ = dotenvy::dotenv();
        self
    }

    /// 直接设置某个键的值, 优先级高于所有来源
    pub fn set(mut self, key: &str, value: impl Into<String>) -> Result<Self> {
        self.config_builder = self.config_builder.set_override(key, value.into())?;
        Ok(self)
    }

    /// 设置默认值, 优先级低于所有来源
    pub fn set_default(mut self, key: &str, value: impl Into<String>) -> Result<Self> {
        self.config_builder = self.config_builder.set_default(key, value.into())?;
        Ok(self)
    }

    pub fn build(self) -> Result<Settings> {
        let config = self.config_builder.build()?;
        let settings: Settings = config.try_deserialize()?;

        settings.spgateway.validate()?;

        tracing::debug!(merchant_id = %settings.spgateway.merchant_id, "spgateway settings loaded");

        Ok(settings)
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
