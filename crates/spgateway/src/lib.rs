//! spgateway - 智付通 (SPGateway) 串接工具
//!
//! 提供两类纯函数式的操作:
//!
//! - CheckValue / CheckCode / TradeSha 签名: 规范查询字符串加上 HashKey、HashIV 后做 SHA256
//! - TradeInfo 加解密: AES-CBC, 32 字节块的 PKCS5 填充, 十六进制编码
//!
//! 不包含任何网络请求, 与智付通之间的传输由调用方负责。
//!
//! # 示例
//! ```
//! use spgateway::{Config, OrderCheckValue, Store};
//!
//! let store = Store::new(Config::new("123456", "1A3S21DAS3D1AS65D1", "1AS56D1AS24D"));
//!
//! let check_value = store.order_check_value(OrderCheckValue {
//!     amt: 200,
//!     merchant_order_no: "20140901001".to_string(),
//!     time_stamp: "1403243286".to_string(),
//!     version: "1.1".to_string(),
//!     ..Default::default()
//! });
//!
//! assert_eq!(check_value, "841F57D750FB4B04B62DDC3ECDC26F1F4028410927DD28BD5B2E34791CC434D2");
//! ```

pub mod checksum;
pub mod cipher;
pub mod error;
pub mod logging;
pub mod models;
pub mod query;
pub mod settings;
pub mod store;

pub use checksum::WrapOrder;
pub use error::{Error, Result};
pub use logging::LogConfig;
pub use models::{CheckFields, Credit, Invoice, OrderCheckCode, OrderCheckValue, TradeInfo};
pub use query::FieldSet;
pub use settings::{Config, Settings, SettingsBuilder};
pub use store::Store;
