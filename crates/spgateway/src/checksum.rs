//! CheckValue / CheckCode 签名
//!
//! 组合规则: 规范查询字符串前后分别加上 HashKey 与 HashIV (顺序视接口而定),
//! 再做 SHA256 并转为大写十六进制。

use sha2::{Digest, Sha256};

use crate::query::FieldSet;

/// HashKey 与 HashIV 的包裹顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapOrder {
    /// `HashKey=..&{query}&HashIV=..`, 用于建立订单的 CheckValue 和 TradeSha
    KeyFirst,
    /// `HashIV=..&{query}&HashKey=..`, 用于各类回传的 CheckCode
    IvFirst,
}

impl WrapOrder {
    pub fn wrap(self, payload: &str, hash_key: &str, hash_iv: &str) -> String {
        match self {
            WrapOrder::KeyFirst => format!("HashKey={}&{}&HashIV={}", hash_key, payload, hash_iv),
            WrapOrder::IvFirst => format!("HashIV={}&{}&HashKey={}", hash_iv, payload, hash_key),
        }
    }
}

// SHA-256, 大写十六进制
pub fn hash_sha256(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    hex::encode(digest).to_uppercase()
}

/// 计算字段集合的签名
///
/// 调用方负责在此之前写入 MerchantID。对任意字段集合都不会失败,
/// 空字符串和零金额都是合法输入。
pub fn compute_checksum(
    fields: &FieldSet,
    hash_key: &str,
    hash_iv: &str,
    wrap: WrapOrder,
) -> String {
    compute_raw_checksum(&fields.to_query_string(), hash_key, hash_iv, wrap)
}

/// 对已经序列化好的字符串签名 (例如加密后的 TradeInfo)
pub fn compute_raw_checksum(
    raw: &str,
    hash_key: &str,
    hash_iv: &str,
    wrap: WrapOrder,
) -> String {
    hash_sha256(&wrap.wrap(raw, hash_key, hash_iv))
}
