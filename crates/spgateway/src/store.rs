//! Store: 持有商店凭证, 对外提供签名和 TradeInfo 加解密
//!
//! 所有方法只读取不可变的凭证, 可以在多个线程中并发调用。

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::checksum::{compute_checksum, compute_raw_checksum, WrapOrder};
use crate::cipher::{decrypt_payload, encrypt_payload};
use crate::error::Result;
use crate::models::{CheckFields, Credit, Invoice, OrderCheckCode, OrderCheckValue};
use crate::query::FieldSet;
use crate::settings::Config;

const MERCHANT_ID_FIELD: &str = "MerchantID";

#[derive(Debug, Clone)]
pub struct Store {
    config: Config,
}

impl Store {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 只有 HashKey/HashIV 的 Store, 商店代号为空
    pub fn with_keys(hash_key: impl Into<String>, hash_iv: impl Into<String>) -> Self {
        Self::new(Config::new("", hash_key, hash_iv))
    }

    pub fn merchant_id(&self) -> &str {
        &self.config.merchant_id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 通用签名: 写入商店代号后按字段集合自身的包裹顺序签名
    pub fn check_code<T: CheckFields>(&self, mut fields: T) -> String {
        fields.set_merchant_id(&self.config.merchant_id);
        let fields = fields.to_fields();

        debug!(wrap = ?T::WRAP, field_count = fields.len(), "computing check code");

        compute_checksum(&fields, &self.config.hash_key, &self.config.hash_iv, T::WRAP)
    }

    /// 建立订单的 CheckValue (HashKey 在前)
    pub fn order_check_value(&self, order: OrderCheckValue) -> String {
        self.check_code(order)
    }

    /// 交易回传的 CheckCode (HashIV 在前)
    pub fn order_check_code(&self, order: OrderCheckCode) -> String {
        self.check_code(order)
    }

    pub fn credit_check_code(&self, credit: Credit) -> String {
        self.check_code(credit)
    }

    pub fn invoice_check_code(&self, invoice: Invoice) -> String {
        self.check_code(invoice)
    }

    /// 对加密后的 TradeInfo 计算 TradeSha
    pub fn trade_sha(&self, trade_info: &str) -> String {
        compute_raw_checksum(
            trade_info,
            &self.config.hash_key,
            &self.config.hash_iv,
            WrapOrder::KeyFirst,
        )
    }

    /// 加密 TradeInfo
    ///
    /// # 参数
    /// - `trade_info`: [`FieldSet`]、[`TradeInfo`](crate::TradeInfo) 或任何序列化为扁平键值对象的类型
    ///
    /// # 返回
    /// 小写十六进制密文, 可直接作为 TradeInfo 参数提交
    ///
    /// 与签名不同, 只有 Store 带有非空商店代号时才覆盖其中的 `MerchantID`,
    /// 商店代号为空 (见 [`Store::with_keys`]) 时保留调用方传入的值。
    pub fn encrypt_trade_info<T: Serialize + ?Sized>(&self, trade_info: &T) -> Result<String> {
        let mut fields = FieldSet::from_serialize(trade_info)?;
        if !self.config.merchant_id.is_empty() {
            fields.insert(MERCHANT_ID_FIELD, &self.config.merchant_id);
        }

        encrypt_payload(
            &fields,
            self.config.hash_key.as_bytes(),
            self.config.hash_iv.as_bytes(),
        )
    }

    /// 解密 TradeInfo
    ///
    /// # 参数
    /// - `data`: 十六进制编码的 TradeInfo 密文
    ///
    /// # 返回
    /// 规范查询字符串; 不校验填充, 调用前应先用 [`Store::verify_trade_sha`] 校验密文
    pub fn decrypt_trade_info(&self, data: &str) -> Result<String> {
        decrypt_payload(
            data,
            self.config.hash_key.as_bytes(),
            self.config.hash_iv.as_bytes(),
        )
        .inspect_err(|e| warn!(error = %e, "failed to decrypt trade info"))
    }

    pub fn decrypt_trade_info_fields(&self, data: &str) -> Result<FieldSet> {
        FieldSet::parse(&self.decrypt_trade_info(data)?)
    }

    /// 解密并反序列化为指定类型
    pub fn decrypt_trade_info_as<T: DeserializeOwned>(&self, data: &str) -> Result<T> {
        let query = self.decrypt_trade_info(data)?;
        Ok(serde_urlencoded::from_str(&query)?)
    }

    /// 校验回传的 CheckCode, 忽略十六进制大小写
    pub fn verify_check_code<T: CheckFields>(&self, fields: T, expected: &str) -> bool {
        self.check_code(fields).eq_ignore_ascii_case(expected)
    }

    /// 校验回传的 TradeSha, 应在解密 TradeInfo 之前调用
    pub fn verify_trade_sha(&self, trade_info: &str, expected: &str) -> bool {
        self.trade_sha(trade_info).eq_ignore_ascii_case(expected)
    }
}
