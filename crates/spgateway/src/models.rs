//! 各接口的请求字段
//!
//! 每种签名只使用固定的字段子集, 并且固定使用一种 HashKey/HashIV 包裹顺序。

use serde::{Deserialize, Serialize};

use crate::checksum::WrapOrder;
use crate::query::FieldSet;

/// 参与签名的字段集合
pub trait CheckFields {
    /// 签名时 HashKey 与 HashIV 的包裹顺序
    const WRAP: WrapOrder;

    /// 由 Store 在序列化前写入, 覆盖调用方传入的值
    fn set_merchant_id(&mut self, merchant_id: &str);

    fn to_fields(&self) -> FieldSet;
}

/// 建立订单时的 CheckValue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderCheckValue {
    pub amt: i64,
    pub merchant_order_no: String,
    pub merchant_id: String,
    pub time_stamp: String,
    pub version: String,
}

impl CheckFields for OrderCheckValue {
    const WRAP: WrapOrder = WrapOrder::KeyFirst;

    fn set_merchant_id(&mut self, merchant_id: &str) {
        self.merchant_id = merchant_id.to_string();
    }

    fn to_fields(&self) -> FieldSet {
        FieldSet::new()
            .with("Amt", self.amt)
            .with("MerchantOrderNo", &self.merchant_order_no)
            .with("MerchantID", &self.merchant_id)
            .with("TimeStamp", &self.time_stamp)
            .with("Version", &self.version)
    }
}

/// 交易回传确认用的 CheckCode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderCheckCode {
    pub amt: i64,
    pub merchant_order_no: String,
    pub merchant_id: String,
    pub trade_no: String,
}

impl CheckFields for OrderCheckCode {
    const WRAP: WrapOrder = WrapOrder::IvFirst;

    fn set_merchant_id(&mut self, merchant_id: &str) {
        self.merchant_id = merchant_id.to_string();
    }

    fn to_fields(&self) -> FieldSet {
        FieldSet::new()
            .with("Amt", self.amt)
            .with("MerchantOrderNo", &self.merchant_order_no)
            .with("MerchantID", &self.merchant_id)
            .with("TradeNo", &self.trade_no)
    }
}

/// 信用卡相关设定的 CheckCode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credit {
    pub date: String,
    pub use_info: String,
    pub credit_inst: String,
    pub credit_red: String,
    pub merchant_id: String,
}

impl CheckFields for Credit {
    const WRAP: WrapOrder = WrapOrder::IvFirst;

    fn set_merchant_id(&mut self, merchant_id: &str) {
        self.merchant_id = merchant_id.to_string();
    }

    fn to_fields(&self) -> FieldSet {
        FieldSet::new()
            .with("Date", &self.date)
            .with("UseInfo", &self.use_info)
            .with("CreditInst", &self.credit_inst)
            .with("CreditRed", &self.credit_red)
            .with("MerchantID", &self.merchant_id)
    }
}

/// 电子发票的 CheckCode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invoice {
    pub invoice_trans_no: String,
    pub merchant_order_no: String,
    pub random_num: String,
    pub total_amt: i64,
    pub merchant_id: String,
}

impl CheckFields for Invoice {
    const WRAP: WrapOrder = WrapOrder::IvFirst;

    fn set_merchant_id(&mut self, merchant_id: &str) {
        self.merchant_id = merchant_id.to_string();
    }

    fn to_fields(&self) -> FieldSet {
        FieldSet::new()
            .with("InvoiceTransNo", &self.invoice_trans_no)
            .with("MerchantOrderNo", &self.merchant_order_no)
            .with("RandomNum", &self.random_num)
            .with("TotalAmt", self.total_amt)
            .with("MerchantID", &self.merchant_id)
    }
}

/// MPG 交易的 TradeInfo 明文
///
/// 可选字段为 `None` 时不参与序列化。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TradeInfo {
    #[serde(rename = "MerchantID")]
    pub merchant_id: String,
    pub respond_type: String,
    pub time_stamp: String,
    pub version: String,
    pub merchant_order_no: String,
    pub amt: i64,
    pub item_desc: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_type: Option<u8>,
    #[serde(rename = "ReturnURL", skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(rename = "NotifyURL", skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    #[serde(rename = "ClientBackURL", skip_serializing_if = "Option::is_none")]
    pub client_back_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_date: Option<String>,
}
