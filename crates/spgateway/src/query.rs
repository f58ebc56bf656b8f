//! 请求字段集合与规范查询字符串
//!
//! 智付通的签名和 TradeInfo 加密都基于同一种序列化形式:
//! 所有字段渲染为 `key=value`, 按字段名字典序升序排列后用 `&` 连接,
//! 键和值按表单查询的规则做百分号编码 (空格编码为 `+`)。

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// 一次 API 调用的字段集合
///
/// 内部使用 `BTreeMap`, 迭代顺序即为规范查询字符串的排序。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet(BTreeMap<String, String>);

impl FieldSet {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// 插入字段, 返回被覆盖的旧值
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> Option<String> {
        self.0.insert(key.into(), value.to_string())
    }

    /// 链式插入, 方便构造固定字段集合
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 从任意可序列化的值构造字段集合
    ///
    /// 值必须序列化为扁平的对象: 字符串原样保留, 数字和布尔值转为十进制/`true`/`false`,
    /// `null` 渲染为空字符串。嵌套的数组或对象会返回 [`Error::Serialize`]。
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let map = match serde_json::to_value(value)? {
            Value::Object(map) => map,
            other => {
                return Err(Error::Serialize(format!(
                    "TradeInfo 必须序列化为键值对象, 实际为: {}",
                    value_kind(&other)
                )));
            }
        };

        let mut fields = FieldSet::new();
        for (key, value) in map {
            let rendered = match value {
                Value::Null => String::new(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::String(s) => s,
                nested => {
                    return Err(Error::Serialize(format!(
                        "字段 {} 不是标量值: {}",
                        key,
                        value_kind(&nested)
                    )));
                }
            };
            fields.0.insert(key, rendered);
        }

        Ok(fields)
    }

    /// 解析规范查询字符串 (解密后的 TradeInfo), 重复的键以最后一次出现为准
    pub fn parse(query: &str) -> Result<Self> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
        Ok(pairs.into_iter().collect())
    }

    /// 渲染为规范查询字符串
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = FieldSet::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// 表单查询编码: `A-Z a-z 0-9 - _ . ~` 原样保留, 空格为 `+`, 其余字节为 `%XX`
pub fn encode_component(s: &str) -> String {
    // 字面量 '%' 已被编码为 %25, 因此 %20 只可能来自空格
    urlencoding::encode(s).replace("%20", "+")
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
