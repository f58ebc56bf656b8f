//! 错误类型

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// AES 密钥长度必须为 16、24 或 32 字节
    #[error("无效的 AES 密钥长度: {0} 字节")]
    InvalidKeyLength(usize),

    #[error("无效的 IV 长度: {0} 字节, 需要 16 字节")]
    InvalidIvLength(usize),

    #[error("密文不是合法的十六进制字符串: {0}")]
    Decoding(#[from] hex::FromHexError),

    /// 密文不足一个分组或不是分组长度的整数倍
    #[error("无效的密文长度: {0} 字节")]
    CiphertextLength(usize),

    #[error("序列化错误: {0}")]
    Serialize(String),

    #[error("反序列化错误: {0}")]
    Deserialize(#[from] serde_urlencoded::de::Error),

    #[error("配置加载错误: {0}")]
    Config(#[from] config::ConfigError),

    #[error("配置验证错误: {0}")]
    Validation(String),

    #[error("日志初始化错误: {0}")]
    Logging(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
