use std::fmt;

use thiserror::Error;

/// 修改链的种类，用于在错误中标明是哪条链失败
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainKind {
    Request,
    ResponseBody,
    Response,
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChainKind::Request => "request",
            ChainKind::ResponseBody => "response body",
            ChainKind::Response => "response",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("无效的 HTTP 方法: {0}")]
    InvalidMethod(String),

    #[error("无效的 URL: {0}")]
    InvalidUrl(String),

    #[error("无效的 Header: {0}")]
    InvalidHeader(String),

    #[error("环境变量缺失: key {0} not found in env")]
    MissingEnvKey(String),

    #[error("环境变量类型错误: value of {key} is not a string: {value}")]
    EnvValueNotString { key: String, value: String },

    #[error("选项 {option} 失败: {reason}")]
    OptionFailed { option: &'static str, reason: String },

    #[error("状态错误: {0}")]
    Precondition(String),

    #[error("modifying {chain} failed: {source}")]
    Modifier {
        chain: ChainKind,
        #[source]
        source: Box<E2eError>,
    },

    #[error("HTTP 请求失败: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl E2eError {
    /// 包装为修改链错误
    pub fn in_chain(self, chain: ChainKind) -> Self {
        E2eError::Modifier {
            chain,
            source: Box::new(self),
        }
    }
}

// Add conversion from anyhow::Error
impl From<anyhow::Error> for E2eError {
    fn from(err: anyhow::Error) -> Self {
        E2eError::Other(err.to_string())
    }
}

/// Result type for rue2e crate
pub type Result<T> = std::result::Result<T, E2eError>;
