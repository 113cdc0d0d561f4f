use std::fmt;

use crate::{E2eError, Result};

/// 默认 host，当 URL 中未指定 host 时使用
const DEFAULT_HOST: &str = "localhost";
/// 默认 scheme，当 URL 中未指定 scheme 时使用
const DEFAULT_SCHEME: &str = "http";

/// 解析 HTTP 方法
///
/// 接受任意合法的 method token，大小写保持不变
pub fn parse_method(method: &str) -> Result<reqwest::Method> {
    reqwest::Method::from_bytes(method.as_bytes())
        .map_err(|_| E2eError::InvalidMethod(method.to_string()))
}

/// 把配置中的 URL 字符串解析为完整 URL
///
/// 处理各种简化格式:
/// 1. ":3000" -> "http://localhost:3000"
/// 2. "localhost:3000" / "www.myurl.com/persons" -> 补全 "http://"
/// 3. "https://:8080" -> "https://localhost:8080"
pub fn parse_url(s: &str) -> Result<url::Url> {
    let input = s.trim();
    if input.is_empty() {
        return Err(E2eError::InvalidUrl("empty url".to_string()));
    }

    let normalized = if input.starts_with(':') {
        format!("{}://{}{}", DEFAULT_SCHEME, DEFAULT_HOST, input)
    } else if let Some(pos) = input.find("://") {
        let after_scheme = &input[pos + 3..];
        if after_scheme.starts_with(':') {
            format!("{}://{}{}", &input[..pos], DEFAULT_HOST, after_scheme)
        } else {
            input.to_string()
        }
    } else {
        format!("{}://{}", DEFAULT_SCHEME, input)
    };

    url::Url::parse(&normalized).map_err(|e| E2eError::InvalidUrl(format!("{}: {}", s, e)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(u16);

impl Status {
    /// 手动构造状态码，范围与 `reqwest::StatusCode` 一致 (100..=999)
    pub fn new(code: u16) -> Result<Self> {
        if (100..1000).contains(&code) {
            Ok(Self(code))
        } else {
            Err(E2eError::Other(format!("Invalid HTTP status code: {}", code)))
        }
    }

    pub fn code(&self) -> u16 {
        self.0
    }

    pub fn is_informational(&self) -> bool {
        (100..=199).contains(&self.0)
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.0)
    }

    pub fn is_redirect(&self) -> bool {
        (300..=399).contains(&self.0)
    }

    pub fn is_client_error(&self) -> bool {
        (400..=499).contains(&self.0)
    }

    pub fn is_server_error(&self) -> bool {
        (500..=599).contains(&self.0)
    }

    /// 按协议不会携带 body 的状态码
    pub fn forbids_body(&self) -> bool {
        self.is_informational() || self.0 == 204 || self.0 == 304
    }
}

/// 服务端返回的状态码原样保留，不做范围检查
impl From<reqwest::StatusCode> for Status {
    fn from(status: reqwest::StatusCode) -> Self {
        Self(status.as_u16())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
