use std::time::Duration;

use reqwest::header::HeaderMap as Headers;

use crate::Result;
use crate::http::types::Status;

/// 捕获到的响应元数据，不含 body
///
/// body 在执行时已被完整读出，单独保存在 handler 中
#[derive(Debug, Clone)]
pub struct Response {
    pub status: Status,
    pub headers: Headers,
    pub version: reqwest::Version,
    pub url: url::Url,
    /// 从发送到读完 body 的耗时
    pub duration: Duration,
}

impl Response {
    pub fn new(status: u16, headers: Headers, url: url::Url, duration: Duration) -> Result<Self> {
        Ok(Self {
            status: Status::new(status)?,
            headers,
            version: reqwest::Version::HTTP_11,
            url,
            duration,
        })
    }

    pub(crate) fn from_reqwest(response: &reqwest::Response, duration: Duration) -> Self {
        Self {
            status: Status::from(response.status()),
            headers: response.headers().clone(),
            version: response.version(),
            url: response.url().clone(),
            duration,
        }
    }

    pub(crate) fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// 读取 header 的字符串值，不存在或非 ASCII 时返回 None
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_redirect(&self) -> bool {
        self.status.is_redirect()
    }

    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}
