use std::time::Instant;

use crate::Result;
use crate::http::response::Response;
use crate::variable::ClientConfig;

/// 可复用的 HTTP 传输客户端
///
/// 作为显式依赖传给 [`RequestHandler`](crate::http::RequestHandler)。
/// `Client::new()` 是默认工厂，`Client::with_config` 按配置构建。
#[derive(Debug, Clone)]
pub struct Client {
    inner: reqwest::Client,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout());
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        Ok(Self {
            inner: builder.build()?,
        })
    }

    pub fn from_reqwest(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// 只发送请求，返回尚未读取 body 的原始响应
    pub async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        Ok(self.inner.execute(request).await?)
    }

    /// 发送请求并把 body 完整读入内存
    ///
    /// 没有 body 的响应（HEAD 请求、1xx、204、304）返回 `None`，与空 body 区分
    pub async fn execute(&self, request: reqwest::Request) -> Result<(Response, Option<Vec<u8>>)> {
        let expects_body = *request.method() != reqwest::Method::HEAD;

        let start = Instant::now();
        let response = self.send(request).await?;
        let captured = Response::from_reqwest(&response, start.elapsed());

        if !expects_body || captured.status.forbids_body() {
            // 丢弃响应即释放连接
            drop(response);
            return Ok((captured, None));
        }

        let body = response.bytes().await?.to_vec();
        Ok((captured.with_duration(start.elapsed()), Some(body)))
    }
}
