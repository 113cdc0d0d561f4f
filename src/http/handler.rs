use serde_json::Value;

use crate::http::client::Client;
use crate::http::modifier::{
    RequestModifier, ResponseBodyModifier, ResponseModifier, apply_request_modifiers,
    apply_response_body_modifiers, apply_response_modifiers,
};
use crate::http::response::Response;
use crate::http::spec::{Spec, SpecOption};
use crate::{E2eError, Result};

/// RequestHandler 的构建选项
#[derive(Debug)]
pub enum HandlerOption {
    Spec(Spec),
    /// 由选项构建 Spec
    SpecOptions(Vec<SpecOption>),
    /// 替换构造时传入的客户端
    Client(Client),
}

/// 负责一个请求的构建、修改和执行
///
/// 执行成功后响应元数据和 body 分别保存，供后续修改链和断言使用。
/// 再次执行会覆盖上一次的响应。
#[derive(Debug)]
pub struct RequestHandler {
    spec: Option<Spec>,
    client: Client,
    response: Option<Response>,
    response_body: Option<Vec<u8>>,
}

impl RequestHandler {
    /// 按顺序应用选项，任一选项失败则构建失败
    pub fn new(client: Client, options: impl IntoIterator<Item = HandlerOption>) -> Result<Self> {
        let mut handler = Self {
            spec: None,
            client,
            response: None,
            response_body: None,
        };

        for option in options {
            match option {
                HandlerOption::Spec(spec) => handler.spec = Some(spec),
                HandlerOption::SpecOptions(spec_options) => {
                    handler.spec = Some(Spec::new(spec_options)?);
                }
                HandlerOption::Client(client) => handler.client = client,
            }
        }

        Ok(handler)
    }

    /// 由 Spec 选项直接构建
    pub fn from_spec_options(client: Client, spec_options: Vec<SpecOption>) -> Result<Self> {
        Self::new(client, [HandlerOption::SpecOptions(spec_options)])
    }

    /// 执行请求，完整读取响应 body
    ///
    /// 非 2xx 状态码不是错误；没有 body 的响应只记录元数据
    pub async fn run_request(&mut self) -> Result<()> {
        let spec = self.spec.as_ref().ok_or_else(|| {
            E2eError::Precondition("no request spec initialized before executing".to_string())
        })?;
        let request = spec.request().try_clone().ok_or_else(|| {
            E2eError::Precondition("request body cannot be cloned for execution".to_string())
        })?;

        tracing::debug!("Sending {} {}", request.method(), request.url());
        let (response, body) = self.client.execute(request).await?;
        tracing::debug!(
            "Received {} in {}ms",
            response.status,
            response.duration.as_millis()
        );

        self.response = Some(response);
        self.response_body = body;
        Ok(())
    }

    /// 释放响应流
    ///
    /// 响应 body 在 `run_request` 中已读完并释放，这里只做收尾，可重复调用
    pub fn close(&mut self) -> Result<()> {
        if self.response.is_none() {
            tracing::trace!("close: no response captured");
        }
        Ok(())
    }

    pub fn spec(&self) -> Option<&Spec> {
        self.spec.as_ref()
    }

    /// 已生成的请求，供断言查看
    ///
    /// 修改请求请使用 `modify_request`
    pub fn request(&self) -> Option<&reqwest::Request> {
        self.spec.as_ref().map(Spec::request)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    pub fn response_body(&self) -> Option<&[u8]> {
        self.response_body.as_deref()
    }

    pub fn set_response_body(&mut self, body: Vec<u8>) {
        self.response_body = Some(body);
    }

    /// 按 JSON 解码响应 body
    pub fn response_json(&self) -> Result<Value> {
        let body = self.response_body.as_deref().ok_or_else(|| {
            E2eError::Precondition("no response body captured".to_string())
        })?;
        Ok(serde_json::from_slice(body)?)
    }

    pub async fn modify_request(&mut self, modifiers: &[RequestModifier]) -> Result<()> {
        let spec = self.spec.as_mut().ok_or_else(|| {
            E2eError::Precondition("no request generated before modifying it".to_string())
        })?;
        apply_request_modifiers(spec.request_mut(), &self.client, modifiers).await
    }

    /// 修改链失败时保留原 body
    pub fn modify_response_body(&mut self, modifiers: &[ResponseBodyModifier]) -> Result<()> {
        // 链按值传递 body，这里必须 clone，不能 take
        let body = self.response_body.clone().ok_or_else(|| {
            E2eError::Precondition("no response body set before modifying it".to_string())
        })?;
        self.response_body = Some(apply_response_body_modifiers(body, modifiers)?);
        Ok(())
    }

    pub fn modify_response(&mut self, modifiers: &[ResponseModifier]) -> Result<()> {
        let response = self.response.as_mut().ok_or_else(|| {
            E2eError::Precondition("no response gathered before modifying it".to_string())
        })?;
        apply_response_modifiers(response, modifiers)
    }
}
