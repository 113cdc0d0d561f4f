//! 请求、响应 body、响应三种修改链
//!
//! 每条链按顺序执行，遇到第一个错误即停止，并用 [`ChainKind`] 标明失败的链。

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

use reqwest::header::{CONTENT_TYPE, HeaderName, HeaderValue};

use crate::error::ChainKind;
use crate::http::client::Client;
use crate::http::response::Response;
use crate::variable::{Environment, KeyMap, ValueMap, mapped_key, nested};
use crate::{E2eError, Result};

pub const CONTENT_TYPE_JSON: &str = "application/json";

type RequestFn = Box<dyn Fn(&mut reqwest::Request) -> Result<()> + Send + Sync>;
type ResponseBodyFn = Box<dyn Fn(Vec<u8>) -> Result<Vec<u8>> + Send + Sync>;
type ResponseFn = Box<dyn Fn(&mut Response) -> Result<()> + Send + Sync>;

/// 作用于已生成请求的修改器
pub enum RequestModifier {
    /// 设置多个 header，已存在的会被覆盖
    Headers(BTreeMap<String, String>),
    ContentType(String),
    /// 额外发送一次相同的请求，记录首字节时间和总耗时，不影响主请求
    TimeToFirstByte,
    Custom(RequestFn),
}

impl RequestModifier {
    pub fn headers<K, V>(headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Headers(
            headers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn content_type(content_type: impl Into<String>) -> Self {
        Self::ContentType(content_type.into())
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&mut reqwest::Request) -> Result<()> + Send + Sync + 'static,
    {
        Self::Custom(Box::new(f))
    }

    pub(crate) async fn apply(&self, request: &mut reqwest::Request, client: &Client) -> Result<()> {
        match self {
            RequestModifier::Headers(headers) => {
                for (key, value) in headers {
                    set_header(request, key, value)?;
                }
                Ok(())
            }
            RequestModifier::ContentType(content_type) => {
                set_header(request, CONTENT_TYPE.as_str(), content_type)
            }
            RequestModifier::TimeToFirstByte => time_to_first_byte(request, client).await,
            RequestModifier::Custom(f) => f(request),
        }
    }
}

impl fmt::Debug for RequestModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestModifier::Headers(headers) => f.debug_tuple("Headers").field(headers).finish(),
            RequestModifier::ContentType(value) => {
                f.debug_tuple("ContentType").field(value).finish()
            }
            RequestModifier::TimeToFirstByte => write!(f, "TimeToFirstByte"),
            RequestModifier::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

fn set_header(request: &mut reqwest::Request, key: &str, value: &str) -> Result<()> {
    let name = HeaderName::from_bytes(key.as_bytes())
        .map_err(|e| E2eError::InvalidHeader(format!("{}: {}", key, e)))?;
    let value = HeaderValue::from_str(value)
        .map_err(|e| E2eError::InvalidHeader(format!("{}: {}", key, e)))?;
    request.headers_mut().insert(name, value);
    Ok(())
}

async fn time_to_first_byte(request: &reqwest::Request, client: &Client) -> Result<()> {
    let probe = request.try_clone().ok_or_else(|| {
        E2eError::Precondition("request body cannot be cloned for the timing probe".to_string())
    })?;

    let start = Instant::now();
    let response = client.send(probe).await?;
    tracing::info!(
        "Time from start to first byte: {:?} ({} {})",
        start.elapsed(),
        request.method(),
        request.url()
    );

    response.bytes().await?;
    tracing::info!("Total time: {:?}", start.elapsed());
    Ok(())
}

/// 依次执行请求修改器
pub async fn apply_request_modifiers(
    request: &mut reqwest::Request,
    client: &Client,
    modifiers: &[RequestModifier],
) -> Result<()> {
    for modifier in modifiers {
        modifier
            .apply(request, client)
            .await
            .map_err(|e| e.in_chain(ChainKind::Request))?;
    }
    Ok(())
}

/// 作用于已读出的响应 body 的修改器
///
/// 响应流只能读一次，所以 body 以字节形式在链中传递
pub enum ResponseBodyModifier {
    /// 从 JSON body 中提取环境中已有 key 的值，写回环境
    JsonToEnv {
        env: Environment,
        keymap: Option<KeyMap>,
    },
    Custom(ResponseBodyFn),
}

impl ResponseBodyModifier {
    pub fn json_to_env(env: &Environment, keymap: Option<KeyMap>) -> Self {
        Self::JsonToEnv {
            env: env.clone(),
            keymap,
        }
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Vec<u8>) -> Result<Vec<u8>> + Send + Sync + 'static,
    {
        Self::Custom(Box::new(f))
    }

    pub fn apply(&self, body: Vec<u8>) -> Result<Vec<u8>> {
        match self {
            ResponseBodyModifier::JsonToEnv { env, keymap } => {
                json_to_env(&body, env, keymap.as_ref())?;
                Ok(body)
            }
            ResponseBodyModifier::Custom(f) => f(body),
        }
    }
}

impl fmt::Debug for ResponseBodyModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBodyModifier::JsonToEnv { keymap, .. } => {
                f.debug_struct("JsonToEnv").field("keymap", keymap).finish()
            }
            ResponseBodyModifier::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

fn json_to_env(body: &[u8], env: &Environment, keymap: Option<&KeyMap>) -> Result<()> {
    let body_map: ValueMap = serde_json::from_slice(body)?;

    for key in env.keys() {
        let key_in_body = mapped_key(keymap, &key);
        match nested::lookup(key_in_body, &body_map) {
            Some(value) => env.insert(key.as_str(), value.clone()),
            None => tracing::debug!("Key {} not found in response body, skipped", key_in_body),
        }
    }
    Ok(())
}

/// 依次执行响应 body 修改器，返回最终的 body
pub fn apply_response_body_modifiers(
    body: Vec<u8>,
    modifiers: &[ResponseBodyModifier],
) -> Result<Vec<u8>> {
    modifiers.iter().try_fold(body, |body, modifier| {
        modifier
            .apply(body)
            .map_err(|e| e.in_chain(ChainKind::ResponseBody))
    })
}

/// 作用于响应元数据（状态码、header）的修改器
pub struct ResponseModifier(ResponseFn);

impl ResponseModifier {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Response) -> Result<()> + Send + Sync + 'static,
    {
        Self(Box::new(f))
    }

    pub fn apply(&self, response: &mut Response) -> Result<()> {
        (self.0)(response)
    }
}

impl fmt::Debug for ResponseModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResponseModifier(..)")
    }
}

/// 依次执行响应修改器
pub fn apply_response_modifiers(
    response: &mut Response,
    modifiers: &[ResponseModifier],
) -> Result<()> {
    for modifier in modifiers {
        modifier
            .apply(response)
            .map_err(|e| e.in_chain(ChainKind::Response))?;
    }
    Ok(())
}
