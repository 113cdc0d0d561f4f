//! 请求描述（Spec）及其构建选项
//!
//! 选项按给定顺序依次作用于 [`SpecBuilder`]，最后冻结为不可变的
//! `reqwest::Request`。冻结之后修改 Spec 的字段不会影响已生成的请求，
//! 需要改 body 时使用 [`Spec::regenerate`]。

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::http::types::{parse_method, parse_url};
use crate::utils::{QueryMap, assemble_query, join_route};
use crate::variable::{Environment, KeyMap, ValueMap, mapped_key, nested};
use crate::{E2eError, Result};

/// 未配置 URL 时使用的占位地址
pub const DEFAULT_URL: &str = "https://example.com";

/// 自定义选项
pub type CustomSpecOption = Box<dyn FnOnce(SpecBuilder) -> Result<SpecBuilder> + Send>;

/// Spec 构建选项
pub enum SpecOption {
    /// 设置 HTTP 方法，构建时才校验
    Method(String),
    Url(String),
    Body(Vec<u8>),
    /// 序列化为 JSON 作为 body
    Json(Value),
    /// 从环境中读取基础 URL 并拼接路由
    BaseUrlFromEnv {
        env: Environment,
        key: String,
        route: String,
    },
    /// 把环境中的值写入现有的 JSON body
    SetFromEnv {
        env: Environment,
        keymap: Option<KeyMap>,
    },
    /// 由路由和参数表生成 URL
    RouteFromQuery { route: String, query: QueryMap },
    /// 以当前 URL 为路由追加查询参数
    AddQuery(QueryMap),
    Custom(CustomSpecOption),
    /// 构造选项时已经失败，应用时返回该错误
    Rejected { option: &'static str, reason: String },
}

impl SpecOption {
    pub fn method(method: impl Into<String>) -> Self {
        Self::Method(method.into())
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    pub fn body(body: impl Into<Vec<u8>>) -> Self {
        Self::Body(body.into())
    }

    /// 序列化任意 payload，失败会推迟到应用选项时报告
    pub fn json<T: Serialize + ?Sized>(payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(value) => Self::Json(value),
            Err(e) => Self::Rejected {
                option: "Json",
                reason: format!("serialize: {}", e),
            },
        }
    }

    pub fn base_url_from_env(
        env: &Environment,
        key: impl Into<String>,
        route: impl Into<String>,
    ) -> Self {
        Self::BaseUrlFromEnv {
            env: env.clone(),
            key: key.into(),
            route: route.into(),
        }
    }

    pub fn set_from_env(env: &Environment, keymap: Option<KeyMap>) -> Self {
        Self::SetFromEnv {
            env: env.clone(),
            keymap,
        }
    }

    pub fn route_from_query(route: impl Into<String>, query: QueryMap) -> Self {
        Self::RouteFromQuery {
            route: route.into(),
            query,
        }
    }

    pub fn add_query(query: QueryMap) -> Self {
        Self::AddQuery(query)
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: FnOnce(SpecBuilder) -> Result<SpecBuilder> + Send + 'static,
    {
        Self::Custom(Box::new(f))
    }

    fn name(&self) -> &'static str {
        match self {
            SpecOption::Method(_) => "Method",
            SpecOption::Url(_) => "Url",
            SpecOption::Body(_) => "Body",
            SpecOption::Json(_) => "Json",
            SpecOption::BaseUrlFromEnv { .. } => "BaseUrlFromEnv",
            SpecOption::SetFromEnv { .. } => "SetFromEnv",
            SpecOption::RouteFromQuery { .. } => "RouteFromQuery",
            SpecOption::AddQuery(_) => "AddQuery",
            SpecOption::Custom(_) => "Custom",
            SpecOption::Rejected { option, .. } => *option,
        }
    }
}

impl fmt::Debug for SpecOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpecOption::{}", self.name())
    }
}

/// 处于配置阶段的 Spec
#[derive(Debug, Clone)]
pub struct SpecBuilder {
    pub method: String,
    pub url: String,
    pub body: Vec<u8>,
}

impl Default for SpecBuilder {
    fn default() -> Self {
        Self {
            method: reqwest::Method::GET.to_string(),
            url: DEFAULT_URL.to_string(),
            body: Vec::new(),
        }
    }
}

impl SpecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 应用单个选项
    pub fn apply(mut self, option: SpecOption) -> Result<Self> {
        tracing::trace!("Applying spec option {}", option.name());

        match option {
            SpecOption::Method(method) => self.method = method,
            SpecOption::Url(url) => self.url = url,
            SpecOption::Body(body) => self.body = body,
            SpecOption::Json(value) => self.body = serde_json::to_vec(&value)?,
            SpecOption::BaseUrlFromEnv { env, key, route } => {
                let base = env
                    .lookup(&key)
                    .ok_or_else(|| E2eError::MissingEnvKey(key.clone()))?;
                match base {
                    Value::String(base) => self.url = join_route(&base, &route),
                    other => {
                        return Err(E2eError::EnvValueNotString {
                            key,
                            value: other.to_string(),
                        });
                    }
                }
            }
            SpecOption::SetFromEnv { env, keymap } => {
                let mut body: ValueMap =
                    serde_json::from_slice(&self.body).map_err(|e| E2eError::OptionFailed {
                        option: "SetFromEnv",
                        reason: format!("decode body: {}", e),
                    })?;
                for (key, value) in env.snapshot() {
                    let key_in_body = mapped_key(keymap.as_ref(), &key);
                    nested::assign(key_in_body, value, &mut body);
                }
                self.body = serde_json::to_vec(&body)?;
            }
            SpecOption::RouteFromQuery { route, query } => {
                self.url = assemble_query(&route, &query);
            }
            SpecOption::AddQuery(query) => self.url = assemble_query(&self.url, &query),
            SpecOption::Custom(f) => return f(self),
            SpecOption::Rejected { option, reason } => {
                return Err(E2eError::OptionFailed { option, reason });
            }
        }

        Ok(self)
    }

    /// 依次应用所有选项，遇到第一个错误即停止
    pub fn apply_all(self, options: impl IntoIterator<Item = SpecOption>) -> Result<Self> {
        options
            .into_iter()
            .try_fold(self, |builder, option| builder.apply(option))
    }

    /// 冻结为不可变的请求
    pub fn build(self) -> Result<Spec> {
        let method = parse_method(&self.method)?;
        let url = parse_url(&self.url)?;

        let mut request = reqwest::Request::new(method, url);
        if !self.body.is_empty() {
            *request.body_mut() = Some(reqwest::Body::from(self.body.clone()));
        }

        Ok(Spec {
            method: self.method,
            url: self.url,
            body: self.body,
            request,
        })
    }
}

/// 冻结后的请求描述
///
/// `method`、`url`、`body` 保留构建时的配置，只用于查看；
/// 执行和后续修改以 [`Spec::request`] 为准。
#[derive(Debug)]
pub struct Spec {
    pub method: String,
    pub url: String,
    pub body: Vec<u8>,
    request: reqwest::Request,
}

impl Spec {
    /// 从默认值开始依次应用选项，然后生成请求
    pub fn new(options: impl IntoIterator<Item = SpecOption>) -> Result<Self> {
        SpecBuilder::new().apply_all(options)?.build()
    }

    /// 以当前字段为起点重新进入配置阶段，应用选项后重新生成请求
    ///
    /// 之前通过请求修改器设置的 header 不会保留
    pub fn regenerate(self, options: impl IntoIterator<Item = SpecOption>) -> Result<Self> {
        SpecBuilder {
            method: self.method,
            url: self.url,
            body: self.body,
        }
        .apply_all(options)?
        .build()
    }

    pub fn request(&self) -> &reqwest::Request {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut reqwest::Request {
        &mut self.request
    }

    /// 按 JSON 解码 body
    pub fn body_json(&self) -> Result<Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}
