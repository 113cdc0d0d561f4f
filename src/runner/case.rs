use std::fmt;

use crate::Result;
use crate::assertion::{AssertionResult, Statement};
use crate::http::{
    Client, RequestHandler, RequestModifier, ResponseBodyModifier, ResponseModifier, SpecOption,
};

/// 作用于整个 handler 的脚本，在断言前运行
pub trait HandlerModifier: Send + Sync {
    fn apply(&self, handler: &mut RequestHandler) -> Result<()>;
}

impl<F> HandlerModifier for F
where
    F: Fn(&mut RequestHandler) -> Result<()> + Send + Sync,
{
    fn apply(&self, handler: &mut RequestHandler) -> Result<()> {
        self(handler)
    }
}

/// 什么都不做的脚本
pub fn noop() -> impl HandlerModifier {
    |_: &mut RequestHandler| -> Result<()> { Ok(()) }
}

/// 带名称的断言语句
pub struct TestStatement {
    pub description: String,
    pub statement: Statement,
}

impl TestStatement {
    pub fn new<F>(description: impl Into<String>, statement: F) -> Self
    where
        F: Fn(&RequestHandler) -> AssertionResult + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            statement: Box::new(statement),
        }
    }

    pub fn check(&self, handler: &RequestHandler) -> AssertionResult {
        (self.statement)(handler)
    }
}

impl fmt::Debug for TestStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestStatement")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// 一个端到端测试用例的全部配置
///
/// 各字段对应流水线中固定的阶段，由 `run_test_case` 消费一次
pub struct TestConfig {
    /// 测试名称，用作子测试名称的前缀
    pub name: String,
    pub client: Client,
    /// 请求的 method、url、body 等，应用后生成请求
    pub spec_options: Vec<SpecOption>,
    /// 修改已生成的请求，如 header
    pub request_modifiers: Vec<RequestModifier>,
    /// 发送请求前的脚本
    pub pre_script: Option<Box<dyn HandlerModifier>>,
    /// 发送请求前的断言
    pub pre_statements: Vec<TestStatement>,
    pub response_body_modifiers: Vec<ResponseBodyModifier>,
    /// 修改响应元数据，body 除外
    pub response_modifiers: Vec<ResponseModifier>,
    pub post_script: Option<Box<dyn HandlerModifier>>,
    /// 收到响应后的断言
    pub post_statements: Vec<TestStatement>,
}

impl TestConfig {
    pub fn new(name: impl Into<String>, client: Client) -> Self {
        Self {
            name: name.into(),
            client,
            spec_options: Vec::new(),
            request_modifiers: Vec::new(),
            pre_script: None,
            pre_statements: Vec::new(),
            response_body_modifiers: Vec::new(),
            response_modifiers: Vec::new(),
            post_script: None,
            post_statements: Vec::new(),
        }
    }

    pub fn with_spec_option(mut self, option: SpecOption) -> Self {
        self.spec_options.push(option);
        self
    }

    pub fn with_request_modifier(mut self, modifier: RequestModifier) -> Self {
        self.request_modifiers.push(modifier);
        self
    }

    pub fn with_pre_script(mut self, script: impl HandlerModifier + 'static) -> Self {
        self.pre_script = Some(Box::new(script));
        self
    }

    pub fn with_pre_statement<F>(mut self, description: impl Into<String>, statement: F) -> Self
    where
        F: Fn(&RequestHandler) -> AssertionResult + Send + Sync + 'static,
    {
        self.pre_statements
            .push(TestStatement::new(description, statement));
        self
    }

    pub fn with_response_body_modifier(mut self, modifier: ResponseBodyModifier) -> Self {
        self.response_body_modifiers.push(modifier);
        self
    }

    pub fn with_response_modifier(mut self, modifier: ResponseModifier) -> Self {
        self.response_modifiers.push(modifier);
        self
    }

    pub fn with_post_script(mut self, script: impl HandlerModifier + 'static) -> Self {
        self.post_script = Some(Box::new(script));
        self
    }

    pub fn with_post_statement<F>(mut self, description: impl Into<String>, statement: F) -> Self
    where
        F: Fn(&RequestHandler) -> AssertionResult + Send + Sync + 'static,
    {
        self.post_statements
            .push(TestStatement::new(description, statement));
        self
    }
}

impl fmt::Debug for TestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestConfig")
            .field("name", &self.name)
            .field("spec_options", &self.spec_options)
            .field("request_modifiers", &self.request_modifiers)
            .field("pre_statements", &self.pre_statements)
            .field("post_statements", &self.post_statements)
            .finish_non_exhaustive()
    }
}
