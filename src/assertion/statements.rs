//! 常用的断言语句
//!
//! 每个函数返回一个作用于 [`RequestHandler`] 的断言闭包，
//! 可直接放进 `TestStatement`。

use serde_json::Value;

use crate::assertion::types::{AssertError, AssertionResult};
use crate::http::RequestHandler;
use crate::variable::{ValueMap, nested};

/// 断言语句：读取 handler 的状态并给出结果
pub type Statement = Box<dyn Fn(&RequestHandler) -> AssertionResult + Send + Sync>;

/// 断言响应状态码
pub fn status_code(expected: u16) -> impl Fn(&RequestHandler) -> AssertionResult + Send + Sync {
    move |handler: &RequestHandler| {
        let raw = format!("status == {}", expected);
        match handler.response() {
            Some(response) => AssertionResult::check_eq(raw, response.status.code(), expected),
            None => AssertionResult::error(
                raw,
                AssertError::MissingTarget("no response captured".to_string()),
            ),
        }
    }
}

/// 断言响应 header 的值
pub fn header_equals(
    name: impl Into<String>,
    expected: impl Into<String>,
) -> impl Fn(&RequestHandler) -> AssertionResult + Send + Sync {
    let name = name.into();
    let expected = expected.into();

    move |handler: &RequestHandler| {
        let raw = format!("headers.{} == {:?}", name, expected);
        let Some(response) = handler.response() else {
            return AssertionResult::error(
                raw,
                AssertError::MissingTarget("no response captured".to_string()),
            );
        };
        match response.header(&name) {
            Some(actual) => AssertionResult::check_eq(raw, actual, expected.as_str()),
            None => AssertionResult::error(
                raw,
                AssertError::PathNotFound(format!("Header '{}' not found", name)),
            ),
        }
    }
}

/// 断言 JSON 响应 body 中某个 key 的值，key 按深度优先在嵌套对象中查找
pub fn body_value(
    key: impl Into<String>,
    expected: impl Into<Value>,
) -> impl Fn(&RequestHandler) -> AssertionResult + Send + Sync {
    let key = key.into();
    let expected = expected.into();

    move |handler: &RequestHandler| {
        let raw = format!("body.{} == {}", key, expected);
        match extract_body_value(handler, &key) {
            Ok(actual) => AssertionResult::check_eq(raw, &actual, &expected),
            Err(e) => AssertionResult::error(raw, e),
        }
    }
}

fn extract_body_value(handler: &RequestHandler, key: &str) -> Result<Value, AssertError> {
    let body = handler
        .response_body()
        .ok_or_else(|| AssertError::MissingTarget("no response body captured".to_string()))?;
    let body_map: ValueMap = serde_json::from_slice(body)?;

    nested::lookup(key, &body_map)
        .cloned()
        .ok_or_else(|| AssertError::PathNotFound(format!("Key '{}' not found in body", key)))
}
