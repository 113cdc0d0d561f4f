/// 断言模块 - 提供针对请求/响应的断言语句
mod statements;
mod types;

pub use statements::{Statement, body_value, header_equals, status_code};
pub use types::{AssertError, AssertionResult};
