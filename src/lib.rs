//! 声明式的 HTTP 端到端测试用例
//!
//! 一个用例由有序的选项和修改器组成：构建请求、修改请求、执行、
//! 修改响应并在发送前后两个检查点运行断言。

pub mod assertion;
pub mod error;
pub mod http;
pub mod logger;
pub mod runner;
pub mod utils;
pub mod variable;

// Re-export commonly used types
pub use error::{ChainKind, E2eError, Result};
pub use http::{
    Client, HandlerOption, RequestHandler, RequestModifier, ResponseBodyModifier,
    ResponseModifier, Spec, SpecOption,
};
pub use runner::{TestConfig, TestStatement, assert_test_case, run_test_case, test_request};
pub use utils::QueryMap;
pub use variable::{Environment, KeyMap, ValueMap};
