use std::fmt;

/// 断言错误类型
#[derive(Debug, thiserror::Error)]
pub enum AssertError {
    #[error("Missing target: {0}")]
    MissingTarget(String),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// 断言结果
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionResult {
    /// 断言的文字描述
    pub raw: String,

    /// 是否通过
    pub passed: bool,

    /// 实际值（字符串表示）
    pub actual: Option<String>,

    /// 期望描述
    pub expected: String,

    /// 失败消息
    pub message: Option<String>,
}

impl AssertionResult {
    /// 创建成功的断言结果
    pub fn success(raw: String, actual: String, expected: String) -> Self {
        Self {
            raw,
            passed: true,
            actual: Some(actual),
            expected,
            message: None,
        }
    }

    /// 创建失败的断言结果
    pub fn failure(raw: String, actual: String, expected: String, message: String) -> Self {
        Self {
            raw,
            passed: false,
            actual: Some(actual),
            expected,
            message: Some(message),
        }
    }

    /// 创建错误的断言结果（取值失败等）
    pub fn error(raw: String, error: AssertError) -> Self {
        Self {
            raw,
            passed: false,
            actual: None,
            expected: String::new(),
            message: Some(error.to_string()),
        }
    }

    /// 比较实际值和期望值
    pub fn check_eq<T>(raw: impl Into<String>, actual: T, expected: T) -> Self
    where
        T: PartialEq + fmt::Debug,
    {
        let raw = raw.into();
        let actual_str = format!("{:?}", actual);
        let expected_str = format!("{:?}", expected);

        if actual == expected {
            Self::success(raw, actual_str, expected_str)
        } else {
            let message = format!("Expected {}, but got {}", expected_str, actual_str);
            Self::failure(raw, actual_str, expected_str, message)
        }
    }
}

impl fmt::Display for AssertionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.passed { "✓" } else { "✗" };
        write!(f, "{} {}", mark, self.raw)?;
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}
