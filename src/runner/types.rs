use std::fmt;

use chrono::{DateTime, Local};

use crate::assertion::AssertionResult;

/// 会中断流水线的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    BuildRequest,
    ModifyRequest,
    PreScript,
    Execute,
    ModifyResponseBody,
    ModifyResponse,
    PostScript,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::BuildRequest => "Generating request failed",
            Stage::ModifyRequest => "Modifying request failed",
            Stage::PreScript => "Pre-request function failed",
            Stage::Execute => "Request execution failed",
            Stage::ModifyResponseBody => "Modifying response body failed",
            Stage::ModifyResponse => "Modifying response failed",
            Stage::PostScript => "Post-request function failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 断言检查点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    Pre,
    Post,
}

impl Checkpoint {
    /// 子测试名称: `<test-name>/[PRE]/<description>`
    pub fn label(&self, test_name: &str, description: &str) -> String {
        let tag = match self {
            Checkpoint::Pre => "PRE",
            Checkpoint::Post => "POST",
        };
        format!("{}/[{}]/{}", test_name, tag, description)
    }
}

/// 中断流水线的失败
#[derive(Debug, Clone)]
pub struct StageFailure {
    pub stage: Stage,
    pub message: String,
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.stage, self.message)
    }
}

/// 单条断言语句的结果
#[derive(Debug, Clone)]
pub struct StatementOutcome {
    /// 子测试名称
    pub label: String,
    pub result: AssertionResult,
}

/// 一个测试用例的完整结果
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub name: String,
    pub started_at: DateTime<Local>,
    /// 流水线中断时的失败，最多一个
    pub failure: Option<StageFailure>,
    pub statements: Vec<StatementOutcome>,
}

impl CaseReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            started_at: Local::now(),
            failure: None,
            statements: Vec::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.failure.is_none() && self.statements.iter().all(|s| s.result.passed)
    }

    pub fn failed_statements(&self) -> impl Iterator<Item = &StatementOutcome> {
        self.statements.iter().filter(|s| !s.result.passed)
    }

    /// 按名称查找子测试结果
    pub fn statement(&self, label: &str) -> Option<&AssertionResult> {
        self.statements
            .iter()
            .find(|s| s.label == label)
            .map(|s| &s.result)
    }
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "request: {}", self.name)?;
        if let Some(failure) = &self.failure {
            writeln!(f, "  {}", failure)?;
        }
        for outcome in &self.statements {
            let mark = if outcome.result.passed { "✓" } else { "✗" };
            write!(f, "  {} {}", mark, outcome.label)?;
            if let Some(message) = &outcome.result.message {
                write!(f, ": {}", message)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
