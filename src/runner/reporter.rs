use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};

use crate::E2eError;
use crate::assertion::AssertionResult;
use crate::runner::types::{CaseReport, Stage, StageFailure, StatementOutcome};

/// 接收流水线结果的宿主
///
/// 阶段失败每个用例最多出现一次；每条断言语句各报告一次
pub trait Reporter: Send {
    fn stage_failed(&mut self, test_name: &str, stage: Stage, error: &E2eError);

    fn statement_finished(&mut self, label: &str, result: &AssertionResult);
}

impl Reporter for CaseReport {
    fn stage_failed(&mut self, _test_name: &str, stage: Stage, error: &E2eError) {
        self.failure = Some(StageFailure {
            stage,
            message: error.to_string(),
        });
    }

    fn statement_finished(&mut self, label: &str, result: &AssertionResult) {
        self.statements.push(StatementOutcome {
            label: label.to_string(),
            result: result.clone(),
        });
    }
}

/// 在终端打印结果
pub struct TestReporter {
    verbose: bool,
}

impl TestReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// 打印多个用例的汇总表
    pub fn print_summary(&self, reports: &[CaseReport]) {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Started", "Test", "Result", "Statements", "Failure"]);

        for report in reports {
            let (result, color) = if report.passed() {
                ("passed", Color::Green)
            } else {
                ("failed", Color::Red)
            };
            let passed = report.statements.iter().filter(|s| s.result.passed).count();

            table.add_row(vec![
                Cell::new(report.started_at.format("%H:%M:%S")),
                Cell::new(&report.name),
                Cell::new(result).fg(color),
                Cell::new(format!("{}/{}", passed, report.statements.len())),
                Cell::new(
                    report
                        .failure
                        .as_ref()
                        .map(|f| f.stage.as_str())
                        .unwrap_or("-"),
                ),
            ]);
        }

        println!("{}", table);

        let failed = reports.iter().filter(|r| !r.passed()).count();
        if failed == 0 {
            println!(
                "  {}: {} passed, {} total",
                "Tests".bold(),
                reports.len().to_string().green(),
                reports.len()
            );
        } else {
            println!(
                "  {}: {} passed, {} failed, {} total",
                "Tests".bold(),
                (reports.len() - failed).to_string().green(),
                failed.to_string().red(),
                reports.len()
            );
        }
    }
}

impl Default for TestReporter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Reporter for TestReporter {
    fn stage_failed(&mut self, test_name: &str, stage: Stage, error: &E2eError) {
        println!(" {} request: {}", "✗".red(), test_name);
        println!("   {}: {}", stage.as_str().red().bold(), error);
    }

    fn statement_finished(&mut self, label: &str, result: &AssertionResult) {
        if result.passed {
            println!(" {} {}", "✓".green(), label);
            if self.verbose {
                if let Some(actual) = &result.actual {
                    println!("     {} {}", "actual:".dimmed(), actual);
                }
            }
        } else {
            println!(" {} {}", "✗".red(), label);
            if let Some(msg) = &result.message {
                println!("     {}", msg.red());
            }
        }
    }
}
