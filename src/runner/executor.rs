use crate::http::{HandlerOption, RequestHandler};
use crate::runner::case::{TestConfig, TestStatement};
use crate::runner::reporter::Reporter;
use crate::runner::types::{CaseReport, Checkpoint, Stage};
use crate::{E2eError, Result};

/// 执行一个端到端测试用例
///
/// 阶段固定：构建请求 → 修改请求 → 前置脚本 → 前置断言 → 发送请求 →
/// 修改响应 body → 修改响应 → 后置脚本 → 后置断言。
/// 除断言外任一阶段失败都会报告并停止；断言失败只影响它自己。
pub async fn run_test_case(config: TestConfig, reporter: &mut dyn Reporter) {
    let name = config.name.clone();
    if let Err((stage, e)) = run_stages(config, reporter).await {
        tracing::warn!("request: {} - {}: {}", name, stage, e);
        reporter.stage_failed(&name, stage, &e);
    }
}

async fn run_stages(
    config: TestConfig,
    reporter: &mut dyn Reporter,
) -> std::result::Result<(), (Stage, E2eError)> {
    let TestConfig {
        name,
        client,
        spec_options,
        request_modifiers,
        pre_script,
        pre_statements,
        response_body_modifiers,
        response_modifiers,
        post_script,
        post_statements,
    } = config;

    tracing::debug!("request: {} - building", name);
    let mut handler = RequestHandler::new(client, [HandlerOption::SpecOptions(spec_options)])
        .map_err(at(Stage::BuildRequest))?;

    if !request_modifiers.is_empty() {
        handler
            .modify_request(&request_modifiers)
            .await
            .map_err(at(Stage::ModifyRequest))?;
    }

    if let Some(script) = &pre_script {
        script.apply(&mut handler).map_err(at(Stage::PreScript))?;
    }

    run_statements(&name, Checkpoint::Pre, &pre_statements, &handler, reporter);

    tracing::debug!("request: {} - executing", name);
    handler.run_request().await.map_err(at(Stage::Execute))?;

    if !response_body_modifiers.is_empty() {
        handler
            .modify_response_body(&response_body_modifiers)
            .map_err(at(Stage::ModifyResponseBody))?;
    }

    if !response_modifiers.is_empty() {
        handler
            .modify_response(&response_modifiers)
            .map_err(at(Stage::ModifyResponse))?;
    }

    if let Some(script) = &post_script {
        script.apply(&mut handler).map_err(at(Stage::PostScript))?;
    }

    run_statements(&name, Checkpoint::Post, &post_statements, &handler, reporter);

    Ok(())
}

fn at(stage: Stage) -> impl FnOnce(E2eError) -> (Stage, E2eError) {
    move |e| (stage, e)
}

fn run_statements(
    name: &str,
    checkpoint: Checkpoint,
    statements: &[TestStatement],
    handler: &RequestHandler,
    reporter: &mut dyn Reporter,
) {
    for statement in statements {
        let label = checkpoint.label(name, &statement.description);
        let result = statement.check(handler);
        tracing::debug!("{} - passed: {}", label, result.passed);
        reporter.statement_finished(&label, &result);
    }
}

/// 执行用例并收集结果
pub async fn test_request(config: TestConfig) -> CaseReport {
    let mut report = CaseReport::new(config.name.clone());
    run_test_case(config, &mut report).await;
    tracing::info!(
        "request: {} - {}",
        report.name,
        if report.passed() { "passed" } else { "failed" }
    );
    report
}

/// 在 `cargo test` 中执行用例，有任何失败时 panic
pub async fn assert_test_case(config: TestConfig) {
    let report = test_request(config).await;
    if !report.passed() {
        panic!("{}", report);
    }
}

/// 执行用例，流水线阶段失败时返回该错误，断言失败不算错误
pub async fn try_test_request(config: TestConfig) -> Result<CaseReport> {
    let report = test_request(config).await;
    match &report.failure {
        Some(failure) => Err(E2eError::Other(format!(
            "request: {}\n{}",
            report.name, failure
        ))),
        None => Ok(report),
    }
}
