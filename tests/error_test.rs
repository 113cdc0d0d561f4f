use rue2e::{ChainKind, E2eError, Result};

#[test]
fn test_invalid_url() {
    let err = E2eError::InvalidUrl("not a url".to_string());
    assert_eq!(err.to_string(), "无效的 URL: not a url");
}

#[test]
fn test_missing_env_key() {
    let err = E2eError::MissingEnvKey("baseUrl".to_string());
    assert_eq!(err.to_string(), "环境变量缺失: key baseUrl not found in env");
}

#[test]
fn test_chain_error_names_chain() {
    let err = E2eError::Precondition("no body".to_string()).in_chain(ChainKind::ResponseBody);
    assert_eq!(
        err.to_string(),
        "modifying response body failed: 状态错误: no body"
    );
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_error_conversion_from_anyhow() {
    let anyhow_err = anyhow::anyhow!("test anyhow error");
    let e2e_err: E2eError = anyhow_err.into();
    assert!(e2e_err.to_string().contains("test anyhow error"));
}

#[test]
fn test_result_type() {
    fn returns_error() -> Result<()> {
        Err(E2eError::Precondition("test".to_string()))
    }

    let result = returns_error();
    assert!(result.is_err());
    match result {
        Err(E2eError::Precondition(msg)) => assert_eq!(msg, "test"),
        _ => panic!("Expected Precondition"),
    }
}
