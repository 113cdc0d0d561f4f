use rue2e::assertion::status_code;
use rue2e::variable::ConfigLoader;
use rue2e::{E2eError, SpecOption, TestConfig, test_request};
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 测试从实际配置文件加载嵌套环境
#[test]
fn test_load_config_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rue2e.toml");

    let config_content = r#"
[client]
timeout_secs = 5
user_agent = "rue2e-test"

[environments.dev]
baseUrl = "http://localhost:3000"
retries = 3

[environments.dev.user]
name = "jamie"
roles = ["admin"]

[environments.prod]
baseUrl = "https://api.example.com"
"#;

    fs::write(&config_path, config_content).unwrap();

    let config = ConfigLoader::load_from_path(&config_path).unwrap();
    assert_eq!(config.client.timeout_secs, 5);
    assert_eq!(config.client.connect_timeout_secs, 10);
    assert_eq!(config.client.user_agent.as_deref(), Some("rue2e-test"));
    assert!(config.client().is_ok());

    let dev = config.environment("dev").unwrap();
    assert_eq!(dev.get("baseUrl"), Some(json!("http://localhost:3000")));
    assert_eq!(dev.get("retries"), Some(json!(3)));
    assert_eq!(dev.get("name"), None);
    assert_eq!(dev.lookup("name"), Some(json!("jamie")));

    let prod = config.environment("prod").unwrap();
    assert_eq!(prod.len(), 1);
    assert!(config.environment("staging").is_none());
}

/// 测试每次取得的环境互不影响
#[test]
fn test_environments_are_independent() {
    let config = ConfigLoader::load_from_str(
        r#"
[environments.dev]
token = ""
"#,
    )
    .unwrap();

    let first = config.environment("dev").unwrap();
    let second = config.environment("dev").unwrap();
    first.insert("token", "abc");

    assert_eq!(first.get("token"), Some(json!("abc")));
    assert_eq!(second.get("token"), Some(json!("")));

    let shared = first.clone();
    shared.insert("token", "xyz");
    assert_eq!(first.get("token"), Some(json!("xyz")));
}

/// 测试从子目录向上查找配置文件
#[test]
fn test_find_config_in_parent_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("suite").join("cases");
    fs::create_dir_all(&nested).unwrap();

    assert!(ConfigLoader::find_from(&nested).unwrap().is_none());

    fs::write(
        temp_dir.path().join("rue2e.toml"),
        r#"
[environments.dev]
baseUrl = "http://localhost:3000"
"#,
    )
    .unwrap();

    let config = ConfigLoader::find_from(&nested).unwrap().unwrap();
    let dev = config.environment("dev").unwrap();
    assert_eq!(dev.get("baseUrl"), Some(json!("http://localhost:3000")));
}

/// 测试最近的配置文件格式错误时返回错误，而不是当作没有配置
#[test]
fn test_find_config_reports_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    let suite = temp_dir.path().join("suite");
    fs::create_dir_all(&suite).unwrap();

    fs::write(temp_dir.path().join("rue2e.toml"), "[environments.dev]
").unwrap();
    fs::write(suite.join("rue2e.toml"), "[client
timeout_secs = 5").unwrap();

    let err = ConfigLoader::find_from(&suite).unwrap_err();
    assert!(matches!(err, E2eError::Config(_)));

    assert!(ConfigLoader::find_from(temp_dir.path()).unwrap().is_some());
}

/// 测试从当前目录查找不会出错
#[test]
fn test_find_and_load_from_cwd() {
    assert!(ConfigLoader::find_and_load().is_ok());
}

/// 测试空配置
#[test]
fn test_empty_config() {
    let config = ConfigLoader::load_from_str("").unwrap();
    assert!(config.environments.is_empty());
    assert_eq!(config.client.timeout_secs, 30);
}

/// 测试格式错误的配置
#[test]
fn test_invalid_config() {
    let err = ConfigLoader::load_from_str("[environments.dev\nx = 1").unwrap_err();
    assert!(err.to_string().starts_with("配置错误"));
}

/// 测试用配置中的环境和客户端运行用例
#[tokio::test]
async fn test_case_driven_by_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/persons/1"))
        .and(body_json(json!({"person": {"name": "jamie", "age": 24}})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ConfigLoader::load_from_str(&format!(
        r#"
[client]
timeout_secs = 5

[environments.local]
baseUrl = "{}"
name = "jamie"
"#,
        mock_server.uri()
    ))
    .unwrap();
    let env = config.environment("local").unwrap();

    let case = TestConfig::new("update person", config.client().unwrap())
        .with_spec_option(SpecOption::method("PUT"))
        .with_spec_option(SpecOption::base_url_from_env(&env, "baseUrl", "persons/1"))
        .with_spec_option(SpecOption::json(&json!({"person": {"name": "", "age": 24}})))
        .with_spec_option(SpecOption::set_from_env(&env, None))
        .with_post_statement("status 200", status_code(200));

    let report = test_request(case).await;
    assert!(report.passed(), "{}", report);
}
