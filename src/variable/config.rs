use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::http::Client;
use crate::variable::{Environment, ValueMap};
use crate::{E2eError, Result};

/// HTTP 客户端配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// 整个请求的超时时间（秒）
    pub timeout_secs: u64,
    /// 建立连接的超时时间（秒）
    pub connect_timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// 完整的配置文件
#[derive(Debug, Clone, Deserialize, Default)]
pub struct E2eConfig {
    #[serde(default)]
    pub client: ClientConfig,

    /// 每个环境是一棵任意嵌套的变量树
    #[serde(default)]
    pub environments: HashMap<String, ValueMap>,
}

impl E2eConfig {
    /// 用指定环境的变量创建一个新的共享环境
    pub fn environment(&self, env_name: &str) -> Option<Environment> {
        self.environments
            .get(env_name)
            .cloned()
            .map(Environment::from_map)
    }

    /// 按配置构建 HTTP 客户端
    pub fn client(&self) -> Result<Client> {
        Client::with_config(&self.client)
    }
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "rue2e.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<E2eConfig> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<E2eConfig> {
        toml::from_str(content)
            .map_err(|e| E2eError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// 从当前目录开始向上查找并加载配置文件
    pub fn find_and_load() -> Result<Option<E2eConfig>> {
        let current = std::env::current_dir()?;
        Self::find_from(&current)
    }

    /// 从指定目录开始向上查找配置文件
    ///
    /// 没有找到时返回 `Ok(None)`；找到但无法解析时返回错误
    pub fn find_from(start: &Path) -> Result<Option<E2eConfig>> {
        for dir in start.ancestors() {
            let config_path = dir.join(Self::CONFIG_FILE);
            if config_path.is_file() {
                tracing::debug!("Loading config from {}", config_path.display());
                return Self::load_from_path(&config_path).map(Some);
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_path() {
        let config_content = r#"
[client]
timeout_secs = 5

[environments.dev]
baseUrl = "http://localhost:8080"

[environments.dev.auth]
token = "dev-token"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = ConfigLoader::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.client.timeout(), Duration::from_secs(5));
        assert_eq!(config.client.connect_timeout_secs, 10);

        let env = config.environment("dev").unwrap();
        assert_eq!(env.get("baseUrl"), Some(json!("http://localhost:8080")));
        assert_eq!(env.lookup("token"), Some(json!("dev-token")));
        assert!(config.environment("prod").is_none());
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = ConfigLoader::load_from_str("").unwrap();
        assert_eq!(config.client.timeout_secs, 30);
        assert!(config.client.user_agent.is_none());
        assert!(config.environments.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        let result = ConfigLoader::load_from_str("[client]\ntimeout_secs = \"soon\"");
        assert!(matches!(result, Err(E2eError::Config(_))));
    }
}
