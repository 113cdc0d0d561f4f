pub mod config;
pub mod environment;
pub mod nested;

use std::collections::BTreeMap;

pub use config::{ClientConfig, ConfigLoader, E2eConfig};
pub use environment::Environment;
pub use nested::{assign, lookup};

/// 动态类型值组成的嵌套 Map
pub type ValueMap = serde_json::Map<String, serde_json::Value>;

/// 环境变量名到 JSON body 中字段名的映射
pub type KeyMap = BTreeMap<String, String>;

/// 按映射表取得 body 中的字段名，未映射时使用原名
pub(crate) fn mapped_key<'a>(keymap: Option<&'a KeyMap>, key: &'a str) -> &'a str {
    keymap
        .and_then(|map| map.get(key))
        .map(String::as_str)
        .unwrap_or(key)
}
