//! 嵌套 Map 的递归读写
//!
//! 两个操作都按深度优先搜索：当前层命中则立即返回，否则按 Map 的迭代顺序
//! 依次进入值为对象的子节点。数组不参与搜索。

use serde_json::Value;

use crate::variable::ValueMap;

/// 在可能嵌套的 Map 中按 key 查找值
///
/// 未找到时返回 `None`；存储的 JSON `null` 返回 `Some(&Value::Null)`
pub fn lookup<'a>(key: &str, map: &'a ValueMap) -> Option<&'a Value> {
    if let Some(value) = map.get(key) {
        return Some(value);
    }

    map.values().find_map(|child| match child {
        Value::Object(nested) => lookup(key, nested),
        _ => None,
    })
}

/// 在可能嵌套的 Map 中找到已存在的 key 并覆盖其值
///
/// 不会新增 key；返回 false 时 Map 保持不变
pub fn assign(key: &str, value: Value, map: &mut ValueMap) -> bool {
    place(key, value, map).is_ok()
}

/// 未放置成功时把值交还给调用方，避免在每个子节点上 clone
fn place(key: &str, value: Value, map: &mut ValueMap) -> Result<(), Value> {
    if let Some(slot) = map.get_mut(key) {
        *slot = value;
        return Ok(());
    }

    let mut value = value;
    for child in map.values_mut() {
        if let Value::Object(nested) = child {
            match place(key, value, nested) {
                Ok(()) => return Ok(()),
                Err(returned) => value = returned,
            }
        }
    }

    Err(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> ValueMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_lookup_from_bytes() {
        let map: ValueMap =
            serde_json::from_str(r#"{"type":"person","data":{"pname":"jamie","age":24}}"#)
                .unwrap();
        assert_eq!(lookup("pname", &map), Some(&json!("jamie")));
    }

    #[test]
    fn test_lookup_top_level_wins() {
        let map = as_map(json!({
            "pname": "top",
            "data": {"pname": "nested"}
        }));
        assert_eq!(lookup("pname", &map), Some(&json!("top")));
    }

    #[test]
    fn test_lookup_in_second_branch() {
        let map = as_map(json!({
            "type": "person",
            "data": {"gname": "gamie", "age": 32},
            "data2": {"pname": "jamie", "age": 24}
        }));
        assert_eq!(lookup("pname", &map), Some(&json!("jamie")));
    }

    #[test]
    fn test_lookup_not_found() {
        let map = as_map(json!({
            "type": "person",
            "data": {"gname": "gamie", "age": 32},
            "data2": {"hname": "jamie", "age": 24}
        }));
        assert_eq!(lookup("pname", &map), None);
    }

    #[test]
    fn test_lookup_distinguishes_null() {
        let map = as_map(json!({"data": {"token": null}}));
        assert_eq!(lookup("token", &map), Some(&Value::Null));
        assert_eq!(lookup("missing", &map), None);
    }

    #[test]
    fn test_lookup_skips_arrays() {
        let map = as_map(json!({"items": [{"pname": "jamie"}]}));
        assert_eq!(lookup("pname", &map), None);
    }

    #[test]
    fn test_assign_nested() {
        let mut map = as_map(json!({
            "type": "person",
            "data": {"gname": "gamie", "age": 32},
            "data2": {"pname": "name", "age": 24}
        }));

        assert!(assign("pname", json!("jamie"), &mut map));
        assert_eq!(lookup("pname", &map), Some(&json!("jamie")));
        assert_eq!(map["data2"]["age"], json!(24));
    }

    #[test]
    fn test_assign_overwrites_with_any_type() {
        let mut map = as_map(json!({"data": {"age": 24}}));
        assert!(assign("age", json!({"years": 25}), &mut map));
        assert_eq!(map["data"]["age"]["years"], json!(25));
    }

    #[test]
    fn test_assign_missing_key_leaves_map_unchanged() {
        let original = as_map(json!({"type": "person", "data": {"age": 24}}));
        let mut map = original.clone();

        assert!(!assign("pname", json!("jamie"), &mut map));
        assert_eq!(map, original);
    }
}
