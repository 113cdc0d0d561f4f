use std::collections::BTreeMap;

/// 查询参数名到值的映射，按 key 排序输出
pub type QueryMap = BTreeMap<String, String>;

/// 在查询字符串中不合法、需要转义的字符
const QUERY_CHARS_INVALID: [char; 13] = [
    '%', '"', ' ', '\\', '^', '`', '{', '|', '}', '#', '~', '&', '=',
];

/// 只转义黑名单中的字符，其余字符原样保留
pub fn encode_query_component(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len());
    for c in s.chars() {
        if QUERY_CHARS_INVALID.contains(&c) {
            encoded.push_str(&format!("%{:X}", c as u32));
        } else {
            encoded.push(c);
        }
    }
    encoded
}

/// 由路由和参数表拼出带查询字符串的路由
///
/// 参数表为空时原样返回路由
pub fn assemble_query(route: &str, query: &QueryMap) -> String {
    if query.is_empty() {
        return route.to_string();
    }

    let mut assembled = route.to_string();
    if !assembled.ends_with('?') {
        assembled.push('?');
    }

    let pairs: Vec<String> = query
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                encode_query_component(k),
                encode_query_component(v)
            )
        })
        .collect();
    assembled.push_str(&pairs.join("&"));

    assembled
}

/// 拼接基础 URL 和路由，两者之间保证只有一个 `/`
pub fn join_route(base: &str, route: &str) -> String {
    let route = route.trim_start_matches('/');
    if route.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), route)
}
