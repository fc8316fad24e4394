/// 未注明类型的 id 默认视为演员
pub const DEFAULT_PERSON_KIND: &str = "people";

const PERSON_KINDS: [&str; 2] = ["character", "people"];

/// 规范化人物 id
///
/// 已带冒号的 id 原样返回；`character/x`、`people/x` 改写为 `kind:x`；
/// 其余视为裸 id，补上 `default_kind`。
pub fn normalize_person_id(id: &str, default_kind: &str) -> String {
    if id.is_empty() || id.contains(':') {
        return id.to_string();
    }

    for kind in PERSON_KINDS {
        if let Some(rest) = id.strip_prefix(kind).and_then(|r| r.strip_prefix('/')) {
            return format!("{}:{}", kind, rest);
        }
    }

    format!("{}:{}", default_kind, id)
}
