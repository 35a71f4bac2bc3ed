//! # Key 模块
//!
//! 文本框标识符。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 渲染树中元素 id 的前缀
pub const ELEMENT_ID_PREFIX: &str = "textBox_";

/// 文本框标识符
///
/// 调用方可以用字符串或整数标识文本框，内部统一存为字符串，
/// 因此 `1` 与 `"1"` 指向同一个文本框。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawKey", into = "String")]
pub struct OverlayKey(String);

impl OverlayKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 渲染树中对应元素的 id（`textBox_<key>`）
    pub fn element_id(&self) -> String {
        format!("{ELEMENT_ID_PREFIX}{}", self.0)
    }
}

impl fmt::Display for OverlayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OverlayKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for OverlayKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for OverlayKey {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<i64> for OverlayKey {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<i32> for OverlayKey {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

impl From<u32> for OverlayKey {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<&OverlayKey> for OverlayKey {
    fn from(value: &OverlayKey) -> Self {
        value.clone()
    }
}

impl From<OverlayKey> for String {
    fn from(value: OverlayKey) -> Self {
        value.0
    }
}

/// 反序列化时接受字符串或整数
#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Int(i64),
    Str(String),
}

impl From<RawKey> for OverlayKey {
    fn from(raw: RawKey) -> Self {
        match raw {
            RawKey::Int(n) => Self::from(n),
            RawKey::Str(s) => Self(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_and_string_keys_match() {
        assert_eq!(OverlayKey::from(7), OverlayKey::from("7"));
        assert_eq!(OverlayKey::from("hp").element_id(), "textBox_hp");
    }

    #[test]
    fn test_deserialize_either_form() {
        let a: OverlayKey = serde_json::from_str("3").unwrap();
        let b: OverlayKey = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"3\"");
    }
}
