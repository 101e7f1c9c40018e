//! JSON utilities
//!
//! Functions for JSON parsing used by body sniffing and response decoding.

use serde_json::Value as JsonValue;

/// Load JSON while preserving key order
///
/// Uses serde_json with preserve_order feature.
pub fn load_json_preserve_order(s: &str) -> Result<JsonValue, String> {
    serde_json::from_str(s).map_err(|e| format!("JSON parse error: {}", e))
}

/// Check whether a string is a complete JSON document
pub fn is_json(s: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_json() {
        let result = load_json_preserve_order(r#"{"b": 1, "a": 2}"#).unwrap();
        let keys: Vec<_> = result.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_load_invalid_json() {
        let result = load_json_preserve_order("not json");
        assert!(result.is_err());
    }

    #[test]
    fn test_is_json() {
        assert!(is_json("[1, 2]"));
        assert!(is_json("\"text\""));
        assert!(is_json("42"));
        assert!(!is_json("x=1"));
        assert!(!is_json("{\"a\": }"));
    }
}
