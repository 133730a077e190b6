//! JSON lookups used by response checks

use serde_json::Value;

/// Resolve a JSON pointer against a response body.
///
/// Looks at the body root first, then inside the `data` field of a
/// `{success, data}` envelope.
pub fn resolve<'a>(body: &'a Value, pointer: &str) -> Option<&'a Value> {
    body.pointer(pointer)
        .or_else(|| body.get("data").and_then(|data| data.pointer(pointer)))
}

/// The `error` or `message` string of a failure envelope; empty strings
/// fall through
pub fn error_message(body: &Value) -> Option<&str> {
    ["error", "message"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .find(|message| !message.is_empty())
}

/// Short rendering of a value for failure messages
pub fn describe(value: &Value) -> String {
    let rendered = value.to_string();
    if rendered.chars().count() > 80 {
        let cut: String = rendered.chars().take(80).collect();
        format!("{cut}…")
    } else {
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_root_first() {
        let body = json!({"success": true, "data": {"success": false}});
        assert_eq!(resolve(&body, "/success"), Some(&json!(true)));
    }

    #[test]
    fn test_resolve_unwraps_envelope() {
        let body = json!({"success": true, "data": {"user": {"id": 42}}});
        assert_eq!(resolve(&body, "/user/id"), Some(&json!(42)));
        assert_eq!(resolve(&body, "/data/user/id"), Some(&json!(42)));
        assert_eq!(resolve(&body, "/user/name"), None);
    }

    #[test]
    fn test_error_message_prefers_error() {
        let body = json!({"error": "Invalid OTP", "message": "other"});
        assert_eq!(error_message(&body), Some("Invalid OTP"));

        let body = json!({"message": "OTP incorrect"});
        assert_eq!(error_message(&body), Some("OTP incorrect"));

        assert_eq!(error_message(&json!({"error": 3})), None);
    }

    #[test]
    fn test_error_message_empty_error_falls_back() {
        let body = json!({"error": "", "message": "Invalid OTP"});
        assert_eq!(error_message(&body), Some("Invalid OTP"));

        assert_eq!(error_message(&json!({"error": "", "message": ""})), None);
    }

    #[test]
    fn test_describe_truncates() {
        let long = json!("x".repeat(200));
        assert!(describe(&long).ends_with('…'));
        assert_eq!(describe(&json!(100)), "100");
    }
}
