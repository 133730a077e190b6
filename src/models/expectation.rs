//! Expectation models
//!
//! Predicates checked against HTTP responses and page state.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::step::Locator;

/// JSON value kind used by type expectations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Null,
}

impl JsonKind {
    /// Kind of a concrete JSON value. Integral numbers report `Integer`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => JsonKind::String,
            Value::Number(n) if n.is_i64() || n.is_u64() => JsonKind::Integer,
            Value::Number(_) => JsonKind::Number,
            Value::Bool(_) => JsonKind::Boolean,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
            Value::Null => JsonKind::Null,
        }
    }

    /// Whether `value` is of this kind. `Number` accepts integers too.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            JsonKind::Number => value.is_number(),
            kind => JsonKind::of(value) == *kind,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            JsonKind::String => "string",
            JsonKind::Integer => "integer",
            JsonKind::Number => "number",
            JsonKind::Boolean => "boolean",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
            JsonKind::Null => "null",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expectation over an HTTP response
#[derive(Clone, Debug, PartialEq)]
pub enum Expectation {
    /// Status code equals
    Status(u16),
    /// Status code is one of
    StatusIn(Vec<u16>),
    /// Value at JSON pointer equals literal
    JsonEquals { pointer: String, value: Value },
    /// Value at JSON pointer has kind
    JsonKind { pointer: String, kind: JsonKind },
    /// Value at JSON pointer has one of the kinds
    JsonKindAnyOf { pointer: String, kinds: Vec<JsonKind> },
    /// Object at JSON pointer has exactly these keys
    ExactKeys { pointer: String, keys: Vec<String> },
    /// Array at JSON pointer whose items all carry typed fields
    ArrayItems {
        pointer: String,
        fields: Vec<(String, JsonKind)>,
    },
    /// Value at JSON pointer is a non-empty string
    NonEmptyString { pointer: String },
    /// `error` or `message` field contains one of the keywords (case-insensitive)
    ErrorMessageContainsAny { keywords: Vec<String> },
    AllOf(Vec<Expectation>),
    AnyOf(Vec<Expectation>),
}

impl Expectation {
    pub fn status(code: u16) -> Self {
        Expectation::Status(code)
    }

    pub fn status_in(codes: &[u16]) -> Self {
        Expectation::StatusIn(codes.to_vec())
    }

    pub fn json_eq(pointer: impl Into<String>, value: impl Into<Value>) -> Self {
        Expectation::JsonEquals {
            pointer: pointer.into(),
            value: value.into(),
        }
    }

    pub fn kind(pointer: impl Into<String>, kind: JsonKind) -> Self {
        Expectation::JsonKind {
            pointer: pointer.into(),
            kind,
        }
    }

    pub fn kind_any_of(pointer: impl Into<String>, kinds: &[JsonKind]) -> Self {
        Expectation::JsonKindAnyOf {
            pointer: pointer.into(),
            kinds: kinds.to_vec(),
        }
    }

    pub fn exact_keys(pointer: impl Into<String>, keys: &[&str]) -> Self {
        Expectation::ExactKeys {
            pointer: pointer.into(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn array_items(pointer: impl Into<String>, fields: &[(&str, JsonKind)]) -> Self {
        Expectation::ArrayItems {
            pointer: pointer.into(),
            fields: fields
                .iter()
                .map(|(name, kind)| (name.to_string(), *kind))
                .collect(),
        }
    }

    pub fn non_empty_string(pointer: impl Into<String>) -> Self {
        Expectation::NonEmptyString {
            pointer: pointer.into(),
        }
    }

    pub fn error_message_contains_any(keywords: &[&str]) -> Self {
        Expectation::ErrorMessageContainsAny {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Status(code) => write!(f, "status == {code}"),
            Expectation::StatusIn(codes) => write!(f, "status in {codes:?}"),
            Expectation::JsonEquals { pointer, value } => write!(f, "{pointer} == {value}"),
            Expectation::JsonKind { pointer, kind } => write!(f, "{pointer} is {kind}"),
            Expectation::JsonKindAnyOf { pointer, kinds } => {
                let names: Vec<_> = kinds.iter().map(|k| k.name()).collect();
                write!(f, "{pointer} is {}", names.join(" | "))
            }
            Expectation::ExactKeys { pointer, keys } => {
                write!(f, "{pointer} has exactly keys [{}]", keys.join(", "))
            }
            Expectation::ArrayItems { pointer, fields } => {
                let fields: Vec<_> = fields.iter().map(|(n, k)| format!("{n}: {k}")).collect();
                write!(f, "{pointer}[*] has {{{}}}", fields.join(", "))
            }
            Expectation::NonEmptyString { pointer } => write!(f, "{pointer} is a non-empty string"),
            Expectation::ErrorMessageContainsAny { keywords } => {
                write!(f, "error message mentions one of {keywords:?}")
            }
            Expectation::AllOf(all) => {
                let parts: Vec<_> = all.iter().map(|e| e.to_string()).collect();
                write!(f, "({})", parts.join(" AND "))
            }
            Expectation::AnyOf(any) => {
                let parts: Vec<_> = any.iter().map(|e| e.to_string()).collect();
                write!(f, "({})", parts.join(" OR "))
            }
        }
    }
}

/// Expectation over the current page
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiExpectation {
    Visible(Locator),
    NotVisible(Locator),
    UrlContains(String),
    TextAbsent(String),
}

impl fmt::Display for UiExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiExpectation::Visible(locator) => write!(f, "{locator} is visible"),
            UiExpectation::NotVisible(locator) => write!(f, "{locator} is not visible"),
            UiExpectation::UrlContains(s) => write!(f, "url contains '{s}'"),
            UiExpectation::TextAbsent(s) => write!(f, "page has no text '{s}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_kind_of() {
        assert_eq!(JsonKind::of(&json!(5)), JsonKind::Integer);
        assert_eq!(JsonKind::of(&json!(5.5)), JsonKind::Number);
        assert_eq!(JsonKind::of(&json!("x")), JsonKind::String);
        assert_eq!(JsonKind::of(&json!(null)), JsonKind::Null);
    }

    #[test]
    fn test_number_accepts_integer() {
        assert!(JsonKind::Number.matches(&json!(3)));
        assert!(JsonKind::Number.matches(&json!(3.25)));
        assert!(!JsonKind::Integer.matches(&json!(3.25)));
        assert!(!JsonKind::Number.matches(&json!("3")));
    }

    #[test]
    fn test_expectation_display() {
        let e = Expectation::AnyOf(vec![
            Expectation::status_in(&[429, 403]),
            Expectation::json_eq("/success", true),
        ]);
        assert_eq!(e.to_string(), "(status in [429, 403] OR /success == true)");
    }
}
