//! Scenario variables
//!
//! Values captured from earlier responses, substituted into later steps
//! through `{{name}}` placeholders.

use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Placeholder that expands to a per-scenario random token
pub const UNIQUE: &str = "unique";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("undefined variable '{0}'")]
    Undefined(String),

    #[error("unterminated placeholder in '{0}'")]
    Unterminated(String),
}

/// Per-scenario variable map
#[derive(Clone, Debug)]
pub struct Variables {
    values: HashMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        let mut values = HashMap::new();
        let token = rand::random::<u32>() % 1_000_000;
        values.insert(UNIQUE.to_string(), format!("qa{token:06}"));
        Self { values }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Store a JSON value; strings are stored without quotes
    pub fn capture(&mut self, name: impl Into<String>, value: &Value) {
        let text = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        self.set(name, text);
    }

    /// Replace every `{{name}}` in the input
    pub fn render(&self, input: &str) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after
                .find("}}")
                .ok_or_else(|| TemplateError::Unterminated(input.to_string()))?;
            let name = after[..end].trim();
            let value = self
                .get(name)
                .ok_or_else(|| TemplateError::Undefined(name.to_string()))?;
            out.push_str(value);
            rest = &after[end + 2..];
        }

        out.push_str(rest);
        Ok(out)
    }

    /// Render every string inside a JSON value, keys untouched
    pub fn render_json(&self, value: &Value) -> Result<Value, TemplateError> {
        Ok(match value {
            Value::String(s) => Value::String(self.render(s)?),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.render_json(item))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), self.render_json(v)?)))
                    .collect::<Result<_, TemplateError>>()?,
            ),
            other => other.clone(),
        })
    }
}

impl Default for Variables {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_captured() {
        let mut vars = Variables::new();
        vars.set("product_id", "p_42");
        assert_eq!(
            vars.render("/api/products/{{product_id}}").unwrap(),
            "/api/products/p_42"
        );
        assert_eq!(vars.render("{{ product_id }}!").unwrap(), "p_42!");
    }

    #[test]
    fn test_render_without_placeholders() {
        let vars = Variables::new();
        assert_eq!(vars.render("/api/products").unwrap(), "/api/products");
    }

    #[test]
    fn test_render_errors() {
        let vars = Variables::new();
        assert_eq!(
            vars.render("{{missing}}"),
            Err(TemplateError::Undefined("missing".to_string()))
        );
        assert!(matches!(
            vars.render("/x/{{oops"),
            Err(TemplateError::Unterminated(_))
        ));
    }

    #[test]
    fn test_unique_is_stable_within_scenario() {
        let vars = Variables::new();
        let first = vars.render("user_{{unique}}").unwrap();
        let second = vars.render("user_{{unique}}").unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("user_qa"));
        assert_eq!(first.len(), "user_qa".len() + 6);
    }

    #[test]
    fn test_capture_and_render_json() {
        let mut vars = Variables::new();
        vars.capture("product_id", &json!("prod_1"));
        vars.capture("count", &json!(3));

        let body = json!({
            "productId": "{{product_id}}",
            "amount": 100,
            "tags": ["n={{count}}"]
        });
        let rendered = vars.render_json(&body).unwrap();
        assert_eq!(
            rendered,
            json!({"productId": "prod_1", "amount": 100, "tags": ["n=3"]})
        );
    }
}
