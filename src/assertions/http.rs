//! Checks of HTTP expectations against a captured response

use serde_json::Value;
use std::collections::BTreeSet;

use super::json::{describe, error_message, resolve};
use super::AssertionFailure;
use crate::models::{Expectation, JsonKind};

/// Check one expectation against a status code and parsed JSON body
pub fn check_response(
    status: u16,
    body: &Value,
    expectation: &Expectation,
) -> Result<(), AssertionFailure> {
    let fail = |actual: String| Err(AssertionFailure::new(expectation.to_string(), actual));

    match expectation {
        Expectation::Status(code) => {
            if status == *code {
                Ok(())
            } else {
                fail(format!("got status {status}"))
            }
        }
        Expectation::StatusIn(codes) => {
            if codes.contains(&status) {
                Ok(())
            } else {
                fail(format!("got status {status}"))
            }
        }
        Expectation::JsonEquals { pointer, value } => match resolve(body, pointer) {
            Some(actual) if actual == value => Ok(()),
            Some(actual) => fail(format!("got {}", describe(actual))),
            None => fail(format!("{pointer} is missing")),
        },
        Expectation::JsonKind { pointer, kind } => match resolve(body, pointer) {
            Some(actual) if kind.matches(actual) => Ok(()),
            Some(actual) => fail(format!("got {} {}", JsonKind::of(actual), describe(actual))),
            None => fail(format!("{pointer} is missing")),
        },
        Expectation::JsonKindAnyOf { pointer, kinds } => match resolve(body, pointer) {
            Some(actual) if kinds.iter().any(|k| k.matches(actual)) => Ok(()),
            Some(actual) => fail(format!("got {} {}", JsonKind::of(actual), describe(actual))),
            None => fail(format!("{pointer} is missing")),
        },
        Expectation::ExactKeys { pointer, keys } => match resolve(body, pointer) {
            Some(Value::Object(map)) => {
                let expected: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
                let actual: BTreeSet<&str> = map.keys().map(String::as_str).collect();
                let missing: Vec<_> = expected.difference(&actual).copied().collect();
                let extra: Vec<_> = actual.difference(&expected).copied().collect();
                if missing.is_empty() && extra.is_empty() {
                    Ok(())
                } else {
                    fail(format!("missing {missing:?}, unexpected {extra:?}"))
                }
            }
            Some(actual) => fail(format!("got {} instead of object", JsonKind::of(actual))),
            None => fail(format!("{pointer} is missing")),
        },
        Expectation::ArrayItems { pointer, fields } => match resolve(body, pointer) {
            Some(Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    for (field, kind) in fields {
                        match item.get(field) {
                            Some(value) if kind.matches(value) => {}
                            Some(value) => {
                                return fail(format!(
                                    "item {index}: '{field}' is {} {}",
                                    JsonKind::of(value),
                                    describe(value)
                                ))
                            }
                            None => return fail(format!("item {index}: '{field}' is missing")),
                        }
                    }
                }
                Ok(())
            }
            Some(actual) => fail(format!("got {} instead of array", JsonKind::of(actual))),
            None => fail(format!("{pointer} is missing")),
        },
        Expectation::NonEmptyString { pointer } => match resolve(body, pointer) {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(()),
            Some(actual) => fail(format!("got {}", describe(actual))),
            None => fail(format!("{pointer} is missing")),
        },
        Expectation::ErrorMessageContainsAny { keywords } => match error_message(body) {
            Some(message) => {
                let lowered = message.to_lowercase();
                if keywords.iter().any(|k| lowered.contains(&k.to_lowercase())) {
                    Ok(())
                } else {
                    fail(format!("got message '{message}'"))
                }
            }
            None => fail("no 'error' or 'message' string in body".to_string()),
        },
        Expectation::AllOf(all) => all
            .iter()
            .try_for_each(|inner| check_response(status, body, inner)),
        Expectation::AnyOf(any) => {
            let mut reasons = Vec::new();
            for inner in any {
                match check_response(status, body, inner) {
                    Ok(()) => return Ok(()),
                    Err(failure) => reasons.push(failure.actual),
                }
            }
            fail(reasons.join("; "))
        }
    }
}

/// Check expectations in order, stopping at the first failure
pub fn check_all(
    status: u16,
    body: &Value,
    expectations: &[Expectation],
) -> Result<(), AssertionFailure> {
    expectations
        .iter()
        .try_for_each(|expectation| check_response(status, body, expectation))
}
