//! Assertion checks
//!
//! Compares captured values (status codes, JSON fields, page state) against
//! expectations. A mismatch is an [`AssertionFailure`] naming what was
//! expected and what was observed.

mod http;
mod json;

pub use http::check_all;
pub use json::resolve;

use thiserror::Error;

/// A failed expectation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected {expected}, {actual}")]
pub struct AssertionFailure {
    pub expected: String,
    pub actual: String,
}

impl AssertionFailure {
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Check that the page URL contains a substring
pub fn check_url_contains(url: &str, needle: &str) -> Result<(), AssertionFailure> {
    if url.contains(needle) {
        Ok(())
    } else {
        Err(AssertionFailure::new(
            format!("url contains '{needle}'"),
            format!("url is {url}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_url_contains() {
        assert!(check_url_contains("http://localhost:3000/signup?step=1", "/signup").is_ok());

        let failure = check_url_contains("http://localhost:3000/verify", "/signup").unwrap_err();
        assert_eq!(
            failure.to_string(),
            "expected url contains '/signup', url is http://localhost:3000/verify"
        );
    }
}
