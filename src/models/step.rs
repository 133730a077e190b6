//! Scenario step models
//!
//! HTTP steps and UI steps, with the locators UI steps act on.

use serde_json::Value;
use std::fmt;

use super::expectation::{Expectation, UiExpectation};

/// Element locator
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Locator {
    Css(String),
    XPath(String),
    /// First element whose text contains the string
    Text(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(path: impl Into<String>) -> Self {
        Locator::XPath(path.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Locator::Text(text.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css={s}"),
            Locator::XPath(s) => write!(f, "xpath={s}"),
            Locator::Text(s) => write!(f, "text={s}"),
        }
    }
}

/// Named value extracted from a JSON response body
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capture {
    pub name: String,
    pub pointer: String,
}

/// One HTTP request plus the expectations on its response
#[derive(Clone, Debug)]
pub struct HttpStep {
    pub label: String,
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub with_test_secret: bool,
    pub timeout_secs: Option<u64>,
    pub expectations: Vec<Expectation>,
    pub captures: Vec<Capture>,
}

impl HttpStep {
    pub fn new(label: impl Into<String>, method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            method: method.into(),
            path: path.into(),
            headers: Vec::new(),
            body: None,
            with_test_secret: false,
            timeout_secs: None,
            expectations: Vec::new(),
            captures: Vec::new(),
        }
        .header("Content-Type", "application/json")
    }

    pub fn get(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(label, "GET", path)
    }

    pub fn post(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(label, "POST", path)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach the shared `X-Test-Secret` credential
    pub fn test_secret(mut self) -> Self {
        self.with_test_secret = true;
        self
    }

    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn expect(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    pub fn capture(mut self, name: impl Into<String>, pointer: impl Into<String>) -> Self {
        self.captures.push(Capture {
            name: name.into(),
            pointer: pointer.into(),
        });
        self
    }
}

impl fmt::Display for HttpStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.label, self.method, self.path)
    }
}

/// One browser action or page check
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiStep {
    /// Navigate to a path on the base URL
    Goto(String),
    Fill(Locator, String),
    Click(Locator),
    /// Click when the element shows up in time, otherwise carry on
    ClickIfPresent(Locator),
    /// Fixed pause in milliseconds
    Wait(u64),
    Expect(UiExpectation),
}

impl UiStep {
    pub fn goto(path: impl Into<String>) -> Self {
        UiStep::Goto(path.into())
    }

    pub fn fill(locator: Locator, value: impl Into<String>) -> Self {
        UiStep::Fill(locator, value.into())
    }

    pub fn click(locator: Locator) -> Self {
        UiStep::Click(locator)
    }

    pub fn click_if_present(locator: Locator) -> Self {
        UiStep::ClickIfPresent(locator)
    }

    pub fn wait(ms: u64) -> Self {
        UiStep::Wait(ms)
    }

    pub fn expect_visible(locator: Locator) -> Self {
        UiStep::Expect(UiExpectation::Visible(locator))
    }

    pub fn expect_not_visible(locator: Locator) -> Self {
        UiStep::Expect(UiExpectation::NotVisible(locator))
    }

    pub fn expect_url_contains(s: impl Into<String>) -> Self {
        UiStep::Expect(UiExpectation::UrlContains(s.into()))
    }

    pub fn expect_text_absent(s: impl Into<String>) -> Self {
        UiStep::Expect(UiExpectation::TextAbsent(s.into()))
    }
}

impl fmt::Display for UiStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiStep::Goto(path) => write!(f, "goto {path}"),
            UiStep::Fill(locator, value) => write!(f, "fill {locator} with '{value}'"),
            UiStep::Click(locator) => write!(f, "click {locator}"),
            UiStep::ClickIfPresent(locator) => write!(f, "click {locator} if present"),
            UiStep::Wait(ms) => write!(f, "wait {ms}ms"),
            UiStep::Expect(expectation) => write!(f, "expect {expectation}"),
        }
    }
}
