//! HTTP client for API scenarios
//!
//! Sends one request at a time against the app's base URL and captures the
//! status, headers and body of the response.

use anyhow::{Context, Result};
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Longest body excerpt carried in error messages
const BODY_EXCERPT_LEN: usize = 200;

/// HTTP client errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Response with status {status} is not valid JSON: {excerpt}")]
    InvalidJson { status: u16, excerpt: String },
}

/// HTTP client bound to one base URL
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl HttpClient {
    /// Create client with custom timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = base_url.into();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(HttpError::InvalidUrl(base_url).into());
        }

        Ok(Self {
            client,
            base_url,
            timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build full URL
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url.trim_end_matches('/'), path)
        } else {
            format!("{}/{}", self.base_url.trim_end_matches('/'), path)
        }
    }

    /// Send HTTP request
    pub async fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let url = self.build_url(&request.url);
        debug!("Sending {} request to {}", request.method, url);

        let method =
            Method::from_bytes(request.method.as_bytes()).context("Invalid HTTP method")?;

        let mut req_builder = self.client.request(method, &url);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let timeout_secs = request.timeout_secs.unwrap_or(self.timeout_secs);
        if request.timeout_secs.is_some() {
            req_builder = req_builder.timeout(Duration::from_secs(timeout_secs));
        }

        let start = std::time::Instant::now();

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                anyhow::anyhow!(HttpError::Timeout(timeout_secs))
            } else if e.is_connect() {
                anyhow::anyhow!(HttpError::ConnectionRefused(url.clone()))
            } else {
                anyhow::anyhow!(HttpError::RequestFailed(e.to_string()))
            }
        })?;

        let status = response.status();

        let mut response_headers = HashMap::new();
        for (key, value) in response.headers().iter() {
            if let Ok(v) = value.to_str() {
                response_headers.insert(key.to_string(), v.to_string());
            }
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                anyhow::anyhow!(HttpError::Timeout(timeout_secs))
            } else {
                anyhow::anyhow!(HttpError::RequestFailed(e.to_string()))
            }
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            duration_ms
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            headers: response_headers,
            body,
            duration_ms,
        })
    }

    /// Send a request whose response must carry a JSON body
    pub async fn send_json(&self, request: &HttpRequest) -> Result<(HttpResponse, Value)> {
        let response = self.send(request).await?;
        let json = response.parse_json()?;
        Ok((response, json))
    }

    /// Convenience method for GET request
    pub async fn get(&self, path: &str) -> Result<HttpResponse> {
        self.send(&HttpRequest::get(path)).await
    }
}

/// HTTP request builder
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
    pub timeout_secs: Option<u64>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout_secs: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// HTTP response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub duration_ms: u64,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Parse the body as JSON
    pub fn parse_json(&self) -> Result<Value, HttpError> {
        serde_json::from_str(&self.body).map_err(|_| HttpError::InvalidJson {
            status: self.status_code,
            excerpt: self.body_excerpt(),
        })
    }

    /// Leading part of the body, cut on a char boundary
    pub fn body_excerpt(&self) -> String {
        let trimmed = self.body.trim();
        match trimmed.char_indices().nth(BODY_EXCERPT_LEN) {
            Some((idx, _)) => format!("{}…", &trimmed[..idx]),
            None => trimmed.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status_code: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status_code,
            headers: HashMap::new(),
            body: body.to_string(),
            duration_ms: 12,
        }
    }

    #[test]
    fn test_http_request_builder() {
        let req = HttpRequest::new("POST", "/api/checkout")
            .header("X-Test-Secret", "secret")
            .json(serde_json::json!({"amount": 100}))
            .timeout(5);

        assert_eq!(req.method, "POST");
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.timeout_secs, Some(5));
    }

    #[test]
    fn test_build_url() {
        let client = HttpClient::with_timeout("http://localhost:3000/", 30).unwrap();
        assert_eq!(
            client.build_url("/api/products"),
            "http://localhost:3000/api/products"
        );
        assert_eq!(client.build_url("signup"), "http://localhost:3000/signup");
        assert_eq!(
            client.build_url("https://example.com/x"),
            "https://example.com/x"
        );
    }

    #[test]
    fn test_rejects_base_url_without_scheme() {
        assert!(HttpClient::with_timeout("localhost:3000", 30).is_err());
    }

    #[test]
    fn test_parse_json() {
        let ok = response(200, r#"{"success": true}"#);
        assert_eq!(ok.parse_json().unwrap()["success"], true);

        let html = response(500, "<html>Internal Server Error</html>");
        match html.parse_json() {
            Err(HttpError::InvalidJson { status, excerpt }) => {
                assert_eq!(status, 500);
                assert!(excerpt.contains("Internal Server Error"));
            }
            other => panic!("Expected InvalidJson, got {other:?}"),
        }
    }

    #[test]
    fn test_body_excerpt_truncates() {
        let long = "é".repeat(BODY_EXCERPT_LEN + 50);
        let excerpt = response(200, &long).body_excerpt();
        assert_eq!(excerpt.chars().count(), BODY_EXCERPT_LEN + 1);
        assert!(excerpt.ends_with('…'));
    }
}
