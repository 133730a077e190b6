//! HTTP scenario runner

use serde_json::json;
use tracing::debug;

use super::vars::Variables;
use super::{StepError, StepFailure, StepsOutcome};
use crate::assertions::{self, AssertionFailure};
use crate::http::{HttpClient, HttpRequest};
use crate::models::HttpStep;

/// Header carrying the shared test credential
pub const TEST_SECRET_HEADER: &str = "X-Test-Secret";

/// Runs the HTTP steps of one scenario in order
pub struct HttpScenarioRunner<'a> {
    client: &'a HttpClient,
    test_secret: &'a str,
}

impl<'a> HttpScenarioRunner<'a> {
    pub fn new(client: &'a HttpClient, test_secret: &'a str) -> Self {
        Self {
            client,
            test_secret,
        }
    }

    /// Run every step with a fresh variable map
    pub async fn run(&self, steps: &[HttpStep]) -> StepsOutcome {
        let mut vars = Variables::new();
        for (index, step) in steps.iter().enumerate() {
            self.run_step(step, &mut vars)
                .await
                .map_err(|(error, details)| {
                    let failure = StepFailure::new(index, step, error);
                    match details {
                        Some(details) => failure.with_details(details),
                        None => failure,
                    }
                })?;
        }
        Ok(steps.len())
    }

    async fn run_step(
        &self,
        step: &HttpStep,
        vars: &mut Variables,
    ) -> Result<(), (StepError, Option<serde_json::Value>)> {
        let request = self.build_request(step, vars).map_err(|e| (e, None))?;

        debug!("{} {} {}", step.label, request.method, request.url);

        let (response, body) = self
            .client
            .send_json(&request)
            .await
            .map_err(|e| (StepError::Http(e), None))?;

        let details = || {
            json!({
                "request": format!("{} {}", request.method, request.url),
                "status": response.status_code,
                "body": body,
            })
        };

        assertions::check_all(response.status_code, &body, &step.expectations)
            .map_err(|e| (StepError::Assertion(e), Some(details())))?;

        for capture in &step.captures {
            let value = assertions::resolve(&body, &capture.pointer).ok_or_else(|| {
                let failure = AssertionFailure::new(
                    format!("{} to capture '{}'", capture.pointer, capture.name),
                    format!("{} is missing", capture.pointer),
                );
                (StepError::Assertion(failure), Some(details()))
            })?;
            debug!("Captured {} = {}", capture.name, value);
            vars.capture(capture.name.clone(), value);
        }

        Ok(())
    }

    fn build_request(&self, step: &HttpStep, vars: &Variables) -> Result<HttpRequest, StepError> {
        let mut request = HttpRequest::new(step.method.clone(), vars.render(&step.path)?);

        for (key, value) in &step.headers {
            request = request.header(key.clone(), vars.render(value)?);
        }
        if step.with_test_secret {
            request = request.header(TEST_SECRET_HEADER, self.test_secret);
        }
        if let Some(body) = &step.body {
            request = request.json(vars.render_json(body)?);
        }
        if let Some(secs) = step.timeout_secs {
            request = request.timeout(secs);
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::testing::MockApp;
    use crate::models::{Expectation, JsonKind};
    use serde_json::json;

    #[tokio::test]
    async fn test_secret_header_is_sent() {
        let app = MockApp::start().await;
        let client = HttpClient::with_timeout(app.base_url(), 5).unwrap();
        let runner = HttpScenarioRunner::new(&client, MockApp::SECRET);

        let steps = vec![HttpStep::post("sync", "/api/auth/sync")
            .json(json!({}))
            .test_secret()
            .expect(Expectation::status(200))
            .expect(Expectation::kind("/user/id", JsonKind::String))];

        assert_eq!(runner.run(&steps).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_wrong_secret_fails_with_details() {
        let app = MockApp::start().await;
        let client = HttpClient::with_timeout(app.base_url(), 5).unwrap();
        let runner = HttpScenarioRunner::new(&client, "wrong");

        let steps = vec![HttpStep::post("sync", "/api/auth/sync")
            .json(json!({}))
            .test_secret()
            .expect(Expectation::status(200))];

        let failure = runner.run(&steps).await.unwrap_err();
        assert!(failure.is_assertion());
        assert_eq!(failure.index, 0);
        assert_eq!(failure.details.unwrap()["status"], 401);
    }

    #[tokio::test]
    async fn test_capture_feeds_later_step() {
        let app = MockApp::start().await;
        let client = HttpClient::with_timeout(app.base_url(), 5).unwrap();
        let runner = HttpScenarioRunner::new(&client, MockApp::SECRET);

        let steps = vec![
            HttpStep::get("list products", "/api/products").capture("product_id", "/data/0/id"),
            HttpStep::post("checkout", "/api/checkout")
                .json(json!({"productId": "{{product_id}}", "amount": 100, "currency": "INR"}))
                .expect(Expectation::json_eq("/productId", "prod_1")),
        ];

        assert_eq!(runner.run(&steps).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_stops_at_first_failing_step() {
        let app = MockApp::start().await;
        let client = HttpClient::with_timeout(app.base_url(), 5).unwrap();
        let runner = HttpScenarioRunner::new(&client, MockApp::SECRET);

        let steps = vec![
            HttpStep::get("products", "/api/products").expect(Expectation::status(201)),
            HttpStep::post("checkout", "/api/checkout").json(json!({"productId": "{{never}}"})),
        ];

        let failure = runner.run(&steps).await.unwrap_err();
        assert_eq!(failure.index, 0);
        assert!(failure.to_string().contains("got status 200"));
    }

    #[tokio::test]
    async fn test_undefined_variable_is_error() {
        let app = MockApp::start().await;
        let client = HttpClient::with_timeout(app.base_url(), 5).unwrap();
        let runner = HttpScenarioRunner::new(&client, MockApp::SECRET);

        let steps = vec![HttpStep::post("checkout", "/api/checkout")
            .json(json!({"productId": "{{product_id}}"}))];

        let failure = runner.run(&steps).await.unwrap_err();
        assert!(matches!(failure.error, StepError::Template(_)));
    }

    #[tokio::test]
    async fn test_non_json_body_is_error() {
        let app = MockApp::start().await;
        let client = HttpClient::with_timeout(app.base_url(), 5).unwrap();
        let runner = HttpScenarioRunner::new(&client, MockApp::SECRET);

        let steps = vec![HttpStep::get("home page", "/")];

        let failure = runner.run(&steps).await.unwrap_err();
        assert!(!failure.is_assertion());
        assert!(failure.to_string().contains("not valid JSON"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        let client = HttpClient::with_timeout("http://127.0.0.1:1", 2).unwrap();
        let runner = HttpScenarioRunner::new(&client, MockApp::SECRET);

        let steps = vec![HttpStep::get("products", "/api/products")];

        let failure = runner.run(&steps).await.unwrap_err();
        assert!(matches!(failure.error, StepError::Http(_)));
    }

    #[tokio::test]
    async fn test_step_timeout_overrides_client() {
        let app = MockApp::start().await;
        let client = HttpClient::with_timeout(app.base_url(), 30).unwrap();
        let runner = HttpScenarioRunner::new(&client, MockApp::SECRET);

        let steps = vec![HttpStep::get("slow endpoint", "/api/slow")
            .timeout(1)
            .expect(Expectation::status(200))];

        let failure = runner.run(&steps).await.unwrap_err();
        assert!(matches!(failure.error, StepError::Http(_)));
        assert!(failure.to_string().contains("Timeout after 1 seconds"));
    }
}
