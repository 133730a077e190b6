//! In-process stand-in for the app under test

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const CORRECT_OTP: &str = "123456";
const MAX_WRONG_OTP: u32 = 3;

/// How long `/api/slow` takes to answer
pub const SLOW_RESPONSE: Duration = Duration::from_secs(2);

#[derive(Clone, Default)]
struct AppState {
    wrong_otps: Arc<Mutex<u32>>,
}

/// Mock app bound to an ephemeral port, stopped on drop
pub struct MockApp {
    base_url: String,
    server: JoinHandle<()>,
}

impl MockApp {
    pub const SECRET: &'static str = "mock-secret";

    pub async fn start() -> Self {
        let app = Router::new()
            .route("/", get(home))
            .route("/api/auth/sync", post(sync))
            .route("/api/auth/verify-phone", post(verify_phone))
            .route("/api/creator/analytics/summary", get(analytics))
            .route("/api/products", get(products))
            .route("/api/checkout", post(checkout))
            .route("/api/slow", get(slow))
            .with_state(AppState::default());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            server,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Drop for MockApp {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

async fn home() -> Html<&'static str> {
    Html("<html><body><h1>Creator storefronts</h1></body></html>")
}

async fn sync(headers: HeaderMap) -> Response {
    let authorized = headers
        .get("x-test-secret")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == MockApp::SECRET)
        .unwrap_or(false);

    if !authorized {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    Json(json!({
        "success": true,
        "data": { "user": { "id": "user_2b9", "onboarded": true } }
    }))
    .into_response()
}

async fn verify_phone(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let otp = body["otp"].as_str().unwrap_or_default();
    let mut wrong = state.wrong_otps.lock().unwrap();

    if *wrong >= MAX_WRONG_OTP {
        *wrong += 1;
        return error(
            StatusCode::TOO_MANY_REQUESTS,
            "Too many attempts. Verification is locked for 10 minutes",
        );
    }

    if otp == CORRECT_OTP {
        return Json(json!({ "success": true, "data": { "verified": true } })).into_response();
    }

    *wrong += 1;
    error(StatusCode::BAD_REQUEST, "Incorrect OTP, please try again")
}

async fn analytics() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "totalRevenue": 1250.5,
            "totalSales": 12,
            "totalLeads": 40,
            "conversionRate": 0.3,
            "storeViews": 410,
            "period": "30d"
        }
    }))
}

async fn products() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [
            { "id": "prod_1", "name": "Creator Guide", "published": true, "price": 100 },
            { "id": "prod_2", "name": "Preset Pack", "published": false, "price": 250 }
        ]
    }))
}

async fn checkout(Json(body): Json<Value>) -> Response {
    let Some(product_id) = body["productId"].as_str() else {
        return error(StatusCode::BAD_REQUEST, "productId is required");
    };

    Json(json!({
        "success": true,
        "data": {
            "id": "order_7f1",
            "productId": product_id,
            "amount": body["amount"],
            "currency": body["currency"],
            "status": "created"
        }
    }))
    .into_response()
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(SLOW_RESPONSE).await;
    Json(json!({ "success": true, "data": {} }))
}
