//! API scenarios

use serde_json::json;

use crate::models::{Category, Expectation, HttpStep, JsonKind, Scenario};

const PHONE: &str = "+919876543210";
const CORRECT_OTP: &str = "123456";
const WRONG_OTPS: [&str; 3] = ["000000", "111111", "222222"];
const LOCKOUT_OTP: &str = "999999";

/// Order creation waits on the payment provider
const CHECKOUT_TIMEOUT_SECS: u64 = 60;

const WRONG_OTP_KEYWORDS: &[&str] = &["incorrect", "invalid", "otp"];
const LOCKOUT_KEYWORDS: &[&str] = &["locked", "lockout", "10 minutes"];

pub fn scenarios() -> Vec<Scenario> {
    vec![
        onboarding_sync(),
        otp_validation(),
        analytics_summary(),
        product_listing(),
        checkout(),
    ]
}

/// TC001: authenticated sync returns the user record
fn onboarding_sync() -> Scenario {
    Scenario::api(
        "TC001",
        "Onboarding sync returns the user",
        Category::Auth,
        vec![HttpStep::post("sync user", "/api/auth/sync")
            .json(json!({}))
            .test_secret()
            .expect(Expectation::json_eq("/success", true))
            .expect(Expectation::kind_any_of(
                "/user/id",
                &[JsonKind::String, JsonKind::Integer],
            ))],
    )
}

fn verify_phone(label: impl Into<String>, otp: &str) -> HttpStep {
    HttpStep::post(label, "/api/auth/verify-phone").json(json!({ "phone": PHONE, "otp": otp }))
}

/// TC002: correct OTP accepted, wrong OTPs rejected, then lockout
fn otp_validation() -> Scenario {
    let mut steps = vec![verify_phone("correct otp", CORRECT_OTP)
        .expect(Expectation::status(200))
        .expect(Expectation::json_eq("/success", true))];

    for (i, otp) in WRONG_OTPS.iter().enumerate() {
        steps.push(
            verify_phone(format!("wrong otp #{}", i + 1), otp)
                .expect(Expectation::status_in(&[400, 401, 422]))
                .expect(Expectation::error_message_contains_any(WRONG_OTP_KEYWORDS)),
        );
    }

    let lockout_message = Expectation::error_message_contains_any(LOCKOUT_KEYWORDS);
    steps.push(
        verify_phone("lockout after repeated failures", LOCKOUT_OTP).expect(Expectation::AnyOf(
            vec![
                Expectation::AllOf(vec![
                    Expectation::status_in(&[429, 403]),
                    lockout_message.clone(),
                ]),
                Expectation::AllOf(vec![Expectation::status(400), lockout_message]),
            ],
        )),
    );

    Scenario::api("TC002", "Phone OTP validation and lockout", Category::Auth, steps)
}

/// TC003: analytics summary has exactly the documented fields
fn analytics_summary() -> Scenario {
    Scenario::api(
        "TC003",
        "Creator analytics summary shape",
        Category::Analytics,
        vec![HttpStep::get("analytics summary", "/api/creator/analytics/summary")
            .test_secret()
            .expect(Expectation::status(200))
            .expect(Expectation::exact_keys(
                "/data",
                &[
                    "totalRevenue",
                    "totalSales",
                    "totalLeads",
                    "conversionRate",
                    "storeViews",
                    "period",
                ],
            ))
            .expect(Expectation::kind("/data/totalRevenue", JsonKind::Number))
            .expect(Expectation::kind("/data/totalSales", JsonKind::Integer))
            .expect(Expectation::kind("/data/totalLeads", JsonKind::Integer))
            .expect(Expectation::kind("/data/conversionRate", JsonKind::Number))
            .expect(Expectation::kind("/data/storeViews", JsonKind::Integer))
            .expect(Expectation::kind("/data/period", JsonKind::String))],
    )
}

/// TC004: every listed product carries id, name and published flag
fn product_listing() -> Scenario {
    Scenario::api(
        "TC004",
        "Product listing item shape",
        Category::Catalog,
        vec![HttpStep::get("list products", "/api/products")
            .test_secret()
            .expect(Expectation::status(200))
            .expect(Expectation::array_items(
                "/data",
                &[
                    ("id", JsonKind::String),
                    ("name", JsonKind::String),
                    ("published", JsonKind::Boolean),
                ],
            ))],
    )
}

/// TC005: an order for an existing product echoes amount and currency
fn checkout() -> Scenario {
    Scenario::api(
        "TC005",
        "Checkout creates an order",
        Category::Payments,
        vec![
            HttpStep::get("find a product", "/api/products")
                .test_secret()
                .expect(Expectation::status(200))
                .expect(Expectation::kind("/data/0/id", JsonKind::String))
                .capture("product_id", "/data/0/id"),
            HttpStep::post("create order", "/api/checkout")
                .test_secret()
                .timeout(CHECKOUT_TIMEOUT_SECS)
                .json(json!({
                    "productId": "{{product_id}}",
                    "amount": 100,
                    "currency": "INR"
                }))
                .expect(Expectation::json_eq("/data/amount", 100))
                .expect(Expectation::json_eq("/data/currency", "INR"))
                .expect(Expectation::non_empty_string("/data/id")),
        ],
    )
}
