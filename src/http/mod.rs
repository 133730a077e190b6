//! HTTP client module for API scenarios
//!
//! Provides HTTP client functionality for exercising the app's JSON API.

mod client;

pub use client::{HttpClient, HttpRequest};
