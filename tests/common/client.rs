//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per dashboard endpoint.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    pub async fn get_stats(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Stats request failed")
    }

    pub async fn get_options(&self) -> Response {
        self.client
            .get(format!("{}/v1/dashboard/options", self.base_url))
            .send()
            .await
            .expect("Options request failed")
    }

    /// The default controls advertised by the options endpoint.
    pub async fn default_controls(&self) -> Value {
        let options: Value = self
            .get_options()
            .await
            .json()
            .await
            .expect("Options response is not JSON");
        options["defaults"].clone()
    }

    pub async fn render(&self, controls: &Value) -> Response {
        self.client
            .post(format!("{}/v1/dashboard/render", self.base_url))
            .json(controls)
            .send()
            .await
            .expect("Render request failed")
    }

    pub async fn send_event(&self, controls: &Value, event: Value) -> Response {
        self.client
            .post(format!("{}/v1/dashboard/event", self.base_url))
            .json(&json!({ "controls": controls, "event": event }))
            .send()
            .await
            .expect("Event request failed")
    }
}

/// Picks the value of one output out of an event response.
pub fn output_value<'a>(update: &'a Value, output: &str) -> Option<&'a Value> {
    update["values"]
        .as_array()?
        .iter()
        .find(|v| v["output"] == output)
        .map(|v| &v["value"])
}
