//! Shared fixtures for the HTTP-level tests in `tests/`.

use std::sync::Arc;

use actix_web::web;
use sf_api::AppState;
use sf_core::{KeyValueStore, MemoryKeyValueStore, MockSubmissionClient, SponsorStore, SubmissionClient};

/// Required fields filled in for a Platinum application.
pub fn platinum_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("companyName", "Acme Holdings"),
        ("firstName", "Nimal"),
        ("lastName", "Perera"),
        ("email", "nimal@acme.lk"),
        ("countryCode", "+94"),
        ("contactNumber", "712345678"),
        ("level", "Platinum"),
    ]
}

/// The same application as JSON for `/api/applications`.
pub fn platinum_json() -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = platinum_form()
        .into_iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::from(v)))
        .collect();
    serde_json::Value::Object(map)
}

/// A submitter that accepts exactly `times` applications.
pub fn accepting_client(times: usize) -> MockSubmissionClient {
    let mut client = MockSubmissionClient::new();
    client.expect_submit().times(times).returning(|_| Ok(()));
    client
}

/// A submitter whose endpoint is always down.
pub fn failing_client() -> MockSubmissionClient {
    let mut client = MockSubmissionClient::new();
    client
        .expect_submit()
        .returning(|_| Err(anyhow::anyhow!("connection refused")));
    client
}

/// App state over a fresh in-memory slot.
pub fn memory_state(client: impl SubmissionClient + 'static) -> web::Data<AppState> {
    state_over(Arc::new(MemoryKeyValueStore::new()), client)
}

pub fn state_over(
    backend: Arc<dyn KeyValueStore>,
    client: impl SubmissionClient + 'static,
) -> web::Data<AppState> {
    web::Data::new(AppState::new(SponsorStore::new(backend), Arc::new(client)))
}
