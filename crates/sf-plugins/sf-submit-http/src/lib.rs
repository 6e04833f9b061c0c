//! # sf-submit-http
//!
//! `SubmissionClient` that POSTs applications as JSON to the sponsors API.
//! Any non-2xx status counts as a rejection.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use sf_core::models::SubmissionPayload;
use sf_core::traits::SubmissionClient;

pub struct HttpSubmissionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmissionClient {
    /// `timeout` of `None` keeps reqwest's default (no overall timeout).
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            client: builder.build().context("building HTTP client")?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn submit(&self, payload: &SubmissionPayload) -> anyhow::Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("POST {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("{} answered {status}: {}", self.endpoint, body.trim());
        }
        tracing::debug!(endpoint = %self.endpoint, %status, "application delivered");
        Ok(())
    }
}
