use super::{ContactSubmission, FormError};
use crate::config::SiteConfig;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

/// Acknowledgment body returned by the form endpoint.
///
/// Only the HTTP status decides the outcome; the body is logged.
#[derive(Debug, Deserialize)]
struct FormAck {
    #[serde(default)]
    ok: Option<bool>,
    #[serde(default)]
    next: Option<String>,
}

/// The endpoint the contact form posts to: the form's own `action`
/// attribute, else the endpoint configured at build time. A blank `action`
/// counts as absent.
pub fn resolve_endpoint(action: Option<&str>, config: &SiteConfig) -> Option<String> {
    action
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .or_else(|| config.form_endpoint.clone())
}

/// Posts contact submissions to the third-party form endpoint.
#[derive(Debug, Clone)]
pub struct FormClient {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl FormClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: Some(endpoint.into()),
        }
    }

    /// Client for the page's contact form. Without any endpoint every send
    /// fails with a network error and no request is made.
    pub fn for_form(action: Option<&str>, config: &SiteConfig) -> Self {
        let endpoint = resolve_endpoint(action, config);
        if endpoint.is_none() {
            warn!("No form endpoint configured; contact form submissions will fail");
        }

        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Send one submission. A single attempt is made; there are no retries.
    ///
    /// # Returns
    /// * `Ok(())` if the endpoint answered with a success status
    /// * `Err(FormError::Network)` on transport failure, any other status, or
    ///   when no endpoint is configured
    pub async fn send(&self, submission: &ContactSubmission) -> Result<(), FormError> {
        let Some(endpoint) = &self.endpoint else {
            error!("Form submission skipped: no endpoint configured");
            return Err(FormError::Network("no form endpoint configured".to_string()));
        };

        let response = self
            .client
            .post(endpoint)
            .header(ACCEPT, "application/json")
            .form(&submission.pairs())
            .send()
            .await
            .map_err(|e| {
                error!("Form submission error: {}", e);
                FormError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Form endpoint error ({}): {}", status, body);
            return Err(FormError::Network(format!("status {}", status)));
        }

        match response.json::<FormAck>().await {
            Ok(ack) => debug!("Form acknowledged (ok: {:?}, next: {:?})", ack.ok, ack.next),
            Err(e) => debug!("Form acknowledgment was not JSON: {}", e),
        }

        info!("Contact form submitted");
        Ok(())
    }
}
