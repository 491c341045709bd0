//! Client for the external HTML-to-PDF rendering service.
//!
//! The gateway converts HTML markup to PDF bytes; this process never
//! renders HTML itself. Every call carries a fixed page configuration
//! (A4, 1 cm margins) and the API credential in an `x-api-key` header.

use std::time::Duration;

use serde_json::json;
use tracing::debug;

use crate::error::ServerError;

/// Cap on how much of an upstream error body is carried into diagnostics.
const BODY_SNIPPET_MAX: usize = 512;

#[derive(Clone)]
pub struct RenderClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RenderClient {
    /// Build a client with a bounded request timeout.
    ///
    /// A gateway that never answers must fail the request rather than
    /// hang it, so the timeout applies to the whole call.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Render `html` into PDF bytes via the gateway.
    pub async fn render(&self, html: &str) -> Result<Vec<u8>, ServerError> {
        let api_key = self.api_key.as_deref().ok_or(ServerError::MissingCredential)?;

        let body = json!({
            "html": html,
            "options": {
                "format": "A4",
                "margin": {
                    "top": "1cm",
                    "bottom": "1cm",
                    "left": "1cm",
                    "right": "1cm",
                },
            },
        });

        debug!(bytes = html.len(), "requesting render");

        let response = self
            .http
            .post(format!("{}/generate", self.base_url))
            .header("x-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServerError::Rendering {
                status: None,
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServerError::Rendering {
                status: Some(status.as_u16()),
                detail: snippet(&body),
            });
        }

        let bytes = response.bytes().await.map_err(|e| ServerError::Rendering {
            status: Some(status.as_u16()),
            detail: format!("unreadable response body: {e}"),
        })?;

        debug!(bytes = bytes.len(), "render complete");
        Ok(bytes.to_vec())
    }
}

/// Truncate an upstream body for error details.
fn snippet(body: &str) -> String {
    if body.chars().count() <= BODY_SNIPPET_MAX {
        body.to_string()
    } else {
        let truncated: String = body.chars().take(BODY_SNIPPET_MAX).collect();
        format!("{truncated}...")
    }
}
