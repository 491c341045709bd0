//! Application state for the signfield API.

use std::time::Duration;

use anyhow::Result;

use crate::render::RenderClient;

/// Default base URL of the HTML-to-PDF rendering service.
const DEFAULT_RENDER_URL: &str = "https://html2pdf-q4n2.onrender.com";

/// Process-wide state, built once before serving and immutable afterwards.
///
/// Request handlers only read it; nothing here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub render: RenderClient,
}

impl AppState {
    /// Read configuration from the environment and build the gateway client.
    pub fn from_env(timeout_ms: u64) -> Result<Self> {
        let api_key = std::env::var("PDF_API_KEY").ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            tracing::warn!("PDF_API_KEY is not set; render requests will fail");
        }

        let base_url = std::env::var("RENDER_SERVICE_URL")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_RENDER_URL.to_string());

        tracing::info!(%base_url, "rendering gateway configured");

        let render = RenderClient::new(base_url, api_key, Duration::from_millis(timeout_ms))?;
        Ok(Self { render })
    }
}
