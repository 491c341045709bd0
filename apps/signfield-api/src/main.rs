//! signfield API server
//!
//! Takes an HTML document plus customer metadata, has an external gateway
//! render the HTML to PDF, and returns a rebuilt PDF carrying one
//! interactive signature field at caller-specified coordinates.
//!
//! The PDF transformation itself lives in `signfield-core`; this binary is
//! the serving shell: routing, validation, CORS, configuration, and the
//! rendering-gateway client.

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod render;
mod state;

use api::{handle_add_signature_field, handle_create_pdf, handle_health};
use state::AppState;

/// Uploaded documents can be large; mirror the upstream 50 MB cap.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Command-line arguments for the signfield server.
#[derive(Parser, Debug)]
#[command(name = "signfield-api")]
#[command(about = "HTTP service placing signature fields on rendered PDFs")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Rendering-gateway timeout in milliseconds
    #[arg(long, default_value = "10000")]
    timeout_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::from_env(args.timeout_ms)?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/api/create-pdf-with-signature", post(handle_create_pdf))
        .route("/api/add-signature-field", post(handle_add_signature_field))
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("signfield API listening on http://{}", addr);
    info!("Gateway timeout: {}ms", args.timeout_ms);

    axum::serve(listener, app).await?;

    Ok(())
}
