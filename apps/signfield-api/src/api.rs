//! API handlers for the signfield server.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use signfield_core::{build_signable_document, Rect};

use crate::error::ServerError;
use crate::state::AppState;

/// Filename suggested to the client for the downloaded document.
const ATTACHMENT_FILENAME: &str = "document_with_signature.pdf";

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "signfield-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Request body for document creation.
///
/// All fields default so that validation produces one uniform 400 shape
/// instead of a deserializer rejection; coordinates are integers in PDF
/// user-space units with a bottom-left origin.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePdfRequest {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub signature_x: i32,
    #[serde(default)]
    pub signature_y: i32,
    #[serde(default)]
    pub signature_width: i32,
    #[serde(default)]
    pub signature_height: i32,
}

/// Handler: POST /api/create-pdf-with-signature
///
/// Renders the HTML through the gateway, rebuilds the returned PDF with a
/// signature field, and streams the result back as an attachment.
pub async fn handle_create_pdf(
    State(state): State<AppState>,
    Json(req): Json<CreatePdfRequest>,
) -> Result<(StatusCode, [(String, String); 2], Vec<u8>), ServerError> {
    validate(&req)?;

    info!(
        customer = %req.customer_name,
        width = req.signature_width,
        height = req.signature_height,
        "creating signable document"
    );

    let rendered = state.render.render(&req.html).await?;

    let rect = Rect::from_origin(
        req.signature_x as f64,
        req.signature_y as f64,
        req.signature_width as f64,
        req.signature_height as f64,
    )?;

    let pdf = build_signable_document(&rendered, &req.customer_name, rect)?;

    info!(bytes = pdf.len(), "signable document assembled");

    Ok((
        StatusCode::OK,
        [
            ("Content-Type".to_string(), "application/pdf".to_string()),
            (
                "Content-Disposition".to_string(),
                format!("attachment; filename=\"{ATTACHMENT_FILENAME}\""),
            ),
        ],
        pdf,
    ))
}

/// Handler: POST /api/add-signature-field
///
/// Same transformation, but the caller supplies the PDF directly as a
/// multipart upload instead of HTML to render; the gateway is never
/// contacted.
pub async fn handle_add_signature_field(
    mut multipart: Multipart,
) -> Result<(StatusCode, [(String, String); 2], Vec<u8>), ServerError> {
    let mut pdf: Option<Vec<u8>> = None;
    let mut customer_name = String::new();
    let mut signature_x = 0i32;
    let mut signature_y = 0i32;
    let mut signature_width = 0i32;
    let mut signature_height = 0i32;

    while let Some(part) = multipart.next_field().await.map_err(|e| {
        ServerError::InvalidRequest(format!("malformed multipart body: {e}"))
    })? {
        let name = part.name().unwrap_or_default().to_string();
        match name.as_str() {
            "pdf" => {
                let bytes = part.bytes().await.map_err(|e| {
                    ServerError::InvalidRequest(format!("unreadable pdf part: {e}"))
                })?;
                pdf = Some(bytes.to_vec());
            }
            "customerName" => customer_name = text_part(&name, part).await?,
            "signatureX" => signature_x = int_part(&name, part).await?,
            "signatureY" => signature_y = int_part(&name, part).await?,
            "signatureWidth" => signature_width = int_part(&name, part).await?,
            "signatureHeight" => signature_height = int_part(&name, part).await?,
            _ => {}
        }
    }

    let pdf = pdf
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| ServerError::InvalidRequest("pdf file part is required".to_string()))?;
    validate_extent(signature_width, signature_height)?;

    info!(
        customer = %customer_name,
        bytes = pdf.len(),
        "adding signature field to uploaded document"
    );

    let rect = Rect::from_origin(
        signature_x as f64,
        signature_y as f64,
        signature_width as f64,
        signature_height as f64,
    )?;

    let out = build_signable_document(&pdf, &customer_name, rect)?;

    Ok((
        StatusCode::OK,
        [
            ("Content-Type".to_string(), "application/pdf".to_string()),
            (
                "Content-Disposition".to_string(),
                format!("attachment; filename=\"{ATTACHMENT_FILENAME}\""),
            ),
        ],
        out,
    ))
}

async fn text_part(name: &str, part: axum::extract::multipart::Field<'_>) -> Result<String, ServerError> {
    part.text()
        .await
        .map_err(|e| ServerError::InvalidRequest(format!("unreadable {name} part: {e}")))
}

async fn int_part(name: &str, part: axum::extract::multipart::Field<'_>) -> Result<i32, ServerError> {
    let text = text_part(name, part).await?;
    text.trim().parse().map_err(|_| {
        ServerError::InvalidRequest(format!("{name} must be an integer, got {text:?}"))
    })
}

/// Reject invalid input before any network call is made.
pub(crate) fn validate(req: &CreatePdfRequest) -> Result<(), ServerError> {
    if req.html.trim().is_empty() {
        return Err(ServerError::InvalidRequest(
            "html must not be empty".to_string(),
        ));
    }
    validate_extent(req.signature_width, req.signature_height)
}

pub(crate) fn validate_extent(width: i32, height: i32) -> Result<(), ServerError> {
    if width <= 0 || height <= 0 {
        return Err(ServerError::InvalidRequest(format!(
            "signature dimensions must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}
