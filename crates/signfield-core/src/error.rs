use thiserror::Error;

/// Errors raised while assembling a signable document.
///
/// Each variant carries structured context (offending dimensions, page
/// index, library reason) so callers can match on the cause instead of
/// parsing the message.
#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("signature rectangle must have positive extent, got {width}x{height}")]
    InvalidRect { width: f64, height: f64 },

    #[error("failed to parse PDF: {reason}")]
    Parse { reason: String },

    #[error("failed to read page {page}: {reason}")]
    Page { page: u32, reason: String },

    #[error("failed to serialize PDF: {reason}")]
    Serialize { reason: String },
}
