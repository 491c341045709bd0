//! Signable-document assembly core.
//!
//! Takes the raw bytes of a rendered PDF, rebuilds its page tree inside a
//! brand-new document, and attaches an interactive form carrying a single
//! unsigned signature field at caller-specified coordinates.
//!
//! Modules:
//! - `document`: adapters over lopdf (parse source, build fresh output)
//! - `transplant`: ordered page transplantation between documents
//! - `field`: signature field synthesis (widget dictionary, field flags)
//! - `assemble`: the end-to-end pipeline
//!
//! The crate performs no I/O beyond allocation; HTTP handling and the
//! HTML-rendering gateway live in the `signfield-api` binary.

pub mod assemble;
pub mod document;
pub mod error;
pub mod field;
pub mod geometry;
pub mod transplant;

#[cfg(test)]
pub(crate) mod testutil;

pub use assemble::build_signable_document;
pub use document::{OutputDocument, SourceDocument};
pub use error::AssembleError;
pub use field::{field_name, SignatureField, FIELD_FLAG_REQUIRED};
pub use geometry::Rect;
pub use transplant::transplant_pages;

/// Parse PDF bytes and return the page count.
pub fn page_count(bytes: &[u8]) -> Result<usize, AssembleError> {
    Ok(SourceDocument::parse(bytes)?.page_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sample_pdf;

    #[test]
    fn page_count_of_sample() {
        assert_eq!(page_count(&sample_pdf(4, "Lib")).unwrap(), 4);
    }

    #[test]
    fn page_count_of_garbage_fails() {
        assert!(page_count(b"not a pdf").is_err());
    }
}
