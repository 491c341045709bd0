//! Assembly of a signable document from rendered PDF bytes.

use lopdf::{Dictionary, Object};

use crate::document::{OutputDocument, SourceDocument};
use crate::error::AssembleError;
use crate::field::{field_name, SignatureField, SIG_FLAGS_SIGNATURES_EXIST};
use crate::geometry::Rect;
use crate::transplant::transplant_pages;

/// Build a copy of `source_bytes` that carries one required, unsigned
/// signature field named after the customer.
///
/// The pipeline is strict and all-or-nothing: parse the input, create a
/// brand-new document, transplant every page in order, attach an
/// interactive form with `NeedAppearances` set, place the field widget on
/// the first page at `rect`, and serialize. Any step failing aborts the
/// rest; no partial document is ever returned.
pub fn build_signable_document(
    source_bytes: &[u8],
    customer_name: &str,
    rect: Rect,
) -> Result<Vec<u8>, AssembleError> {
    let source = SourceDocument::parse(source_bytes)?;
    let mut output = OutputDocument::new();

    transplant_pages(source, &mut output)?;

    let field = SignatureField::new(field_name(customer_name), rect, true);
    attach_form_with_field(&mut output, &field)?;

    output.save_to_bytes()
}

/// Attach a fresh AcroForm holding `field` to the output catalog and wire
/// the widget into the first page's annotations.
fn attach_form_with_field(
    output: &mut OutputDocument,
    field: &SignatureField,
) -> Result<(), AssembleError> {
    let first_page = output.first_page_id().ok_or_else(|| AssembleError::Page {
        page: 1,
        reason: "document has no pages to place the field on".to_string(),
    })?;

    let widget_id = output
        .doc
        .add_object(Object::Dictionary(field.widget_dict(first_page)));

    let mut form = Dictionary::new();
    // No appearance stream is generated for the field, so viewers must be
    // told to synthesize one.
    form.set("NeedAppearances", Object::Boolean(true));
    form.set("SigFlags", Object::Integer(SIG_FLAGS_SIGNATURES_EXIST));
    form.set("Fields", Object::Array(vec![Object::Reference(widget_id)]));
    let form_id = output.doc.add_object(Object::Dictionary(form));

    match output.doc.objects.get_mut(&output.catalog) {
        Some(Object::Dictionary(catalog)) => {
            catalog.set("AcroForm", Object::Reference(form_id));
        }
        _ => {
            return Err(AssembleError::Serialize {
                reason: "output catalog is not a dictionary".to_string(),
            });
        }
    }

    // Transplanted renderer output may already carry annotations, inline
    // or behind a reference; the widget is appended, never replacing them.
    let mut annots = match output.doc.objects.get(&first_page) {
        Some(Object::Dictionary(page)) => match page.get(b"Annots") {
            Ok(Object::Array(items)) => items.clone(),
            Ok(Object::Reference(id)) => output
                .doc
                .objects
                .get(id)
                .and_then(|obj| obj.as_array().ok())
                .cloned()
                .unwrap_or_default(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    annots.push(Object::Reference(widget_id));

    match output.doc.objects.get_mut(&first_page) {
        Some(Object::Dictionary(page)) => {
            page.set("Annots", Object::Array(annots));
            Ok(())
        }
        _ => Err(AssembleError::Page {
            page: 1,
            reason: "first page is not a dictionary".to_string(),
        }),
    }
}
