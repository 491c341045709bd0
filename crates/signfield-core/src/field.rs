//! Signature field synthesis.

use lopdf::{Dictionary, Object, ObjectId, StringFormat};

use crate::geometry::Rect;

/// Field-flag bit marking a field as required (PDF 32000-1, table 221).
pub const FIELD_FLAG_REQUIRED: i64 = 1 << 1;

/// Annotation-flag bit marking a widget as printable (PDF 32000-1, table 165).
const ANNOT_FLAG_PRINT: i64 = 1 << 2;

/// Form-level `SigFlags` bit: the document contains a signature field.
pub(crate) const SIG_FLAGS_SIGNATURES_EXIST: i64 = 1;

/// Derive the form-field name for a customer.
///
/// An empty customer name degenerates to `signature_`, which is accepted:
/// field names only have to be unique within one document, and a
/// single-field document cannot collide.
pub fn field_name(customer_name: &str) -> String {
    format!("signature_{customer_name}")
}

/// An interactive signature field placeholder.
///
/// The kind is fixed: this synthesizer only produces `/FT /Sig` fields.
/// The field carries no value and no appearance stream; it stays blank
/// until a signing tool fills it in, which is why the enclosing form must
/// set `NeedAppearances` so viewers draw a default box.
#[derive(Debug, Clone)]
pub struct SignatureField {
    name: String,
    rect: Rect,
    required: bool,
}

impl SignatureField {
    /// Pure construction; `rect` is already validated by [`Rect::from_origin`].
    pub fn new(name: impl Into<String>, rect: Rect, required: bool) -> Self {
        Self {
            name: name.into(),
            rect,
            required,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn flags(&self) -> i64 {
        if self.required {
            FIELD_FLAG_REQUIRED
        } else {
            0
        }
    }

    /// Build the merged field/widget dictionary addressed to `page_id`.
    pub(crate) fn widget_dict(&self, page_id: ObjectId) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"Annot".to_vec()));
        dict.set("Subtype", Object::Name(b"Widget".to_vec()));
        dict.set("FT", Object::Name(b"Sig".to_vec()));
        dict.set(
            "T",
            Object::String(self.name.clone().into_bytes(), StringFormat::Literal),
        );
        dict.set(
            "Rect",
            Object::Array(vec![
                Object::Real(self.rect.llx() as f32),
                Object::Real(self.rect.lly() as f32),
                Object::Real(self.rect.urx() as f32),
                Object::Real(self.rect.ury() as f32),
            ]),
        );
        dict.set("Ff", Object::Integer(self.flags()));
        dict.set("F", Object::Integer(ANNOT_FLAG_PRINT));
        dict.set("P", Object::Reference(page_id));
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rect() -> Rect {
        Rect::from_origin(50.0, 50.0, 150.0, 100.0).unwrap()
    }

    #[test]
    fn field_name_prefixes_customer() {
        assert_eq!(field_name("acme"), "signature_acme");
    }

    #[test]
    fn field_name_for_empty_customer() {
        assert_eq!(field_name(""), "signature_");
    }

    #[test]
    fn required_field_sets_required_bit() {
        let field = SignatureField::new("signature_acme", rect(), true);
        assert_eq!(field.flags() & FIELD_FLAG_REQUIRED, FIELD_FLAG_REQUIRED);
    }

    #[test]
    fn optional_field_has_no_flags() {
        let field = SignatureField::new("signature_acme", rect(), false);
        assert_eq!(field.flags(), 0);
    }

    #[test]
    fn widget_dict_is_signature_widget() {
        let field = SignatureField::new("signature_acme", rect(), true);
        let dict = field.widget_dict((7, 0));

        assert_eq!(dict.get(b"Type").unwrap().as_name().unwrap(), b"Annot");
        assert_eq!(dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Widget");
        assert_eq!(dict.get(b"FT").unwrap().as_name().unwrap(), b"Sig");
        assert_eq!(dict.get(b"P").unwrap().as_reference().unwrap(), (7, 0));
        assert_eq!(
            dict.get(b"Ff").unwrap().as_i64().unwrap(),
            FIELD_FLAG_REQUIRED
        );

        match dict.get(b"T").unwrap() {
            Object::String(bytes, _) => assert_eq!(bytes, b"signature_acme"),
            other => panic!("T should be a string, got {other:?}"),
        }
    }

    #[test]
    fn widget_dict_rect_is_corner_form() {
        let field = SignatureField::new("signature_acme", rect(), true);
        let dict = field.widget_dict((1, 0));
        let values: Vec<f32> = dict
            .get(b"Rect")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|obj| match obj {
                Object::Real(value) => *value,
                other => panic!("Rect entries should be reals, got {other:?}"),
            })
            .collect();
        assert_eq!(values, vec![50.0, 50.0, 200.0, 150.0]);
    }

    #[test]
    fn widget_dict_has_no_value_or_appearance() {
        let field = SignatureField::new("signature_acme", rect(), true);
        let dict = field.widget_dict((1, 0));
        assert!(dict.get(b"V").is_err());
        assert!(dict.get(b"AP").is_err());
    }
}
