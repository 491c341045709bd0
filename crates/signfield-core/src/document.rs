//! Document model adapters over lopdf.

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::AssembleError;

/// A parsed input PDF.
///
/// Read-only for the duration of a request; consumed when its pages are
/// transplanted into an [`OutputDocument`].
pub struct SourceDocument {
    pub(crate) doc: Document,
}

impl SourceDocument {
    /// Parse raw bytes into a document.
    pub fn parse(bytes: &[u8]) -> Result<Self, AssembleError> {
        let doc = Document::load_mem(bytes).map_err(|e| AssembleError::Parse {
            reason: e.to_string(),
        })?;
        Ok(Self { doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Page object ids paired with their 1-based page numbers, in page order.
    pub(crate) fn page_refs(&self) -> Vec<(u32, ObjectId)> {
        self.doc.get_pages().into_iter().collect()
    }
}

/// The document under construction.
///
/// Starts as an empty lopdf document with a freshly allocated page-tree
/// root and catalog; nothing from any parsed input is reused, so stale
/// state in a source object graph cannot be carried forward.
pub struct OutputDocument {
    pub(crate) doc: Document,
    pub(crate) pages_root: ObjectId,
    pub(crate) catalog: ObjectId,
}

impl OutputDocument {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");

        let pages_root = doc.new_object_id();
        let catalog = doc.new_object_id();

        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set("Kids", Object::Array(vec![]));
        pages_dict.set("Count", Object::Integer(0));
        doc.objects.insert(pages_root, Object::Dictionary(pages_dict));

        let mut catalog_dict = Dictionary::new();
        catalog_dict.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog_dict.set("Pages", Object::Reference(pages_root));
        doc.objects.insert(catalog, Object::Dictionary(catalog_dict));

        doc.trailer.set("Root", Object::Reference(catalog));

        Self {
            doc,
            pages_root,
            catalog,
        }
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Object id of the first page, if any pages have been attached.
    pub(crate) fn first_page_id(&self) -> Option<ObjectId> {
        self.doc.get_pages().get(&1).copied()
    }

    /// Serialize the assembled document.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, AssembleError> {
        self.doc.compress();
        let mut buffer = Vec::new();
        self.doc
            .save_to(&mut buffer)
            .map_err(|e| AssembleError::Serialize {
                reason: e.to_string(),
            })?;
        Ok(buffer)
    }
}

impl Default for OutputDocument {
    fn default() -> Self {
        Self::new()
    }
}
