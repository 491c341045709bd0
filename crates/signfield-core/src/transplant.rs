//! Page transplantation from a parsed source into a fresh document.

use lopdf::Object;

use crate::document::{OutputDocument, SourceDocument};
use crate::error::AssembleError;

/// Move every page of `source` into `dest`, preserving 1-based page order.
///
/// All source objects are imported with offset-remapped ids so they cannot
/// collide with ids already allocated in the destination. Each page
/// dictionary is re-parented onto the destination page-tree root, the
/// root's `Kids`/`Count` are rebuilt, and the source's own catalog and
/// page-tree root are dropped afterwards: the output must not inherit any
/// top-level state from the parsed input.
///
/// A page that cannot be resolved to a dictionary fails the whole
/// operation with its page number; a partially transplanted document is
/// never returned to callers.
pub fn transplant_pages(
    source: SourceDocument,
    dest: &mut OutputDocument,
) -> Result<(), AssembleError> {
    let src_pages = source.page_refs();
    let src = source.doc;
    let src_max_id = src.max_id;

    let id_offset = dest.doc.max_id;

    // The source's top-level nodes, located before the object map is consumed.
    let src_catalog = src
        .trailer
        .get(b"Root")
        .ok()
        .and_then(|obj| obj.as_reference().ok());
    let src_pages_root = src_catalog
        .and_then(|id| src.objects.get(&id))
        .and_then(|obj| obj.as_dict().ok())
        .and_then(|dict| dict.get(b"Pages").ok())
        .and_then(|obj| obj.as_reference().ok());

    for (old_id, object) in src.objects.into_iter() {
        let new_id = (old_id.0 + id_offset, old_id.1);
        dest.doc.objects.insert(new_id, remap_refs(object, id_offset));
    }
    dest.doc.max_id = (src_max_id + id_offset).max(dest.doc.max_id);

    let mut kids = Vec::with_capacity(src_pages.len());
    for (page_num, old_page_id) in src_pages {
        let new_page_id = (old_page_id.0 + id_offset, old_page_id.1);
        match dest.doc.objects.get_mut(&new_page_id) {
            Some(Object::Dictionary(page)) => {
                page.set("Parent", Object::Reference(dest.pages_root));
            }
            _ => {
                return Err(AssembleError::Page {
                    page: page_num,
                    reason: "page object is missing or not a dictionary".to_string(),
                });
            }
        }
        kids.push(Object::Reference(new_page_id));
    }

    // Intermediate page-tree nodes of a nested source tree become orphans
    // once every page points at the new root; the source catalog and root
    // are removed outright.
    if let Some(id) = src_catalog {
        dest.doc.objects.remove(&(id.0 + id_offset, id.1));
    }
    if let Some(id) = src_pages_root {
        dest.doc.objects.remove(&(id.0 + id_offset, id.1));
    }

    let count = kids.len() as i64;
    match dest.doc.objects.get_mut(&dest.pages_root) {
        Some(Object::Dictionary(pages_dict)) => {
            pages_dict.set("Kids", Object::Array(kids));
            pages_dict.set("Count", Object::Integer(count));
            Ok(())
        }
        _ => Err(AssembleError::Serialize {
            reason: "output page-tree root is not a dictionary".to_string(),
        }),
    }
}

/// Recursively shift object references by `offset`.
fn remap_refs(obj: Object, offset: u32) -> Object {
    match obj {
        Object::Reference(id) => Object::Reference((id.0 + offset, id.1)),
        Object::Array(items) => Object::Array(
            items
                .into_iter()
                .map(|item| remap_refs(item, offset))
                .collect(),
        ),
        Object::Dictionary(mut dict) => {
            for (_, value) in dict.iter_mut() {
                let taken = std::mem::replace(value, Object::Null);
                *value = remap_refs(taken, offset);
            }
            Object::Dictionary(dict)
        }
        Object::Stream(mut stream) => {
            for (_, value) in stream.dict.iter_mut() {
                let taken = std::mem::replace(value, Object::Null);
                *value = remap_refs(taken, offset);
            }
            Object::Stream(stream)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sample_pdf;
    use lopdf::Document;
    use pretty_assertions::assert_eq;

    fn transplanted(pages: u32, label: &str) -> Vec<u8> {
        let source = SourceDocument::parse(&sample_pdf(pages, label)).unwrap();
        let mut dest = OutputDocument::new();
        transplant_pages(source, &mut dest).unwrap();
        dest.save_to_bytes().unwrap()
    }

    #[test]
    fn preserves_page_count() {
        for pages in [1u32, 2, 5, 10] {
            let bytes = transplanted(pages, "Count");
            let doc = Document::load_mem(&bytes).unwrap();
            assert_eq!(doc.get_pages().len(), pages as usize);
        }
    }

    #[test]
    fn preserves_page_order() {
        let bytes = transplanted(4, "Order");
        let mut doc = Document::load_mem(&bytes).unwrap();
        doc.decompress();

        for (page_num, page_id) in doc.get_pages() {
            let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
            let content_id = page.get(b"Contents").unwrap().as_reference().unwrap();
            let stream = match doc.get_object(content_id).unwrap() {
                Object::Stream(stream) => stream,
                other => panic!("Contents should be a stream, got {other:?}"),
            };
            let text = String::from_utf8_lossy(&stream.content);
            assert!(
                text.contains(&format!("Order-Page-{page_num}")),
                "page {page_num} carries the wrong content: {text}"
            );
        }
    }

    #[test]
    fn keeps_media_box_untouched() {
        let bytes = transplanted(2, "Box");
        let doc = Document::load_mem(&bytes).unwrap();
        for (_, page_id) in doc.get_pages() {
            let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            let values: Vec<i64> = media_box.iter().map(|o| o.as_i64().unwrap()).collect();
            assert_eq!(values, vec![0, 0, 595, 842]);
        }
    }

    #[test]
    fn reparents_pages_onto_destination_root() {
        let source = SourceDocument::parse(&sample_pdf(3, "Parent")).unwrap();
        let mut dest = OutputDocument::new();
        transplant_pages(source, &mut dest).unwrap();

        for (_, page_id) in dest.doc.get_pages() {
            let page = dest.doc.get_object(page_id).unwrap().as_dict().unwrap();
            let parent = page.get(b"Parent").unwrap().as_reference().unwrap();
            assert_eq!(parent, dest.pages_root);
        }
    }

    #[test]
    fn drops_source_catalog() {
        let source = SourceDocument::parse(&sample_pdf(2, "Stale")).unwrap();
        let mut dest = OutputDocument::new();
        transplant_pages(source, &mut dest).unwrap();

        let catalogs = dest
            .doc
            .objects
            .values()
            .filter(|obj| {
                obj.as_dict()
                    .ok()
                    .and_then(|d| d.get(b"Type").ok())
                    .and_then(|t| t.as_name().ok())
                    .map(|name| name == b"Catalog")
                    .unwrap_or(false)
            })
            .count();
        assert_eq!(catalogs, 1, "only the fresh catalog should remain");
    }

    #[test]
    fn output_is_loadable_pdf() {
        let bytes = transplanted(2, "Valid");
        assert!(Document::load_mem(&bytes).is_ok());
    }

    #[test]
    fn empty_source_yields_empty_output() {
        let bytes = transplanted(0, "Empty");
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 0);
    }
}
