//! Import/export of the deck document as a plain JSON tree.
//!
//! Export is the straightforward `{title, slides}` shape. Import also
//! accepts the legacy flat `{title, elements}` shape from single-slide
//! documents, wrapping it into one synthesized slide with default
//! background and transition.

use crate::document::{Document, Slide};
use crate::element::Element;
use crate::error::{DeckError, DeckResult};

/// Title given to migrated legacy single-slide documents.
pub const LEGACY_TITLE: &str = "Untitled Slide";

/// Serialize a document into a plain JSON tree.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_document(document: &Document) -> DeckResult<serde_json::Value> {
    serde_json::to_value(document).map_err(Into::into)
}

/// Parse a document from a JSON tree, accepting the current `{title,
/// slides}` shape or the legacy flat `{title, elements}` shape.
///
/// # Errors
///
/// Returns [`DeckError::MalformedDocument`] when the data has neither
/// `slides` nor `elements`, or a serialization error when a recognized
/// shape fails to deserialize.
pub fn parse_document(data: serde_json::Value) -> DeckResult<Document> {
    if data.get("slides").is_some() {
        let mut document: Document = serde_json::from_value(data)?;
        // A deck always holds at least one slide, even from a degenerate
        // export.
        if document.slides.is_empty() {
            document.slides.push(Slide::new());
        }
        Ok(document)
    } else if let Some(elements) = data.get("elements") {
        let elements: Vec<Element> = serde_json::from_value(elements.clone())?;
        let title = data
            .get("title")
            .and_then(serde_json::Value::as_str)
            .unwrap_or(LEGACY_TITLE)
            .to_string();
        tracing::debug!("migrating legacy single-slide document \"{title}\"");
        Ok(Document {
            title,
            slides: vec![Slide::with_elements(elements)],
        })
    } else {
        Err(DeckError::MalformedDocument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Transition, DEFAULT_BACKGROUND};
    use crate::element::ElementType;
    use serde_json::json;

    #[test]
    fn test_round_trip_preserves_document() {
        let mut document = Document::new();
        document.title = "Quarterly Review".to_string();
        document.slides[0]
            .elements
            .push(Element::with_defaults(ElementType::Text));
        document.slides.push(Slide::new());
        document.slides[1]
            .elements
            .push(Element::with_defaults(ElementType::Image));

        let exported = export_document(&document).expect("export");
        let imported = parse_document(exported).expect("import");
        assert_eq!(imported, document);
    }

    #[test]
    fn test_legacy_import_synthesizes_one_slide() {
        let e1 = Element::with_defaults(ElementType::Rect);
        let e2 = Element::with_defaults(ElementType::Circle);
        let data = json!({
            "title": "T",
            "elements": [e1, e2],
        });

        let document = parse_document(data).expect("legacy import");
        assert_eq!(document.title, "T");
        assert_eq!(document.slides.len(), 1);
        assert_eq!(document.slides[0].elements, vec![e1, e2]);
        assert_eq!(document.slides[0].background, DEFAULT_BACKGROUND);
        assert_eq!(document.slides[0].transition, Transition::Fade);
    }

    #[test]
    fn test_legacy_import_without_title_uses_legacy_default() {
        let data = json!({ "elements": [] });
        let document = parse_document(data).expect("legacy import");
        assert_eq!(document.title, LEGACY_TITLE);
    }

    #[test]
    fn test_malformed_import_is_rejected() {
        let result = parse_document(json!({ "something": "else" }));
        assert!(matches!(result, Err(DeckError::MalformedDocument)));
    }

    #[test]
    fn test_empty_slides_normalized_to_one() {
        let data = json!({ "title": "x", "slides": [] });
        let document = parse_document(data).expect("import");
        assert_eq!(document.slides.len(), 1);
    }
}
