//! Slides and the deck document.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::{Element, ElementId};

/// Default background color for new slides.
pub const DEFAULT_BACKGROUND: &str = "#1a1a2e";

/// Default title for new documents.
pub const DEFAULT_TITLE: &str = "Untitled Presentation";

/// Unique identifier for a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlideId(Uuid);

impl SlideId {
    /// Create a new unique slide ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SlideId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SlideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a slide enters the screen during playback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Transition {
    /// Hard cut.
    None,
    /// Cross-fade.
    #[default]
    Fade,
    /// Push in from the right.
    PushLeft,
    /// Push in from the left.
    PushRight,
    /// Scale up from the center.
    Scale,
}

/// One page of the deck: an ordered list of elements plus slide attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Unique identifier.
    pub id: SlideId,
    /// Elements in z-order: later entries draw on top.
    pub elements: Vec<Element>,
    /// Background color as hex.
    pub background: String,
    /// Entry transition for playback.
    #[serde(default)]
    pub transition: Transition,
}

impl Slide {
    /// Create an empty slide with default background and transition.
    #[must_use]
    pub fn new() -> Self {
        Self::with_elements(Vec::new())
    }

    /// Create a slide with default attributes around existing elements.
    #[must_use]
    pub fn with_elements(elements: Vec<Element>) -> Self {
        Self {
            id: SlideId::new(),
            elements,
            background: DEFAULT_BACKGROUND.to_string(),
            transition: Transition::default(),
        }
    }

    /// Deep copy with fresh IDs for the slide and all its elements.
    #[must_use]
    pub fn duplicated(&self) -> Self {
        Self {
            id: SlideId::new(),
            elements: self.elements.iter().map(Element::duplicated).collect(),
            background: self.background.clone(),
            transition: self.transition,
        }
    }

    /// Index of an element in z-order, if present.
    #[must_use]
    pub fn element_index(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|el| el.id == id)
    }
}

impl Default for Slide {
    fn default() -> Self {
        Self::new()
    }
}

/// The whole deck: a title plus ordered slides.
///
/// Invariant: a document always holds at least one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Presentation title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Ordered slides.
    pub slides: Vec<Slide>,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Document {
    /// Create a document with one empty slide and the default title.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: default_title(),
            slides: vec![Slide::new()],
        }
    }

    /// All element IDs across all slides.
    pub fn element_ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.slides
            .iter()
            .flat_map(|slide| slide.elements.iter().map(|el| el.id))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementType;

    #[test]
    fn test_new_document_has_one_empty_slide() {
        let document = Document::new();
        assert_eq!(document.title, DEFAULT_TITLE);
        assert_eq!(document.slides.len(), 1);
        assert!(document.slides[0].elements.is_empty());
        assert_eq!(document.slides[0].background, DEFAULT_BACKGROUND);
        assert_eq!(document.slides[0].transition, Transition::Fade);
    }

    #[test]
    fn test_duplicated_slide_mints_fresh_ids() {
        let mut slide = Slide::new();
        slide.elements.push(Element::with_defaults(ElementType::Rect));
        slide.elements.push(Element::with_defaults(ElementType::Text));

        let copy = slide.duplicated();
        assert_ne!(copy.id, slide.id);
        assert_eq!(copy.elements.len(), 2);
        for (original, duplicate) in slide.elements.iter().zip(&copy.elements) {
            assert_ne!(original.id, duplicate.id);
            assert_eq!(original.kind, duplicate.kind);
        }
    }

    #[test]
    fn test_transition_wire_names() {
        let json = serde_json::to_value(Transition::PushLeft).expect("serialize");
        assert_eq!(json, "pushLeft");
        let json = serde_json::to_value(Transition::None).expect("serialize");
        assert_eq!(json, "none");
    }
}
