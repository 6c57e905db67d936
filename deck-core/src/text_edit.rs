//! Inline text editing for the double-click-to-edit overlay.
//!
//! Entering edit mode hides the rendered text node and shows an overlay
//! input pre-filled with the element's text. Blur and Enter-without-Shift
//! commit whatever the overlay currently holds; Escape first resets the
//! overlay back to the original text, so the blur-driven commit writes the
//! original value and the edit is discarded.

use serde::{Deserialize, Serialize};

use crate::element::{Align, Element, ElementId, ElementKind, ElementPatch, FontStyle, FontWeight};

/// Key presses the overlay reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    /// Enter; with Shift held it inserts a newline instead of committing.
    Enter {
        /// Whether Shift is held.
        shift: bool,
    },
    /// Escape - revert to the original text and leave edit mode.
    Escape,
}

/// What the overlay should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSignal {
    /// Keep editing.
    Continue,
    /// Blur the overlay, which triggers the commit.
    Blur,
}

/// Visual parameters for the overlay input, matching the rendered text at
/// the current zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    /// Font size in screen pixels.
    pub font_size_px: f32,
    /// Minimum overlay height in screen pixels.
    pub min_height_px: f32,
    /// Overlay width in screen pixels.
    pub width_px: f32,
    /// Font family name.
    pub font_family: String,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Font slant.
    pub font_style: FontStyle,
    /// Text color as hex.
    pub color: String,
    /// Horizontal alignment.
    pub align: Align,
}

/// Compute the overlay style for a text element at the given zoom scale.
/// Returns `None` for non-text elements.
#[must_use]
pub fn overlay_style(element: &Element, zoom: f32) -> Option<OverlayStyle> {
    let ElementKind::Text {
        font_size,
        font_family,
        font_weight,
        font_style,
        fill,
        width,
        align,
        ..
    } = &element.kind
    else {
        return None;
    };
    #[allow(clippy::cast_precision_loss)]
    let font_size_px = *font_size as f32 * zoom;
    Some(OverlayStyle {
        font_size_px,
        min_height_px: font_size_px * 1.5,
        width_px: width * zoom + 10.0,
        font_family: font_family.clone(),
        font_weight: *font_weight,
        font_style: *font_style,
        color: fill.clone(),
        align: *align,
    })
}

/// One inline editing session on a text element.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditSession {
    element_id: ElementId,
    original: String,
    buffer: String,
}

impl TextEditSession {
    /// Start editing a text element, capturing its current content.
    /// Returns `None` for non-text elements.
    #[must_use]
    pub fn begin(element: &Element) -> Option<Self> {
        let ElementKind::Text { text, .. } = &element.kind else {
            return None;
        };
        Some(Self {
            element_id: element.id,
            original: text.clone(),
            buffer: text.clone(),
        })
    }

    /// The element being edited.
    #[must_use]
    pub const fn element_id(&self) -> ElementId {
        self.element_id
    }

    /// The overlay's current content.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Replace the overlay content (typing updates).
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// Handle a key press. Escape resets the buffer to the original text
    /// before requesting blur, so the following commit discards the edit.
    pub fn key(&mut self, key: EditKey) -> EditSignal {
        match key {
            EditKey::Enter { shift: true } => {
                self.buffer.push('\n');
                EditSignal::Continue
            }
            EditKey::Enter { shift: false } => EditSignal::Blur,
            EditKey::Escape => {
                self.buffer.clone_from(&self.original);
                EditSignal::Blur
            }
        }
    }

    /// Commit the session: produces the patch writing the overlay's
    /// current content back to the element.
    #[must_use]
    pub fn commit(self) -> ElementPatch {
        ElementPatch {
            text: Some(self.buffer),
            ..ElementPatch::default()
        }
    }
}
