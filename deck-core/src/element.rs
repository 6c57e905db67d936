//! Slide elements - the building blocks of a deck.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an element.
///
/// IDs are never reused; duplicating or pasting an element always mints a
/// fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The element variants a slide can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// Rounded rectangle.
    Rect,
    /// Circle.
    Circle,
    /// Polyline.
    Line,
    /// Text block.
    Text,
    /// Bitmap image.
    Image,
}

/// Looping emphasis animation assigned to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    /// Rhythmic scale pulse.
    Pulse,
    /// Continuous rotation.
    Spin,
    /// Vertical bounce.
    Bounce,
    /// Small rotation wobble.
    Wobble,
}

/// Text weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// Text slant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright.
    #[default]
    Normal,
    /// Italic.
    Italic,
}

/// Horizontal text alignment within the wrap width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left-aligned.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right-aligned.
    Right,
}

/// Variant-specific element data.
///
/// Serialized with a `type` tag and camel-cased field names so documents
/// round-trip against the established wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    /// Rounded rectangle.
    #[serde(rename_all = "camelCase")]
    Rect {
        /// Width in canvas units.
        width: f32,
        /// Height in canvas units.
        height: f32,
        /// Fill color as hex.
        fill: String,
        /// Stroke color as hex.
        stroke: String,
        /// Stroke width.
        stroke_width: f32,
        /// Corner radius.
        corner_radius: f32,
    },

    /// Circle centered on the element origin.
    #[serde(rename_all = "camelCase")]
    Circle {
        /// Radius in canvas units.
        radius: f32,
        /// Fill color as hex.
        fill: String,
        /// Stroke color as hex.
        stroke: String,
        /// Stroke width.
        stroke_width: f32,
    },

    /// Polyline relative to the element origin.
    #[serde(rename_all = "camelCase")]
    Line {
        /// Flat sequence of x,y pairs.
        points: Vec<f32>,
        /// Stroke color as hex.
        stroke: String,
        /// Stroke width.
        stroke_width: f32,
    },

    /// Text block with wrap width.
    #[serde(rename_all = "camelCase")]
    Text {
        /// Text content.
        text: String,
        /// Font size in points, kept within 8-200 by the gesture engine.
        font_size: u32,
        /// Font family name.
        font_family: String,
        /// Font weight.
        #[serde(default)]
        font_weight: FontWeight,
        /// Font slant.
        #[serde(default)]
        font_style: FontStyle,
        /// Text color as hex.
        fill: String,
        /// Wrap width in canvas units.
        width: f32,
        /// Horizontal alignment.
        #[serde(default)]
        align: Align,
    },

    /// Bitmap image referenced by URL or data URI.
    #[serde(rename_all = "camelCase")]
    Image {
        /// Image source - a URL or an inline data URI.
        src: String,
        /// Width in canvas units.
        width: f32,
        /// Height in canvas units.
        height: f32,
        /// Opacity from 0 to 1.
        #[serde(default = "default_opacity")]
        opacity: f32,
        /// Mirror horizontally.
        #[serde(default)]
        flip_x: bool,
        /// Mirror vertically.
        #[serde(default)]
        flip_y: bool,
        /// Content hash of the pinned source, when it was uploaded.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ipfs_hash: Option<String>,
    },
}

const fn default_opacity() -> f32 {
    1.0
}

impl ElementKind {
    /// Canonical default attributes for a freshly created element of `ty`.
    ///
    /// Downstream code assumes these exact values (for example, the
    /// reconciliation engine reads the 24pt text default), so they must not
    /// drift.
    #[must_use]
    pub fn defaults(ty: ElementType) -> Self {
        match ty {
            ElementType::Rect => Self::Rect {
                width: 150.0,
                height: 100.0,
                fill: "#3b82f6".to_string(),
                stroke: "#1e40af".to_string(),
                stroke_width: 2.0,
                corner_radius: 8.0,
            },
            ElementType::Circle => Self::Circle {
                radius: 50.0,
                fill: "#8b5cf6".to_string(),
                stroke: "#6d28d9".to_string(),
                stroke_width: 2.0,
            },
            ElementType::Line => Self::Line {
                points: vec![0.0, 0.0, 150.0, 0.0],
                stroke: "#f59e0b".to_string(),
                stroke_width: 4.0,
            },
            ElementType::Text => Self::Text {
                text: "Click to edit".to_string(),
                font_size: 24,
                font_family: "Arial".to_string(),
                font_weight: FontWeight::default(),
                font_style: FontStyle::default(),
                fill: "#ffffff".to_string(),
                width: 200.0,
                align: Align::default(),
            },
            ElementType::Image => Self::Image {
                src: String::new(),
                width: 200.0,
                height: 150.0,
                opacity: 1.0,
                flip_x: false,
                flip_y: false,
                ipfs_hash: None,
            },
        }
    }

    /// The variant tag of this kind.
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        match self {
            Self::Rect { .. } => ElementType::Rect,
            Self::Circle { .. } => ElementType::Circle,
            Self::Line { .. } => ElementType::Line,
            Self::Text { .. } => ElementType::Text,
            Self::Image { .. } => ElementType::Image,
        }
    }
}

/// One visual object on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier, unique across the whole document.
    pub id: ElementId,
    /// X position in canvas units.
    pub x: f32,
    /// Y position in canvas units.
    pub y: f32,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f32,
    /// Optional looping animation.
    #[serde(default)]
    pub animation: Option<Animation>,
    /// Variant-specific data.
    #[serde(flatten)]
    pub kind: ElementKind,
}

/// Default spawn position for new elements.
const SPAWN_X: f32 = 100.0;
const SPAWN_Y: f32 = 100.0;

impl Element {
    /// Create an element of the given type at the default spawn position
    /// with the variant's canonical default attributes.
    #[must_use]
    pub fn with_defaults(ty: ElementType) -> Self {
        Self {
            id: ElementId::new(),
            x: SPAWN_X,
            y: SPAWN_Y,
            rotation: 0.0,
            animation: None,
            kind: ElementKind::defaults(ty),
        }
    }

    /// The variant tag of this element.
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Detached copy with a freshly minted ID, used by duplicate and paste.
    #[must_use]
    pub fn duplicated(&self) -> Self {
        let mut copy = self.clone();
        copy.id = ElementId::new();
        copy
    }
}

/// A partial field update for one element.
///
/// Produced by the reconciliation engine and applied through the store.
/// Fields that do not exist on the target variant are ignored; no minimum
/// clamping happens here (clamps live at the gesture boundary).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    /// New x position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// New y position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// New rotation in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    /// New width (rect, text wrap width, image).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// New height (rect, image).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// New radius (circle).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    /// New font size (text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    /// New text content (text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ElementPatch {
    /// Whether the patch carries no changes at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.rotation.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.radius.is_none()
            && self.font_size.is_none()
            && self.text.is_none()
    }

    /// Apply the patch to an element, matching fields per variant.
    pub fn apply_to(&self, element: &mut Element) {
        if let Some(x) = self.x {
            element.x = x;
        }
        if let Some(y) = self.y {
            element.y = y;
        }
        if let Some(rotation) = self.rotation {
            element.rotation = rotation;
        }

        match &mut element.kind {
            ElementKind::Rect { width, height, .. } | ElementKind::Image { width, height, .. } => {
                if let Some(w) = self.width {
                    *width = w;
                }
                if let Some(h) = self.height {
                    *height = h;
                }
            }
            ElementKind::Circle { radius, .. } => {
                if let Some(r) = self.radius {
                    *radius = r;
                }
            }
            ElementKind::Line { .. } => {}
            ElementKind::Text {
                text,
                font_size,
                width,
                ..
            } => {
                if let Some(new_text) = &self.text {
                    text.clone_from(new_text);
                }
                if let Some(size) = self.font_size {
                    *font_size = size;
                }
                if let Some(w) = self.width {
                    *width = w;
                }
            }
        }
    }
}
