//! Gesture reconciliation - converting live canvas transforms back into
//! model fields.
//!
//! During a drag or resize the renderer mutates its own live node state
//! (position, scale, rotation). When the gesture ends, that raw state is
//! reconciled into normalized element fields: text absorbs vertical scale
//! into its font size, rects and images absorb scale into width/height,
//! circles take the larger axis factor into their radius. The live scale is
//! then reset to identity so repeated gestures never compound - the
//! persisted model stays scale-free.

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementKind, ElementPatch};

/// Logical canvas width (16:9).
pub const CANVAS_WIDTH: f32 = 960.0;

/// Logical canvas height (16:9).
pub const CANVAS_HEIGHT: f32 = 540.0;

/// Max center-to-centerline distance that triggers alignment snapping.
pub const SNAP_THRESHOLD: f32 = 10.0;

/// Minimum width/height after a resize gesture.
pub const MIN_SIZE: f32 = 20.0;

/// Minimum circle radius after a resize gesture.
pub const MIN_RADIUS: f32 = 10.0;

/// Smallest font size a resize gesture can produce.
pub const MIN_FONT_SIZE: u32 = 8;

/// Largest font size a resize gesture can produce.
pub const MAX_FONT_SIZE: u32 = 200;

/// Logical canvas size the editor lays slides out in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasBounds {
    /// Width in layout units.
    pub width: f32,
    /// Height in layout units.
    pub height: f32,
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}

/// The renderer's live state for one node at gesture time.
///
/// `width`/`height` are the node's unscaled layout size; `scale_x`/
/// `scale_y` accumulate the resize handles' stretch since the last reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveTransform {
    /// Live x position.
    pub x: f32,
    /// Live y position.
    pub y: f32,
    /// Unscaled node width.
    pub width: f32,
    /// Unscaled node height.
    pub height: f32,
    /// Accumulated horizontal scale factor.
    pub scale_x: f32,
    /// Accumulated vertical scale factor.
    pub scale_y: f32,
    /// Live rotation in degrees.
    pub rotation: f32,
}

/// Which centerline alignment guides are currently active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapGuides {
    /// Vertical centerline (element centered horizontally).
    pub vertical: bool,
    /// Horizontal centerline (element centered vertically).
    pub horizontal: bool,
}

impl SnapGuides {
    /// Whether any guide is showing.
    #[must_use]
    pub const fn any(self) -> bool {
        self.vertical || self.horizontal
    }
}

/// Centerline snapping, run on every drag-move event.
///
/// When the node's center comes within [`SNAP_THRESHOLD`] of a canvas
/// centerline, the live position is moved so the center lands exactly on
/// it, and the corresponding guide is reported for the renderer to draw.
pub fn snap_drag(live: &mut LiveTransform, canvas: CanvasBounds) -> SnapGuides {
    let mut guides = SnapGuides::default();
    let center_x = canvas.width / 2.0;
    let center_y = canvas.height / 2.0;
    let node_center_x = live.x + live.width / 2.0;
    let node_center_y = live.y + live.height / 2.0;

    if (node_center_x - center_x).abs() < SNAP_THRESHOLD {
        live.x = center_x - live.width / 2.0;
        guides.vertical = true;
    }
    if (node_center_y - center_y).abs() < SNAP_THRESHOLD {
        live.y = center_y - live.height / 2.0;
        guides.horizontal = true;
    }
    guides
}

/// Reconcile a finished drag: only the (possibly snapped) position is
/// persisted. The caller clears its guide state.
#[must_use]
pub fn finish_drag(live: &LiveTransform) -> ElementPatch {
    ElementPatch {
        x: Some(live.x),
        y: Some(live.y),
        ..ElementPatch::default()
    }
}

/// Outcome of reconciling a resize/rotate gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Model fields to persist through the store.
    pub patch: ElementPatch,
    /// Instruction for the renderer to reset its live scale to 1x1 -
    /// the size has been absorbed into semantic fields.
    pub reset_scale: bool,
}

/// Reconcile a finished resize/rotate gesture into model fields.
///
/// Position and rotation are always persisted. Per type:
/// - text: true font resizing - the vertical scale factor becomes a new
///   font size (rounded, clamped 8-200) and the horizontal factor a new
///   wrap width; no scale is ever stored.
/// - rect/image: width and height absorb the scale, floored at 20.
/// - circle: the larger axis factor scales the radius, floored at 10.
/// - line: nothing beyond position/rotation.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[allow(clippy::cast_precision_loss)]
pub fn finish_transform(element: &Element, live: &LiveTransform) -> Reconciliation {
    let mut patch = ElementPatch {
        x: Some(live.x),
        y: Some(live.y),
        rotation: Some(live.rotation),
        ..ElementPatch::default()
    };
    let mut reset_scale = false;

    match &element.kind {
        ElementKind::Text { font_size, .. } => {
            let scaled = (*font_size as f32 * live.scale_y).round() as u32;
            patch.font_size = Some(scaled.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE));
            patch.width = Some((live.width * live.scale_x).max(MIN_SIZE));
            reset_scale = true;
        }
        ElementKind::Rect { .. } | ElementKind::Image { .. } => {
            patch.width = Some((live.width * live.scale_x).max(MIN_SIZE));
            patch.height = Some((live.height * live.scale_y).max(MIN_SIZE));
            reset_scale = true;
        }
        ElementKind::Circle { radius, .. } => {
            patch.radius = Some((radius * live.scale_x.max(live.scale_y)).max(MIN_RADIUS));
            reset_scale = true;
        }
        ElementKind::Line { .. } => {}
    }

    Reconciliation { patch, reset_scale }
}
