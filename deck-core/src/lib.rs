//! # Deck Core
//!
//! Document model and editing engine for a slide-deck editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  deck-core                   │
//! ├──────────────────────────────────────────────┤
//! │  Data Model       │  Gesture Reconciliation  │
//! │  - Elements       │  - Centerline snapping   │
//! │  - Slides         │  - Scale → model fields  │
//! │  - Document       │  - Inline text editing   │
//! ├──────────────────────────────────────────────┤
//! │  Deck Store       │  Temporal Layer          │
//! │  - CRUD/selection │  - Bounded undo/redo     │
//! │  - Clipboard      │  - Snapshot de-dup       │
//! │  - Z-order        │  - JSON import/export    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! UI events feed the reconciliation engine, which turns raw pointer
//! transforms into store operations; the temporal layer snapshots each
//! store mutation so every change is undoable.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod element;
pub mod error;
pub mod history;
pub mod reconcile;
pub mod schema;
pub mod store;
pub mod text_edit;

pub use document::{Document, Slide, SlideId, Transition, DEFAULT_BACKGROUND, DEFAULT_TITLE};
pub use element::{
    Align, Animation, Element, ElementId, ElementKind, ElementPatch, ElementType, FontStyle,
    FontWeight,
};
pub use error::{DeckError, DeckResult};
pub use history::{Editor, HISTORY_LIMIT};
pub use reconcile::{
    finish_drag, finish_transform, snap_drag, CanvasBounds, LiveTransform, Reconciliation,
    SnapGuides, CANVAS_HEIGHT, CANVAS_WIDTH, SNAP_THRESHOLD,
};
pub use store::{DeckStore, PASTE_OFFSET};
pub use text_edit::{overlay_style, EditKey, EditSignal, OverlayStyle, TextEditSession};

/// Deck core version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
