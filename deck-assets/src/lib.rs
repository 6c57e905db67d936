//! Asset services for the deck editor: content pinning with a local
//! fallback, on-disk project persistence, a debounced autosave worker,
//! and the collaborator interfaces for external ledgers and slide
//! snapshots.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                     deck-assets                     │
//! │                                                     │
//! │  ┌──────────┐   ┌───────────┐   ┌───────────────┐   │
//! │  │ pin      │   │ autosave  │──▶│ persist       │   │
//! │  │ (upload /│   │ (debounce)│   │ (records +    │   │
//! │  │  inline) │   └───────────┘   │  catalog)     │   │
//! │  └────┬─────┘                   └───────────────┘   │
//! │       │          ┌──────────────────────────────┐   │
//! │       │          │ ledger (AssetLedger /        │   │
//! │       │          │ SlideSnapshotter traits)     │   │
//! │       ▼          └──────────────────────────────┘   │
//! │   deck-core (DeckStore)                             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here sits beside the document model, never inside it: the
//! slide data in `deck-core` stays free of network and filesystem
//! concerns.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod autosave;
pub mod error;
pub mod ledger;
pub mod persist;
pub mod pin;

pub use autosave::Autosaver;
pub use error::{AssetError, AssetResult};
pub use ledger::{AssetLedger, MintRequest, ObjectId, SlideSnapshotter, TxId};
pub use persist::{now_millis, CatalogEntry, ProjectRecord, ProjectStore};
pub use pin::{attach_asset, inline_data_uri, pin_or_inline, AssetRef, PinClient, PinReceipt};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
