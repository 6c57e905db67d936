//! External ledger and snapshot collaborator interfaces.
//!
//! The editor only needs the shape of these operations; concrete backends
//! (a chain client, a canvas rasterizer) implement the traits elsewhere.
//! Ledger identifiers live at the catalog level (`externalAssetId`),
//! never inside the slide model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AssetResult;

/// Identifier of an asset object on the external ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub String);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a settled ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId(pub String);

impl std::fmt::Display for TxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything a backend needs to mint a slide as an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    /// Asset display name.
    pub name: String,
    /// Asset description.
    pub description: String,
    /// URL of the pinned preview image.
    pub image_url: String,
    /// URL of the pinned slide content.
    pub content_url: String,
}

/// Asset operations against an external ledger.
#[async_trait]
pub trait AssetLedger: Send + Sync {
    /// Mint a new asset, returning its object ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or fails the transaction.
    async fn mint(&self, request: MintRequest) -> AssetResult<ObjectId>;

    /// Put an owned asset up for sale at `price`, in the ledger's base
    /// unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or fails the transaction.
    async fn list_for_sale(&self, object: &ObjectId, price: u64) -> AssetResult<TxId>;

    /// Purchase a listed asset.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or fails the transaction.
    async fn buy(&self, object: &ObjectId) -> AssetResult<TxId>;

    /// Withdraw an asset from sale.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or fails the transaction.
    async fn delist(&self, object: &ObjectId) -> AssetResult<TxId>;
}

/// Renders a slide to a preview image.
#[async_trait]
pub trait SlideSnapshotter: Send + Sync {
    /// Capture the current slide at the given pixel ratio, returning a
    /// data URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the slide cannot be rendered.
    async fn capture(&self, pixel_ratio: f32) -> AssetResult<String>;
}
