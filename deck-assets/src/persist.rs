//! On-disk project persistence.
//!
//! Two file shapes live under the data directory: per-project autosave
//! records (`<id>.json`) and a single `catalog.json` listing every saved
//! deck with its metadata. Write failures surface as errors for the
//! caller to report; the in-memory document is never touched here.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use deck_core::{Document, Slide};

use crate::error::AssetResult;

const CATALOG_FILE: &str = "catalog.json";

/// Autosave record for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Project identifier, also the record's filename stem.
    pub id: String,
    /// Presentation title.
    pub title: String,
    /// Full slide content.
    pub slides: Vec<Slide>,
    /// Last write time, milliseconds since the Unix epoch.
    pub updated_at: u64,
}

impl ProjectRecord {
    /// Build an autosave record for a document, stamped with the current
    /// time.
    #[must_use]
    pub fn new(id: &str, document: &Document) -> Self {
        Self {
            id: id.to_string(),
            title: document.title.clone(),
            slides: document.slides.clone(),
            updated_at: now_millis(),
        }
    }
}

/// Catalog entry for a saved deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Project identifier.
    pub id: String,
    /// Presentation title.
    pub title: String,
    /// Number of slides at save time.
    pub slide_count: usize,
    /// Full document export, for opening the deck from the catalog.
    pub data: serde_json::Value,
    /// Optional preview image as a data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// First save time, milliseconds since the Unix epoch.
    pub created_at: u64,
    /// Most recent save time, milliseconds since the Unix epoch.
    pub updated_at: u64,
    /// Owning account, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// External ledger identifier, when the deck has been minted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_asset_id: Option<String>,
}

/// File-backed store for autosave records and the saved-deck catalog.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    data_dir: PathBuf,
}

impl ProjectStore {
    /// Open a store rooted at `data_dir`, creating the directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory can't be created.
    pub fn new(data_dir: impl Into<PathBuf>) -> AssetResult<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// The directory records are written under.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Write an autosave record to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_record(&self, record: &ProjectRecord) -> AssetResult<()> {
        let json = serde_json::to_string_pretty(record)?;
        let path = self.record_path(&record.id);
        std::fs::write(&path, json)?;
        tracing::debug!("Saved project {} to {}", record.id, path.display());
        Ok(())
    }

    /// Read an autosave record back from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist or can't be parsed.
    pub fn load_record(&self, id: &str) -> AssetResult<ProjectRecord> {
        let contents = std::fs::read_to_string(self.record_path(id))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Reconstruct a document from a project's autosave record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record can't be read or parsed.
    pub fn load_document(&self, id: &str) -> AssetResult<Document> {
        let record = self.load_record(id)?;
        Ok(Document {
            title: record.title,
            slides: record.slides,
        })
    }

    /// List the IDs of every project with an autosave record on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory can't be read.
    pub fn list_records(&self) -> AssetResult<Vec<String>> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if stem != "catalog" {
                        ids.push(stem.to_string());
                    }
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Remove a project's autosave record. Missing files are fine.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file can't be removed.
    pub fn delete_record(&self, id: &str) -> AssetResult<()> {
        let path = self.record_path(id);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Read the saved-deck catalog. A missing catalog file is an empty
    /// catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing catalog can't be read or parsed.
    pub fn load_catalog(&self) -> AssetResult<Vec<CatalogEntry>> {
        let path = self.data_dir.join(CATALOG_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Insert or update a deck's catalog entry.
    ///
    /// An existing entry keeps its `created_at`, `owner`, and
    /// `external_asset_id` unless new values are supplied; everything else
    /// is refreshed from the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document can't be exported or the catalog
    /// can't be read or written.
    pub fn upsert_catalog_entry(
        &self,
        id: &str,
        document: &Document,
        thumbnail: Option<String>,
        owner: Option<String>,
        external_asset_id: Option<String>,
    ) -> AssetResult<CatalogEntry> {
        let mut catalog = self.load_catalog()?;
        let now = now_millis();
        let data = serde_json::to_value(document)?;

        let entry = match catalog.iter_mut().find(|e| e.id == id) {
            Some(existing) => {
                existing.title = document.title.clone();
                existing.slide_count = document.slides.len();
                existing.data = data;
                existing.updated_at = now;
                if thumbnail.is_some() {
                    existing.thumbnail = thumbnail;
                }
                if owner.is_some() {
                    existing.owner = owner;
                }
                if external_asset_id.is_some() {
                    existing.external_asset_id = external_asset_id;
                }
                existing.clone()
            }
            None => {
                let entry = CatalogEntry {
                    id: id.to_string(),
                    title: document.title.clone(),
                    slide_count: document.slides.len(),
                    data,
                    thumbnail,
                    created_at: now,
                    updated_at: now,
                    owner,
                    external_asset_id,
                };
                catalog.push(entry.clone());
                entry
            }
        };

        self.write_catalog(&catalog)?;
        Ok(entry)
    }

    /// Remove a deck from the catalog. Unknown IDs are fine.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog can't be read or written.
    pub fn remove_catalog_entry(&self, id: &str) -> AssetResult<()> {
        let mut catalog = self.load_catalog()?;
        let before = catalog.len();
        catalog.retain(|e| e.id != id);
        if catalog.len() != before {
            self.write_catalog(&catalog)?;
        }
        Ok(())
    }

    fn write_catalog(&self, catalog: &[CatalogEntry]) -> AssetResult<()> {
        let json = serde_json::to_string_pretty(catalog)?;
        std::fs::write(self.data_dir.join(CATALOG_FILE), json)?;
        Ok(())
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", sanitize_filename(id)))
    }
}

/// Sanitize a project ID for use as a filename.
///
/// Replaces any character that is not alphanumeric, `-`, or `_` with `_`.
fn sanitize_filename(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Milliseconds since the Unix epoch, saturating at zero for clocks set
/// before it.
#[must_use]
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
