//! Catalog loading and lookups

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::item::ContentItem;

/// Errors from catalog construction or loading
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog contains no items")]
    Empty,

    #[error("Invalid catalog item {id}: {reason}")]
    InvalidItem { id: String, reason: String },

    #[error("Duplicate catalog item id: {0}")]
    DuplicateId(String),
}

/// Wire format of a catalog file
#[derive(Deserialize)]
struct CatalogFile {
    items: Vec<ContentItem>,
}

/// Immutable snapshot of the content library
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    items: Vec<ContentItem>,
}

impl Catalog {
    /// Build a catalog from items, enforcing per-item invariants
    pub fn new(items: Vec<ContentItem>) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for item in &items {
            if !(1..=3).contains(&item.difficulty) {
                return Err(CatalogError::InvalidItem {
                    id: item.id.clone(),
                    reason: format!("difficulty {} outside 1..=3", item.difficulty),
                });
            }
            if !(item.base_weight > 0.0) {
                return Err(CatalogError::InvalidItem {
                    id: item.id.clone(),
                    reason: format!("base_weight {} must be positive", item.base_weight),
                });
            }
            if !seen.insert(item.id.clone()) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }

        debug!(count = items.len(), "catalog constructed");
        Ok(Self { items })
    }

    /// Parse a catalog from its JSON wire format (`{"items": [...]}`)
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.items)
    }

    /// Load a catalog from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            items = catalog.len(),
            active = catalog.active().count(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// All items, active or not
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Active items only
    pub fn active(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.iter().filter(|item| item.is_active)
    }

    /// Find an item by id
    pub fn get(&self, id: &str) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of items in the catalog
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog holds no items (never true after construction)
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
