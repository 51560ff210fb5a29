//! The catalog boundary.

use crate::core::{Grid, Product, Template};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors reported by a catalog provider
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The provider could not be reached or failed internally
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// The provider refused a grid that breaks the row rules
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
}

/// Acknowledgement returned by a successful save.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReceipt {
    pub id: String,
}

/// Source of products and templates, and sink for saved grids.
///
/// Implementations must reject grids that break the standard save rules even
/// though the editor checks them first.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Products matching `ids`, in request order. Unknown ids are dropped.
    async fn fetch_products_by_ids(&self, ids: &[String]) -> Result<Vec<Product>, CatalogError>;

    async fn fetch_all_products(&self) -> Result<Vec<Product>, CatalogError>;

    async fn fetch_templates(&self) -> Result<Vec<Template>, CatalogError>;

    async fn fetch_template(&self, id: &str) -> Result<Option<Template>, CatalogError>;

    async fn persist_grid(&self, grid: &Grid) -> Result<SaveReceipt, CatalogError>;
}

/// Split a comma-separated id list such as the `ids` request parameter.
///
/// Whitespace around ids is trimmed; blank and repeated entries are dropped.
pub fn parse_ids(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty() && seen.insert(*id))
        .map(str::to_string)
        .collect()
}
