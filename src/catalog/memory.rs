//! In-memory catalog with the demo seed data.

use crate::catalog::provider::{CatalogError, CatalogProvider, SaveReceipt};
use crate::core::{Alignment, Grid, Product, Template};
use crate::validation::SaveRules;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;

const SEED_PRODUCTS: [(&str, &str, &str, &str); 9] = [
    (
        "p1",
        "Blue Jean",
        "https://images.unsplash.com/photo-1542272604-787c3835535d?w=400&h=500",
        "36,87 EUR",
    ),
    (
        "p2",
        "White T-Shirt",
        "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=400&h=500",
        "19,95 EUR",
    ),
    (
        "p3",
        "Black Dress",
        "https://images.unsplash.com/photo-1551803091-e20673f15770?w=400&h=500",
        "49,99 EUR",
    ),
    (
        "p4",
        "Leather Jacket",
        "https://images.unsplash.com/photo-1551028719-00167b16eac5?w=400&h=500",
        "89,95 EUR",
    ),
    (
        "p5",
        "Floral Skirt",
        "https://images.unsplash.com/photo-1583496661160-fb5886a0aaaa?w=400&h=500",
        "29,95 EUR",
    ),
    (
        "p6",
        "Striped Shirt",
        "https://images.unsplash.com/photo-1596755094514-f87e34085b2c?w=400&h=500",
        "25,99 EUR",
    ),
    (
        "p7",
        "Denim Shorts",
        "https://images.unsplash.com/photo-1591195853828-11db59a44f6b?w=400&h=500",
        "22,95 EUR",
    ),
    (
        "p8",
        "Knit Sweater",
        "https://images.unsplash.com/photo-1624378439575-d8705ad7ae80?w=400&h=500",
        "45,95 EUR",
    ),
    (
        "p9",
        "Cargo Pants",
        "https://images.unsplash.com/photo-1517438476312-10d79c077509?w=400&h=500",
        "39,95 EUR",
    ),
];

/// Catalog backed by in-process vectors.
///
/// Each call can be delayed to mimic a remote service.
pub struct InMemoryCatalog {
    products: Vec<Product>,
    templates: Vec<Template>,
    latency: Duration,
    rules: SaveRules,
    persist_calls: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>, templates: Vec<Template>) -> Self {
        Self {
            products,
            templates,
            latency: Duration::ZERO,
            rules: SaveRules::standard(),
            persist_calls: AtomicUsize::new(0),
        }
    }

    /// Nine apparel products and the three alignment templates.
    pub fn seeded() -> Self {
        let products = SEED_PRODUCTS
            .iter()
            .map(|(id, name, image_url, price)| Product::new(*id, *name, *image_url, *price))
            .collect();
        Self::new(products, Self::seed_templates())
    }

    /// One template per alignment.
    pub fn seed_templates() -> Vec<Template> {
        vec![
            Template::new("template1", "Left Alignment", Alignment::Left),
            Template::new("template2", "Center Alignment", Alignment::Center),
            Template::new("template3", "Right Alignment", Alignment::Right),
        ]
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of `persist_grid` calls received, accepted or not.
    pub fn persist_calls(&self) -> usize {
        self.persist_calls.load(Ordering::SeqCst)
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn fetch_products_by_ids(&self, ids: &[String]) -> Result<Vec<Product>, CatalogError> {
        self.delay().await;
        Ok(ids
            .iter()
            .filter_map(|id| self.products.iter().find(|p| &p.id == id).cloned())
            .collect())
    }

    async fn fetch_all_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.delay().await;
        Ok(self.products.clone())
    }

    async fn fetch_templates(&self) -> Result<Vec<Template>, CatalogError> {
        self.delay().await;
        Ok(self.templates.clone())
    }

    async fn fetch_template(&self, id: &str) -> Result<Option<Template>, CatalogError> {
        self.delay().await;
        Ok(self.templates.iter().find(|t| t.id == id).cloned())
    }

    async fn persist_grid(&self, grid: &Grid) -> Result<SaveReceipt, CatalogError> {
        self.persist_calls.fetch_add(1, Ordering::SeqCst);
        self.delay().await;

        if let Err(violations) = self.rules.check(grid) {
            debug!(violations = violations.len(), "rejecting invalid grid");
            return Err(CatalogError::InvalidGrid(
                "Each row must have 1-3 products and a template assigned".to_string(),
            ));
        }

        let id = grid
            .id
            .clone()
            .unwrap_or_else(|| format!("grid_{}", Utc::now().timestamp_millis()));
        Ok(SaveReceipt { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Row;

    fn valid_grid() -> Grid {
        let mut row = Row::with_id("row-1");
        row.template_id = Some("template1".to_string());
        row.products.push(Product::new("p1", "Blue Jean", "", "36,87 EUR"));
        Grid {
            id: None,
            rows: vec![row],
        }
    }

    #[tokio::test]
    async fn seeded_catalog_contents() {
        let catalog = InMemoryCatalog::seeded();
        assert_eq!(catalog.fetch_all_products().await.unwrap().len(), 9);
        assert_eq!(catalog.fetch_templates().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn unknown_ids_are_dropped() {
        let catalog = InMemoryCatalog::seeded();
        let ids = vec!["p3".to_string(), "nope".to_string(), "p1".to_string()];

        let products = catalog.fetch_products_by_ids(&ids).await.unwrap();

        let found: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(found, ["p3", "p1"]);
    }

    #[tokio::test]
    async fn template_lookup() {
        let catalog = InMemoryCatalog::seeded();

        let template = catalog.fetch_template("template2").await.unwrap().unwrap();
        assert_eq!(template.alignment, Alignment::Center);
        assert!(catalog.fetch_template("template9").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn persist_assigns_id() {
        let catalog = InMemoryCatalog::seeded();

        let receipt = catalog.persist_grid(&valid_grid()).await.unwrap();

        assert!(receipt.id.starts_with("grid_"));
        assert_eq!(catalog.persist_calls(), 1);
    }

    #[tokio::test]
    async fn persist_keeps_existing_id() {
        let catalog = InMemoryCatalog::seeded();
        let mut grid = valid_grid();
        grid.id = Some("grid-123".to_string());

        let receipt = catalog.persist_grid(&grid).await.unwrap();

        assert_eq!(receipt.id, "grid-123");
    }

    #[tokio::test]
    async fn persist_rejects_invalid_grid() {
        let catalog = InMemoryCatalog::seeded();
        let mut grid = valid_grid();
        grid.rows.push(Row::with_id("row-2"));

        let result = catalog.persist_grid(&grid).await;

        assert!(matches!(result, Err(CatalogError::InvalidGrid(_))));
        assert_eq!(catalog.persist_calls(), 1);
    }

    #[tokio::test]
    async fn latency_is_applied() {
        let catalog = InMemoryCatalog::seeded().with_latency(Duration::from_millis(20));
        let start = tokio::time::Instant::now();

        catalog.fetch_templates().await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
