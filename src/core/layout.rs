//! The grid state engine.
//!
//! [`GridLayout`] owns the grid and the pool of unplaced products and is the
//! only place either is mutated. Every operation is synchronous and total:
//! a request that refers to a row or product that is not where the caller
//! claims turns into [`Outcome::Skipped`] and leaves the state untouched.

use super::model::{Grid, Product, Row, MAX_PRODUCTS_PER_ROW};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

/// Why a mutation request left the layout unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    RowNotFound { row_id: String },
    ProductNotAvailable { product_id: String },
    ProductNotInRow { row_id: String, product_id: String },
    DuplicateInRow { row_id: String, product_id: String },
    RowIndexOutOfRange { index: usize, len: usize },
    SameIndex,
    NoEndpoints,
}

/// Result of a mutation request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The layout changed.
    Applied,
    /// The request was ignored.
    Skipped(SkipReason),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Where a product currently lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    Available { index: usize },
    Row { row_id: String, index: usize },
}

/// A broken layout invariant, reported by [`GridLayout::check_invariants`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LayoutViolation {
    #[error("product '{product_id}' appears more than once")]
    DuplicateProduct { product_id: String },

    #[error("row id '{row_id}' appears more than once")]
    DuplicateRow { row_id: String },

    #[error("row '{row_id}' holds {count} products (max {max})")]
    RowOverCapacity {
        row_id: String,
        count: usize,
        max: usize,
    },
}

/// Rows plus the pool of products not placed in any row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    grid: Grid,
    available: Vec<Product>,
}

impl GridLayout {
    /// Start with an empty grid and every product in the pool.
    ///
    /// Repeated product ids are dropped, keeping the first occurrence.
    pub fn new(mut available: Vec<Product>) -> Self {
        let mut seen = HashSet::new();
        available.retain(|p| seen.insert(p.id.clone()));
        Self {
            grid: Grid::new(),
            available,
        }
    }

    /// Rebuild a layout from previously captured parts.
    ///
    /// Fails if the parts break an invariant.
    pub fn from_parts(grid: Grid, available: Vec<Product>) -> Result<Self, LayoutViolation> {
        let layout = Self { grid, available };
        layout.check_invariants()?;
        Ok(layout)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rows(&self) -> &[Row] {
        &self.grid.rows
    }

    pub fn row(&self, row_id: &str) -> Option<&Row> {
        self.grid.row(row_id)
    }

    pub fn available(&self) -> &[Product] {
        &self.available
    }

    pub(crate) fn set_grid_id(&mut self, id: String) {
        self.grid.id = Some(id);
    }

    /// Find where a product currently sits.
    pub fn locate(&self, product_id: &str) -> Option<Placement> {
        if let Some(index) = self.available.iter().position(|p| p.id == product_id) {
            return Some(Placement::Available { index });
        }
        self.grid.rows.iter().find_map(|row| {
            row.position(product_id).map(|index| Placement::Row {
                row_id: row.id.clone(),
                index,
            })
        })
    }

    /// Append a new empty row and return its id.
    pub fn add_row(&mut self) -> String {
        let row = Row::new();
        let id = row.id.clone();
        self.grid.rows.push(row);
        id
    }

    /// Remove a row, returning its products to the pool.
    pub fn remove_row(&mut self, row_id: &str) -> Outcome {
        let Some(index) = self.grid.row_index(row_id) else {
            return Outcome::Skipped(SkipReason::RowNotFound {
                row_id: row_id.to_string(),
            });
        };
        let row = self.grid.rows.remove(index);
        self.available.extend(row.products);
        Outcome::Applied
    }

    /// Move the row at `from` so it ends up at `to`.
    ///
    /// `from` must be a valid index; `to` is clamped to the last position.
    pub fn move_row(&mut self, from: usize, to: usize) -> Outcome {
        let len = self.grid.rows.len();
        if from >= len {
            return Outcome::Skipped(SkipReason::RowIndexOutOfRange { index: from, len });
        }
        let to = to.min(len - 1);
        if from == to {
            return Outcome::Skipped(SkipReason::SameIndex);
        }
        let row = self.grid.rows.remove(from);
        self.grid.rows.insert(to, row);
        Outcome::Applied
    }

    /// Assign a template id to a row. The id is not checked against the catalog.
    pub fn update_row_template(&mut self, row_id: &str, template_id: &str) -> Outcome {
        match self.grid.rows.iter_mut().find(|r| r.id == row_id) {
            Some(row) => {
                row.template_id = Some(template_id.to_string());
                Outcome::Applied
            }
            None => Outcome::Skipped(SkipReason::RowNotFound {
                row_id: row_id.to_string(),
            }),
        }
    }

    /// Move a product between the pool and rows, or between rows.
    ///
    /// `None` on either side stands for the available pool. When
    /// `destination_index` is given the product is inserted before the item
    /// currently at that position; past the end it is appended. A destination
    /// row pushed over capacity evicts its trailing products to the pool.
    pub fn move_product(
        &mut self,
        source_row_id: Option<&str>,
        destination_row_id: Option<&str>,
        product_id: &str,
        destination_index: Option<usize>,
    ) -> Outcome {
        match (source_row_id, destination_row_id) {
            (None, Some(dest)) => self.place_from_pool(dest, product_id, destination_index),
            (Some(source), None) => self.return_to_pool(source, product_id),
            (Some(source), Some(dest)) => {
                self.move_between_rows(source, dest, product_id, destination_index)
            }
            (None, None) => Outcome::Skipped(SkipReason::NoEndpoints),
        }
    }

    fn place_from_pool(
        &mut self,
        dest: &str,
        product_id: &str,
        destination_index: Option<usize>,
    ) -> Outcome {
        let Some(pool_index) = self.available.iter().position(|p| p.id == product_id) else {
            return Outcome::Skipped(SkipReason::ProductNotAvailable {
                product_id: product_id.to_string(),
            });
        };
        let Some(dest_index) = self.grid.row_index(dest) else {
            return Outcome::Skipped(SkipReason::RowNotFound {
                row_id: dest.to_string(),
            });
        };
        if self.grid.rows[dest_index].contains(product_id) {
            return Outcome::Skipped(SkipReason::DuplicateInRow {
                row_id: dest.to_string(),
                product_id: product_id.to_string(),
            });
        }

        let product = self.available.remove(pool_index);
        self.insert_into_row(dest_index, product, destination_index);
        Outcome::Applied
    }

    fn return_to_pool(&mut self, source: &str, product_id: &str) -> Outcome {
        let Some(source_index) = self.grid.row_index(source) else {
            return Outcome::Skipped(SkipReason::RowNotFound {
                row_id: source.to_string(),
            });
        };
        let row = &mut self.grid.rows[source_index];
        let Some(position) = row.position(product_id) else {
            return Outcome::Skipped(SkipReason::ProductNotInRow {
                row_id: source.to_string(),
                product_id: product_id.to_string(),
            });
        };
        let product = row.products.remove(position);
        self.available.push(product);
        Outcome::Applied
    }

    fn move_between_rows(
        &mut self,
        source: &str,
        dest: &str,
        product_id: &str,
        destination_index: Option<usize>,
    ) -> Outcome {
        let (Some(source_index), Some(dest_index)) =
            (self.grid.row_index(source), self.grid.row_index(dest))
        else {
            let missing = if self.grid.row_index(source).is_none() {
                source
            } else {
                dest
            };
            return Outcome::Skipped(SkipReason::RowNotFound {
                row_id: missing.to_string(),
            });
        };
        let Some(position) = self.grid.rows[source_index].position(product_id) else {
            return Outcome::Skipped(SkipReason::ProductNotInRow {
                row_id: source.to_string(),
                product_id: product_id.to_string(),
            });
        };

        // Removed first so that reordering within one row is not a duplicate.
        let product = self.grid.rows[source_index].products.remove(position);
        if self.grid.rows[dest_index].contains(product_id) {
            self.grid.rows[source_index].products.insert(position, product);
            return Outcome::Skipped(SkipReason::DuplicateInRow {
                row_id: dest.to_string(),
                product_id: product_id.to_string(),
            });
        }

        self.insert_into_row(dest_index, product, destination_index);
        Outcome::Applied
    }

    fn insert_into_row(&mut self, row_index: usize, product: Product, at: Option<usize>) {
        let products = &mut self.grid.rows[row_index].products;
        match at {
            Some(index) if index < products.len() => products.insert(index, product),
            _ => products.push(product),
        }
        if products.len() > MAX_PRODUCTS_PER_ROW {
            let overflow = products.split_off(MAX_PRODUCTS_PER_ROW);
            self.available.extend(overflow);
        }
    }

    /// Ids of every product in the layout, placed or not.
    pub fn product_ids(&self) -> BTreeSet<&str> {
        let placed = self.grid.rows.iter().flat_map(|r| r.products.iter());
        self.available
            .iter()
            .chain(placed)
            .map(|p| p.id.as_str())
            .collect()
    }

    /// Verify that every product appears once and no row exceeds capacity.
    pub fn check_invariants(&self) -> Result<(), LayoutViolation> {
        let mut row_ids = HashSet::new();
        for row in &self.grid.rows {
            if !row_ids.insert(row.id.as_str()) {
                return Err(LayoutViolation::DuplicateRow {
                    row_id: row.id.clone(),
                });
            }
            if row.len() > MAX_PRODUCTS_PER_ROW {
                return Err(LayoutViolation::RowOverCapacity {
                    row_id: row.id.clone(),
                    count: row.len(),
                    max: MAX_PRODUCTS_PER_ROW,
                });
            }
        }

        let mut seen = HashSet::new();
        let placed = self.grid.rows.iter().flat_map(|r| r.products.iter());
        for product in self.available.iter().chain(placed) {
            if !seen.insert(product.id.as_str()) {
                return Err(LayoutViolation::DuplicateProduct {
                    product_id: product.id.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        Product::new(id, format!("Product {id}"), format!("/images/{id}.jpg"), "$19.99")
    }

    fn pool(ids: &[&str]) -> Vec<Product> {
        ids.iter().map(|id| product(id)).collect()
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    fn row_ids(layout: &GridLayout, row_id: &str) -> Vec<String> {
        layout
            .row(row_id)
            .unwrap()
            .products
            .iter()
            .map(|p| p.id.clone())
            .collect()
    }

    #[test]
    fn new_drops_repeated_products() {
        let mut layout = GridLayout::new(pool(&["p1", "p2", "p1"]));
        assert_eq!(ids(layout.available()), ["p1", "p2"]);

        let a = layout.add_row();
        let b = layout.add_row();
        assert!(layout.move_product(None, Some(&a), "p1", None).is_applied());
        assert!(!layout.move_product(None, Some(&b), "p1", None).is_applied());
        assert!(layout.check_invariants().is_ok());
    }

    #[test]
    fn add_row_appends_empty_row() {
        let mut layout = GridLayout::default();
        let row_id = layout.add_row();

        assert_eq!(layout.rows().len(), 1);
        let row = layout.row(&row_id).unwrap();
        assert!(row.products.is_empty());
        assert!(row.template_id.is_none());
    }

    #[test]
    fn available_to_row_respects_cap() {
        let mut layout = GridLayout::new(pool(&["p1", "p2", "p3", "p4"]));
        let row = layout.add_row();

        for id in ["p1", "p2", "p3", "p4"] {
            layout.move_product(None, Some(&row), id, None);
        }

        assert_eq!(row_ids(&layout, &row), ["p1", "p2", "p3"]);
        assert_eq!(ids(layout.available()), ["p4"]);
    }

    #[test]
    fn insertion_at_front_evicts_tail() {
        let mut layout = GridLayout::new(pool(&["p1", "p2", "p3", "p4"]));
        let row = layout.add_row();
        for id in ["p1", "p2", "p3"] {
            layout.move_product(None, Some(&row), id, None);
        }

        let outcome = layout.move_product(None, Some(&row), "p4", Some(0));

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(row_ids(&layout, &row), ["p4", "p1", "p2"]);
        assert_eq!(ids(layout.available()), ["p3"]);
    }

    #[test]
    fn index_past_end_appends() {
        let mut layout = GridLayout::new(pool(&["p1", "p2"]));
        let row = layout.add_row();
        layout.move_product(None, Some(&row), "p1", None);
        layout.move_product(None, Some(&row), "p2", Some(10));

        assert_eq!(row_ids(&layout, &row), ["p1", "p2"]);
    }

    #[test]
    fn row_to_available_appends_to_pool() {
        let mut layout = GridLayout::new(pool(&["p1", "p2", "p3"]));
        let row = layout.add_row();
        layout.move_product(None, Some(&row), "p1", None);
        layout.move_product(None, Some(&row), "p2", None);

        let outcome = layout.move_product(Some(&row), None, "p1", None);

        assert!(outcome.is_applied());
        assert_eq!(row_ids(&layout, &row), ["p2"]);
        assert_eq!(ids(layout.available()), ["p3", "p1"]);
    }

    #[test]
    fn row_to_row_with_overflow() {
        let mut layout = GridLayout::new(pool(&["p1", "p2", "p3", "p4"]));
        let first = layout.add_row();
        let second = layout.add_row();
        for id in ["p1", "p2", "p3"] {
            layout.move_product(None, Some(&first), id, None);
        }
        layout.move_product(None, Some(&second), "p4", None);

        layout.move_product(Some(&second), Some(&first), "p4", Some(1));

        assert_eq!(row_ids(&layout, &first), ["p1", "p4", "p2"]);
        assert!(layout.row(&second).unwrap().products.is_empty());
        assert_eq!(ids(layout.available()), ["p3"]);
    }

    #[test]
    fn reorder_within_same_row() {
        let mut layout = GridLayout::new(pool(&["p1", "p2", "p3"]));
        let row = layout.add_row();
        for id in ["p1", "p2", "p3"] {
            layout.move_product(None, Some(&row), id, None);
        }

        let outcome = layout.move_product(Some(&row), Some(&row), "p3", Some(0));

        assert!(outcome.is_applied());
        assert_eq!(row_ids(&layout, &row), ["p3", "p1", "p2"]);
        assert!(layout.available().is_empty());
    }

    #[test]
    fn missing_product_is_skipped() {
        let mut layout = GridLayout::new(pool(&["p1"]));
        let row = layout.add_row();
        let before = layout.clone();

        let outcome = layout.move_product(None, Some(&row), "p9", None);

        assert!(matches!(
            outcome,
            Outcome::Skipped(SkipReason::ProductNotAvailable { .. })
        ));
        assert_eq!(layout, before);
    }

    #[test]
    fn missing_destination_keeps_product_in_pool() {
        let mut layout = GridLayout::new(pool(&["p1"]));

        let outcome = layout.move_product(None, Some("row-gone"), "p1", None);

        assert!(matches!(
            outcome,
            Outcome::Skipped(SkipReason::RowNotFound { .. })
        ));
        assert_eq!(ids(layout.available()), ["p1"]);
    }

    #[test]
    fn pool_to_pool_is_skipped() {
        let mut layout = GridLayout::new(pool(&["p1"]));
        let outcome = layout.move_product(None, None, "p1", None);
        assert_eq!(outcome, Outcome::Skipped(SkipReason::NoEndpoints));
    }

    #[test]
    fn duplicate_destination_restores_source() {
        // The public API never produces this layout, so build one by hand.
        let shared = product("p1");
        let mut a = Row::with_id("a");
        a.products = vec![product("p0"), shared.clone()];
        let mut b = Row::with_id("b");
        b.products = vec![shared];
        let mut layout = GridLayout {
            grid: Grid {
                id: None,
                rows: vec![a, b],
            },
            available: Vec::new(),
        };

        let outcome = layout.move_product(Some("a"), Some("b"), "p1", None);

        assert!(matches!(
            outcome,
            Outcome::Skipped(SkipReason::DuplicateInRow { .. })
        ));
        assert_eq!(row_ids(&layout, "a"), ["p0", "p1"]);
    }

    #[test]
    fn remove_row_returns_products_and_is_idempotent() {
        let mut layout = GridLayout::new(pool(&["p1", "p2", "p3"]));
        let row = layout.add_row();
        layout.move_product(None, Some(&row), "p1", None);
        layout.move_product(None, Some(&row), "p2", None);

        assert!(layout.remove_row(&row).is_applied());
        assert!(layout.rows().is_empty());
        assert_eq!(ids(layout.available()), ["p3", "p1", "p2"]);

        let second = layout.remove_row(&row);
        assert!(matches!(
            second,
            Outcome::Skipped(SkipReason::RowNotFound { .. })
        ));
    }

    #[test]
    fn move_row_splices() {
        let mut layout = GridLayout::default();
        let r0 = layout.add_row();
        let r1 = layout.add_row();
        let r2 = layout.add_row();

        layout.move_row(0, 2);

        let order: Vec<&str> = layout.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(order, [r1.as_str(), r2.as_str(), r0.as_str()]);
    }

    #[test]
    fn move_row_same_index_is_noop() {
        let mut layout = GridLayout::default();
        layout.add_row();
        layout.add_row();
        assert_eq!(layout.move_row(1, 1), Outcome::Skipped(SkipReason::SameIndex));
    }

    #[test]
    fn move_row_out_of_range() {
        let mut layout = GridLayout::default();
        let r0 = layout.add_row();
        let r1 = layout.add_row();

        assert_eq!(
            layout.move_row(5, 0),
            Outcome::Skipped(SkipReason::RowIndexOutOfRange { index: 5, len: 2 })
        );

        // Destination past the end lands on the last slot.
        assert!(layout.move_row(0, 99).is_applied());
        let order: Vec<&str> = layout.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(order, [r1.as_str(), r0.as_str()]);
    }

    #[test]
    fn update_template() {
        let mut layout = GridLayout::default();
        let row = layout.add_row();

        assert!(layout.update_row_template(&row, "template1").is_applied());
        assert_eq!(
            layout.row(&row).unwrap().template_id.as_deref(),
            Some("template1")
        );
        assert!(!layout.update_row_template("missing", "template1").is_applied());
    }

    #[test]
    fn locate_reports_placement() {
        let mut layout = GridLayout::new(pool(&["p1", "p2"]));
        let row = layout.add_row();
        layout.move_product(None, Some(&row), "p2", None);

        assert_eq!(layout.locate("p1"), Some(Placement::Available { index: 0 }));
        assert_eq!(
            layout.locate("p2"),
            Some(Placement::Row {
                row_id: row.clone(),
                index: 0
            })
        );
        assert_eq!(layout.locate("p3"), None);
    }

    #[test]
    fn from_parts_rejects_duplicates() {
        let mut row = Row::with_id("row-1");
        row.products.push(product("p1"));
        let grid = Grid {
            id: None,
            rows: vec![row],
        };

        let result = GridLayout::from_parts(grid, pool(&["p1"]));

        assert_eq!(
            result.unwrap_err(),
            LayoutViolation::DuplicateProduct {
                product_id: "p1".to_string()
            }
        );
    }

    #[test]
    fn from_parts_rejects_oversized_rows() {
        let mut row = Row::with_id("row-1");
        row.products = pool(&["p1", "p2", "p3", "p4"]);
        let grid = Grid {
            id: None,
            rows: vec![row],
        };

        let result = GridLayout::from_parts(grid, Vec::new());

        assert!(matches!(
            result,
            Err(LayoutViolation::RowOverCapacity { count: 4, .. })
        ));
    }
}
