//! Catalog and grid data types.
//!
//! Products and templates are immutable values supplied by the catalog.
//! Rows and the grid are owned and mutated by [`GridLayout`](super::GridLayout).

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum number of products a single row may hold.
pub const MAX_PRODUCTS_PER_ROW: usize = 3;

/// A catalog item that can be placed into a row.
///
/// Identity is the `id`; two products with the same id are the same product.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub price: String,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        image_url: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: image_url.into(),
            price: price.into(),
        }
    }
}

/// Horizontal alignment applied to the products of a row.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "LEFT",
            Self::Center => "CENTER",
            Self::Right => "RIGHT",
        };
        f.write_str(name)
    }
}

/// A named alignment policy for rows.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub alignment: Alignment,
}

impl Template {
    pub fn new(id: impl Into<String>, name: impl Into<String>, alignment: Alignment) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            alignment,
        }
    }
}

/// An ordered container of up to [`MAX_PRODUCTS_PER_ROW`] products.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: String,
    pub template_id: Option<String>,
    pub products: Vec<Product>,
}

impl Row {
    /// Create an empty row with a freshly generated id and no template.
    pub fn new() -> Self {
        Self {
            id: format!("row-{}", Uuid::new_v4()),
            template_id: None,
            products: Vec::new(),
        }
    }

    /// Create an empty row with a caller-chosen id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            template_id: None,
            products: Vec::new(),
        }
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.products.iter().any(|p| p.id == product_id)
    }

    pub fn position(&self, product_id: &str) -> Option<usize> {
        self.products.iter().position(|p| p.id == product_id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

/// The editable layout: an ordered sequence of rows.
///
/// `id` stays `None` until the grid has been persisted once.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Grid {
    #[serde(default)]
    pub id: Option<String>,
    pub rows: Vec<Row>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self, row_id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == row_id)
    }

    pub(crate) fn row_index(&self, row_id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.id == row_id)
    }

    /// Total number of products placed across all rows.
    pub fn placed_count(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }
}
