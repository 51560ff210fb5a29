//! Product grid: the state engine behind a product-grid editor
//!
//! Products from a catalog are arranged into ordered rows of at most
//! three, each row carrying an alignment template. The crate follows a
//! "pure core, imperative shell" split: the layout logic is synchronous and
//! free of I/O, while loading and saving go through an injected catalog.
//!
//! # Core Concepts
//!
//! - **Layout**: [`GridLayout`] owns the rows and the pool of unplaced products
//! - **Outcome**: every mutation reports whether it applied or was skipped
//! - **Save rules**: accumulated validation of every row before persisting
//! - **Catalog**: the async [`CatalogProvider`] boundary
//! - **Editor**: [`GridEditor`] ties the above together for a UI
//!
//! # Example
//!
//! ```rust
//! use product_grid::core::{GridLayout, Product};
//!
//! let pool = ["p1", "p2", "p3", "p4"]
//!     .iter()
//!     .map(|id| Product::new(*id, "item", "", "9,99 EUR"))
//!     .collect();
//! let mut layout = GridLayout::new(pool);
//! let row = layout.add_row();
//!
//! for id in ["p1", "p2", "p3", "p4"] {
//!     layout.move_product(None, Some(&row), id, None);
//! }
//!
//! assert_eq!(layout.row(&row).unwrap().products.len(), 3);
//! assert_eq!(layout.available()[0].id, "p4");
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod editor;
pub mod snapshot;
pub mod telemetry;
pub mod validation;

// Re-export commonly used types
pub use catalog::{CatalogError, CatalogProvider, InMemoryCatalog, SaveReceipt};
pub use config::EditorConfig;
pub use crate::core::{Grid, GridLayout, LoadStatus, Outcome, Product, Row, Template};
pub use editor::{GridEditor, SaveError};
