//! Save-time validation of a grid.
//!
//! Rules are evaluated with Stillwater's `Validation` type so that every
//! violation of every row is reported in one pass, rather than stopping at
//! the first broken row.
//!
//! # Example
//!
//! ```rust
//! use product_grid::core::{Grid, Row};
//! use product_grid::validation::SaveRules;
//!
//! let mut grid = Grid::new();
//! grid.rows.push(Row::with_id("row-1"));
//!
//! let violations = SaveRules::standard().check(&grid).unwrap_err();
//! assert_eq!(violations.len(), 2); // no products, no template
//! ```

pub mod builder;
pub mod rules;
pub mod violations;

pub use builder::SaveRulesBuilder;
pub use rules::{RowCheck, SaveRules};
pub use violations::{
    summary_message, RowViolation, LOAD_DATA_FAILED, PRODUCTS_REQUIRED, ROW_VALIDATION,
    SAVE_GRID_FAILED, TEMPLATE_REQUIRED,
};
