//! Row violations and the messages shown for them.

use thiserror::Error;

/// Shown when the initial catalog load fails.
pub const LOAD_DATA_FAILED: &str = "Failed to load data. Please try again.";
/// Shown when the catalog rejects or fails a save.
pub const SAVE_GRID_FAILED: &str = "Failed to save grid. Please try again.";
pub const TEMPLATE_REQUIRED: &str = "All rows must have a template assigned before saving.";
pub const PRODUCTS_REQUIRED: &str = "All rows must have at least one product before saving.";
pub const ROW_VALIDATION: &str = "All rows must have 1-3 products and a template assigned";

/// A rule a row broke at save time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RowViolation {
    #[error("Row '{row_id}' has no products")]
    EmptyRow { row_id: String },

    #[error("Row '{row_id}' has {count} products (min {min})")]
    TooFewProducts {
        row_id: String,
        count: usize,
        min: usize,
    },

    #[error("Row '{row_id}' has {count} products (max {max})")]
    TooManyProducts {
        row_id: String,
        count: usize,
        max: usize,
    },

    #[error("Row '{row_id}' has no template assigned")]
    MissingTemplate { row_id: String },

    #[error("Row '{row_id}' failed check: {message}")]
    Custom { row_id: String, message: String },
}

impl RowViolation {
    pub fn row_id(&self) -> &str {
        match self {
            Self::EmptyRow { row_id }
            | Self::TooFewProducts { row_id, .. }
            | Self::TooManyProducts { row_id, .. }
            | Self::MissingTemplate { row_id }
            | Self::Custom { row_id, .. } => row_id,
        }
    }
}

/// Pick the single message to surface for a set of violations.
///
/// Empty rows win over missing templates; anything else gets the generic
/// row message.
pub fn summary_message<'a>(violations: impl IntoIterator<Item = &'a RowViolation>) -> &'static str {
    let mut missing_template = false;
    for violation in violations {
        match violation {
            RowViolation::EmptyRow { .. } => return PRODUCTS_REQUIRED,
            RowViolation::MissingTemplate { .. } => missing_template = true,
            _ => {}
        }
    }
    if missing_template {
        TEMPLATE_REQUIRED
    } else {
        ROW_VALIDATION
    }
}
