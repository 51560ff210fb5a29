//! Save errors surfaced by the editor.

use crate::catalog::CatalogError;
use crate::validation::{summary_message, RowViolation, SAVE_GRID_FAILED};
use thiserror::Error;

/// Why a save did not go through
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SaveError {
    /// The grid broke the save rules; the catalog was not called
    #[error("Grid failed validation with {} violation(s)", .0.len())]
    Validation(Vec<RowViolation>),

    /// The catalog rejected or failed the save
    #[error("Persisting grid failed: {0}")]
    Persistence(#[from] CatalogError),
}

impl SaveError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(violations) => summary_message(violations),
            Self::Persistence(_) => SAVE_GRID_FAILED,
        }
    }
}
