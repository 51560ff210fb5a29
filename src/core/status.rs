//! Observable phases of the editor and of individual rows.
//!
//! Both phase types implement [`Status`], which provides pure methods for
//! inspecting a phase without side effects.

use super::model::{Row, MAX_PRODUCTS_PER_ROW};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for phase values exposed to the presentation layer.
///
/// # Example
///
/// ```rust
/// use product_grid::core::{LoadStatus, Status};
///
/// let status = LoadStatus::Pending;
/// assert_eq!(status.name(), "Pending");
/// assert!(!status.is_terminal());
/// assert!(LoadStatus::Failed.is_error());
/// ```
pub trait Status: Clone + PartialEq + Debug + Send + Sync {
    /// Name for display/logging.
    fn name(&self) -> &str;

    /// Check if no further automatic progress is expected from this phase.
    ///
    /// Default implementation returns `false`.
    fn is_terminal(&self) -> bool {
        false
    }

    /// Check if this phase represents a failure.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Progress of the one-shot catalog load.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum LoadStatus {
    /// Load not started or still in flight.
    #[default]
    Pending,
    /// Products and templates are available.
    Ready,
    /// Load failed; there is no automatic retry.
    Failed,
}

impl Status for LoadStatus {
    fn name(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Ready => "Ready",
            Self::Failed => "Failed",
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// How full a row is, independent of its template.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum RowFill {
    Empty,
    Partial,
    Full,
}

impl RowFill {
    pub fn of(row: &Row) -> Self {
        match row.len() {
            0 => Self::Empty,
            n if n >= MAX_PRODUCTS_PER_ROW => Self::Full,
            _ => Self::Partial,
        }
    }
}

impl Status for RowFill {
    fn name(&self) -> &str {
        match self {
            Self::Empty => "Empty",
            Self::Partial => "Partial",
            Self::Full => "Full",
        }
    }

    /// A full row accepts new products only by evicting its tail.
    fn is_terminal(&self) -> bool {
        matches!(self, Self::Full)
    }

    /// Empty rows block saving.
    fn is_error(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
