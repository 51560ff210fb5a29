//! Core grid types and the state engine.
//!
//! This module contains the pure part of the crate:
//! - Catalog and grid data types
//! - The [`GridLayout`] engine and its mutation operations
//! - Load and row phases via the [`Status`] trait
//! - The journal of mutation requests
//!
//! Nothing in here performs I/O; the async shell lives in
//! [`editor`](crate::editor).

mod journal;
mod layout;
mod model;
mod status;

pub use journal::{EditJournal, EditOp, EditRecord, DEFAULT_JOURNAL_CAPACITY};
pub use layout::{GridLayout, LayoutViolation, Outcome, Placement, SkipReason};
pub use model::{Alignment, Grid, Product, Row, Template, MAX_PRODUCTS_PER_ROW};
pub use status::{LoadStatus, RowFill, Status};
