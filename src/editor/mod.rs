//! The imperative shell: async load and save around the pure layout.
//!
//! [`GridEditor`] is what a presentation layer holds on to. It exposes the
//! current grid, pool, templates, load status and error message, plus the
//! mutation operations. Stale references never fail; they come back as
//! [`Outcome::Skipped`](crate::core::Outcome::Skipped), are logged at debug
//! level and kept in the journal.

mod error;
mod shell;
mod zoom;

pub use error::SaveError;
pub use shell::GridEditor;
pub use zoom::Zoom;
