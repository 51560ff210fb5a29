//! Snapshot error types.

use crate::core::LayoutViolation;
use thiserror::Error;

/// Errors that can occur while capturing or restoring a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The captured layout breaks a layout invariant
    #[error("Snapshot layout is inconsistent: {0}")]
    InvalidLayout(#[from] LayoutViolation),

    /// The snapshot covers a different set of products than the editor
    #[error("Snapshot products differ: {missing:?} missing, {unexpected:?} unexpected")]
    ProductSetMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
}
