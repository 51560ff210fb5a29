//! Capture and restore of the editable layout.
//!
//! A snapshot holds the grid and the available pool, so an editing session
//! can be written out and picked up later. Restoring re-checks the layout
//! invariants before handing the layout back.

use crate::core::{Grid, GridLayout, Product};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable capture of a [`GridLayout`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    pub grid: Grid,

    pub available: Vec<Product>,
}

impl Snapshot {
    pub fn capture(layout: &GridLayout) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            grid: layout.grid().clone(),
            available: layout.available().to_vec(),
        }
    }

    /// Rebuild the layout, rejecting unknown versions and broken invariants.
    pub fn into_layout(self) -> Result<GridLayout, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(GridLayout::from_parts(self.grid, self.available)?)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(raw).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LayoutViolation, Row};

    fn sample_layout() -> GridLayout {
        let products = ["p1", "p2", "p3"]
            .iter()
            .map(|id| Product::new(*id, "item", "", "9,99 EUR"))
            .collect();
        let mut layout = GridLayout::new(products);
        let row = layout.add_row();
        layout.update_row_template(&row, "template2");
        layout.move_product(None, Some(&row), "p2", None);
        layout
    }

    #[test]
    fn json_restores_layout() {
        let layout = sample_layout();
        let json = Snapshot::capture(&layout).to_json().unwrap();

        let restored = Snapshot::from_json(&json).unwrap().into_layout().unwrap();

        assert_eq!(restored, layout);
    }

    #[test]
    fn binary_restores_layout() {
        let layout = sample_layout();
        let bytes = Snapshot::capture(&layout).to_bytes().unwrap();

        let restored = Snapshot::from_bytes(&bytes).unwrap().into_layout().unwrap();

        assert_eq!(restored, layout);
    }

    #[test]
    fn future_version_is_rejected() {
        let mut snapshot = Snapshot::capture(&sample_layout());
        snapshot.version = SNAPSHOT_VERSION + 1;

        let result = snapshot.into_layout();

        assert!(matches!(
            result,
            Err(SnapshotError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn duplicated_product_is_rejected() {
        let mut snapshot = Snapshot::capture(&sample_layout());
        let mut extra = Row::with_id("row-extra");
        extra.products.push(Product::new("p1", "item", "", "9,99 EUR"));
        snapshot.grid.rows.push(extra);

        let result = snapshot.into_layout();

        assert!(matches!(
            result,
            Err(SnapshotError::InvalidLayout(LayoutViolation::DuplicateProduct { .. }))
        ));
    }

    #[test]
    fn garbage_input_fails_to_parse() {
        assert!(matches!(
            Snapshot::from_json("{not json"),
            Err(SnapshotError::DeserializationFailed(_))
        ));
        assert!(matches!(
            Snapshot::from_bytes(&[1, 2, 3]),
            Err(SnapshotError::DeserializationFailed(_))
        ));
    }
}
