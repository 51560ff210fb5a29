//! Catalog boundary: the provider trait and an in-memory implementation.

mod memory;
mod provider;

pub use memory::InMemoryCatalog;
pub use provider::{parse_ids, CatalogError, CatalogProvider, SaveReceipt};
