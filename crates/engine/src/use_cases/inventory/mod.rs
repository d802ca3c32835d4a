//! Inventory use cases.
//!
//! Keeps the locally displayed list in step with the remote item store.

mod error;
mod synchronizer;

pub use error::InventoryError;
pub use synchronizer::InventorySynchronizer;
