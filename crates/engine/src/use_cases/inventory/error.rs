//! Inventory operation errors.

use crate::infrastructure::ports::StoreError;
use pantry_domain::DomainError;

/// Errors that can occur during inventory operations.
///
/// Every failure leaves the display list as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// Bad name, rejected before any remote call, or a merge that would
    /// overflow the stored count, rejected before anything is written.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),
    #[error("Remote store unavailable: {0}")]
    RemoteUnavailable(#[from] StoreError),
}
