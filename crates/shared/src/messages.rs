//! WebSocket message types
//!
//! ## Versioning Policy
//!
//! - New variants can be added at the end (forward compatible)
//! - Renaming variants is a breaking change
//! - Unknown variants deserialize to `Unknown`

use serde::{Deserialize, Serialize};

use crate::dto::InventoryDto;
use crate::responses::ErrorCode;

fn default_one() -> i64 {
    1
}

// =============================================================================
// Client Messages (client -> engine)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Add to an item's quantity, creating it if absent
    AddItem {
        name: String,
        #[serde(default = "default_one")]
        quantity: i64,
    },
    /// Overwrite an item's quantity
    UpdateItem { name: String, quantity: i64 },
    /// Delete an item if it exists
    RemoveItem { name: String },
    /// Re-read the whole collection
    Refresh,
    /// Heartbeat
    Ping,
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Server Messages (engine -> client)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// A new inventory snapshot was published
    InventoryUpdated { inventory: InventoryDto },
    /// A client request failed
    Error { code: ErrorCode, message: String },
    Pong,
    #[serde(other)]
    Unknown,
}
