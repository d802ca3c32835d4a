//! Pantry Protocol - Shared types for the engine and its clients
//!
//! This crate contains the types exchanged over HTTP and WebSocket:
//! - Wire-format DTOs for items and inventory snapshots
//! - REST request bodies and query strings
//! - WebSocket message types (ClientMessage, ServerMessage)
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json and chrono
//! 2. **No business logic** - Pure data types and serialization
//! 3. **Plain strings on the wire** - names are validated by the engine, not here

pub mod dto;
pub mod messages;
pub mod requests;
pub mod responses;

pub use dto::{InventoryDto, ItemDto};
pub use messages::{ClientMessage, ServerMessage};
pub use requests::{AddItemRequest, ListItemsQuery, UpdateItemRequest};
pub use responses::{ErrorCode, ErrorResponse};
