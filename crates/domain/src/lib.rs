//! Pantry Domain - Core domain types and invariants.
//!
//! This crate has no I/O. It defines what an inventory item is, how quantities
//! combine, what a display snapshot looks like, and how the list is filtered.

pub mod entities;
pub mod error;
pub mod filter;
pub mod value_objects;

pub use entities::{DisplayList, Item};
pub use error::DomainError;
pub use filter::filter_items;
pub use value_objects::{ItemName, Quantity};
