//! Pantry Engine library.
//!
//! Server-side inventory tracking over a remote item store.
//!
//! ## Structure
//!
//! - `use_cases/` - Inventory synchronization
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP and WebSocket entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
