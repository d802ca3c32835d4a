//! API layer - HTTP and WebSocket entry points.

pub mod cors;
pub mod http;
pub mod websocket;

pub use cors::cors_layer;
