//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, ItemStore};
use crate::use_cases::InventorySynchronizer;

/// Main application state.
///
/// Passed to HTTP/WebSocket handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub inventory: Arc<InventorySynchronizer>,
}

impl App {
    /// Wire use cases onto the given store and clock.
    pub fn new(store: Arc<dyn ItemStore>, clock: Arc<dyn ClockPort>) -> Self {
        let inventory = Arc::new(InventorySynchronizer::new(store, clock));
        Self {
            use_cases: UseCases { inventory },
        }
    }
}
