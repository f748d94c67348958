use crate::{engine::OrderHistoryEngine, orders::Order};
use std::sync::{Arc, Mutex};

/// Shared handle to the engine for concurrent callers.
///
/// Ingest is a read-then-append (duplicate check, average over current
/// history, push), so every access goes through the one mutex; readers
/// that only need a point-in-time view can clone a snapshot and release
/// the lock.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Mutex<OrderHistoryEngine>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            engine: Arc::new(Mutex::new(OrderHistoryEngine::new())),
        }
    }

    pub fn with_history(history: Vec<Order>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(OrderHistoryEngine::with_history(history))),
        }
    }

    /// Point-in-time copy of the history for lock-free reading.
    pub fn snapshot(&self) -> Vec<Order> {
        self.engine.lock().unwrap().history().to_vec()
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new()
    }
}
