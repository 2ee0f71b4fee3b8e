use std::sync::Arc;
use std::time::Instant;

use crate::gesture::GestureEngine;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
    engine: Arc<GestureEngine>,
    started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<Store>, engine: Arc<GestureEngine>) -> Self {
        Self {
            store,
            engine,
            started_at: Instant::now(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn engine(&self) -> &GestureEngine {
        &self.engine
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
