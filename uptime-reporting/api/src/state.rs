use std::sync::Arc;

use uptime_collector::UptimeStore;

// App state
pub struct AppState {
   pub store: Arc<UptimeStore>,
}

impl AppState {
    pub fn new(store: Arc<UptimeStore>) -> Self {
        Self { store }
    }
}
