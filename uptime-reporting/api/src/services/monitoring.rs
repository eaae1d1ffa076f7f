use log::{error, info};
use std::sync::Arc;

use uptime_collector::{Config, UptimeCollector, UptimeStore};

// Run the uptime checks and the instant-feed cleanup until the server stops
pub async fn uptime_monitor(collector: UptimeCollector) {
    info!("Starting uptime monitor background task");

    tokio::join!(
        collector.monitor_uptime(),
        collector.cleanup_old_instant_data()
    );
}

// Build the in-process collector, or explain why there is none
pub fn embedded_collector(config: Config, store: Arc<UptimeStore>) -> Option<UptimeCollector> {
    match UptimeCollector::new(config, store) {
        Ok(collector) => Some(collector),
        Err(e) => {
            error!("Uptime monitor disabled: {}", e);
            None
        }
    }
}
