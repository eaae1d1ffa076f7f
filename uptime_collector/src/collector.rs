//! Uptime collector: periodic connectivity checks and instant-feed cleanup

use crate::config::Config;
use crate::errors::{CollectorError, Result};
use crate::probe::{ConnectivityProbe, HttpProbe};
use crate::records::DailyRecord;
use crate::store::UptimeStore;

use chrono::{Local, Utc};
use std::sync::Arc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};

/// Main collector orchestrating the monitor and cleanup loops
#[derive(Clone)]
pub struct UptimeCollector {
    config: Config,
    probe: Arc<dyn ConnectivityProbe>,
    store: Arc<UptimeStore>,
}

/// Result of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub up: bool,
    pub today: DailyRecord,
}

impl UptimeCollector {
    /// Create a collector probing over HTTP, as configured
    pub fn new(config: Config, store: Arc<UptimeStore>) -> Result<Self> {
        config.validate().map_err(CollectorError::Config)?;
        let probe = Arc::new(HttpProbe::from_config(&config)?);
        Ok(Self::with_probe(config, store, probe))
    }

    /// Create a collector around any probe implementation
    pub fn with_probe(
        config: Config,
        store: Arc<UptimeStore>,
        probe: Arc<dyn ConnectivityProbe>,
    ) -> Self {
        Self {
            config,
            probe,
            store,
        }
    }

    pub fn store(&self) -> &Arc<UptimeStore> {
        &self.store
    }

    /// Start both loops and run until Ctrl-C
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<()> {
        info!(
            "Starting uptime collector: checking {} every {:?}",
            self.config.check_url, self.config.check_interval
        );

        let monitor = self.clone();
        let monitor_task = tokio::spawn(async move {
            monitor.monitor_uptime().await;
        });

        let cleaner = self.clone();
        let cleanup_task = tokio::spawn(async move {
            cleaner.cleanup_old_instant_data().await;
        });

        tokio::signal::ctrl_c().await.map_err(|e| {
            CollectorError::Other(format!("Failed to wait for shutdown signal: {}", e))
        })?;

        info!("Shutting down uptime collector");
        monitor_task.abort();
        cleanup_task.abort();
        Ok(())
    }

    /// Probe once and record the result
    pub async fn check_once(&self) -> Result<CheckOutcome> {
        let up = self.probe.is_up().await;

        if up {
            if self.config.log_up {
                info!("Internet is up!");
            }
        } else if self.config.log_down {
            warn!("Internet is DOWN!");
        }

        let store = Arc::clone(&self.store);
        let today = blocking(move || store.record_state(&Local::now(), up)).await?;
        Ok(CheckOutcome { up, today })
    }

    /// Periodically check whether the connection is up
    pub async fn monitor_uptime(&self) {
        let mut ticker = interval(self.config.check_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if let Err(e) = self.check_once().await {
                error!("Database error when recording state: {}", e);
            }
        }
    }

    /// Delete instant records that fell outside the dashboard's window
    pub async fn cleanup_once(&self) -> Result<usize> {
        let age = chrono::Duration::from_std(self.config.cleanup_threshold)
            .map_err(|e| CollectorError::Config(e.to_string()))?;
        let threshold = Utc::now().checked_sub_signed(age).ok_or_else(|| {
            CollectorError::Config(format!(
                "cleanup threshold {:?} is out of range",
                self.config.cleanup_threshold
            ))
        })?;

        let store = Arc::clone(&self.store);
        let deleted = blocking(move || store.delete_instant_before(threshold)).await?;
        debug!("Deleted {} instant records before {}", deleted, threshold);
        Ok(deleted)
    }

    /// Periodically run `cleanup_once`
    pub async fn cleanup_old_instant_data(&self) {
        let mut ticker = interval(self.config.cleanup_interval);

        loop {
            ticker.tick().await;

            if let Err(e) = self.cleanup_once().await {
                error!("Instant feed cleanup failed: {}", e);
            }
        }
    }
}

// SQLite calls hold a std mutex, keep them off the async workers
async fn blocking<T, F>(call: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| CollectorError::Other(format!("Store task failed: {}", e)))?
}
