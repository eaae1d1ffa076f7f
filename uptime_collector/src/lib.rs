//! Uptime Collector Library
//!
//! Periodically checks whether the internet is reachable and keeps the
//! results in SQLite: an instant feed of every check and per-day counters.

pub mod config;
pub mod collector;
pub mod probe;
pub mod records;
pub mod store;
pub mod errors;

pub use config::Config;
pub use collector::{CheckOutcome, UptimeCollector};
pub use probe::{ConnectivityProbe, HttpProbe};
pub use records::{DailyRecord, DataEnvelope, InstantRecord};
pub use store::UptimeStore;
pub use errors::{CollectorError, Result};
