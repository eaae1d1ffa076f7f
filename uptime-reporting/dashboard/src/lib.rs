//! Uptime Dashboard Library
//!
//! Fetches the instant feed and daily counters from the reporting API,
//! aggregates them and turns them into Chart.js configurations and an
//! HTML page drawing them.

pub mod aggregate;
pub mod charts;
pub mod client;
pub mod dashboard;
pub mod page;
pub mod errors;

pub use aggregate::{PercentagePair, to_percentages};
pub use client::{ApiClient, Fetched};
pub use dashboard::Dashboard;
pub use page::render_page;
pub use errors::{DashboardError, Result};
