//! Uptime records shared by the store, the reporting API and the dashboard

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Per-day check counters. `day` is the local calendar date of the checks.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyRecord {
    pub day: NaiveDate,
    pub up: u64,
    pub down: u64,
}

/// Result of a single connectivity check.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstantRecord {
    pub timestamp: DateTime<Utc>,
    pub up: bool,
}

/// Wrapper used by every reporting API response: `{ "data": [...] }`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,
}

impl DailyRecord {
    pub fn new(day: NaiveDate, up: u64, down: u64) -> Self {
        Self { day, up, down }
    }
}

impl InstantRecord {
    pub fn new(timestamp: DateTime<Utc>, up: bool) -> Self {
        Self { timestamp, up }
    }
}

impl<T> DataEnvelope<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> Vec<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_daily_record_wire_format() {
        let record = DailyRecord::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 2870, 10);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json, serde_json::json!({"day": "2024-03-01", "up": 2870, "down": 10}));
    }

    #[test]
    fn test_instant_envelope_parsing() {
        let body = r#"{"data":[{"timestamp":"2024-03-01T10:00:00Z","up":true},
                               {"timestamp":"2024-03-01T10:00:30Z","up":false}]}"#;
        let envelope: DataEnvelope<InstantRecord> = serde_json::from_str(body).unwrap();

        assert_eq!(envelope.data.len(), 2);
        assert_eq!(
            envelope.data[0].timestamp,
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
        );
        assert!(!envelope.data[1].up);
    }
}
