//! The four dashboard charts, assembled from whatever data arrived

use crate::aggregate::{self, TRAILING_WINDOW_DAYS};
use crate::charts::{self, ChartConfig};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;
use uptime_collector::{DailyRecord, InstantRecord};

/// Chart configs keyed by the canvas they are drawn on. A chart whose data
/// is missing or empty is left out.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Dashboard {
    #[serde(rename = "chart-today", skip_serializing_if = "Option::is_none")]
    pub today: Option<ChartConfig>,
    #[serde(rename = "chart-lifetime", skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<ChartConfig>,
    #[serde(rename = "chart-instant", skip_serializing_if = "Option::is_none")]
    pub instant: Option<ChartConfig>,
    #[serde(rename = "chart-30days", skip_serializing_if = "Option::is_none")]
    pub thirty_days: Option<ChartConfig>,
}

impl Dashboard {
    /// Build every chart the given payloads allow. `None` stands for a
    /// request that failed.
    pub fn build(
        instant: Option<&[InstantRecord]>,
        daily: Option<&[DailyRecord]>,
        today: NaiveDate,
    ) -> Self {
        let mut dashboard = Dashboard::default();

        if let Some(records) = instant {
            dashboard.instant = Some(charts::instant_chart(records));
        }

        if let Some(records) = daily {
            dashboard.today = aggregate::select_today(records, today)
                .and_then(|r| aggregate::to_percentages(r.up, r.down))
                .map(charts::today_chart);
            if dashboard.today.is_none() {
                debug!("No checks recorded for {}", today);
            }

            let (up, down) = aggregate::sum_lifetime(records);
            dashboard.lifetime = aggregate::to_percentages(up, down).map(charts::lifetime_chart);

            let window = aggregate::select_trailing_window(records, today, TRAILING_WINDOW_DAYS);
            dashboard.thirty_days = Some(charts::thirty_day_chart(&window));
        }

        dashboard
    }

    /// Charts that will be drawn, with their canvas ids
    pub fn charts(&self) -> Vec<(&'static str, &ChartConfig)> {
        [
            ("chart-today", self.today.as_ref()),
            ("chart-lifetime", self.lifetime.as_ref()),
            ("chart-instant", self.instant.as_ref()),
            ("chart-30days", self.thirty_days.as_ref()),
        ]
        .into_iter()
        .filter_map(|(id, chart)| chart.map(|c| (id, c)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.charts().is_empty()
    }
}
