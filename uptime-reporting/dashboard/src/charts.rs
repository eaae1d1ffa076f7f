//! Chart.js (2.x) configuration objects for the uptime charts

use crate::aggregate::{self, PercentagePair};
use chrono::SecondsFormat;
use serde::Serialize;
use std::collections::BTreeMap;
use uptime_collector::{DailyRecord, InstantRecord};

pub const COLOR_BACKGROUND_UP: &str = "rgba(18, 190, 53, 0.2)";
pub const COLOR_BORDER_UP: &str = "rgba(18, 190, 53, 1)";
pub const COLOR_BACKGROUND_DOWN: &str = "rgba(252, 138, 7, 0.2)";
pub const COLOR_BORDER_DOWN: &str = "rgba(252, 138, 7, 1)";
const COLOR_POINT_BACKGROUND: &str = "#fff";

const DOUGHNUT_CUTOUT_PERCENTAGE: u32 = 33;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Line,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// One color for the whole dataset or one per data point
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Colors {
    Single(String),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: Colors,
    pub border_color: Colors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(flatten)]
    pub line: Option<LineStyle>,
}

/// Line and point styling shared by the instant and 30-day charts
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub fill: bool,
    pub line_tension: f64,
    pub stepped_line: bool,
    pub border_cap_style: String,
    pub border_dash: Vec<u32>,
    pub border_dash_offset: f64,
    pub border_join_style: String,
    pub point_border_color: String,
    pub point_background_color: String,
    pub point_border_width: u32,
    pub point_hover_radius: u32,
    pub point_hover_background_color: String,
    pub point_hover_border_color: String,
    pub point_hover_border_width: u32,
    pub point_radius: u32,
    pub point_hit_radius: u32,
    pub span_gaps: bool,
}

impl LineStyle {
    fn up(stepped_line: bool) -> Self {
        Self {
            fill: true,
            line_tension: 0.1,
            stepped_line,
            border_cap_style: "butt".to_string(),
            border_dash: Vec::new(),
            border_dash_offset: 0.0,
            border_join_style: "miter".to_string(),
            point_border_color: COLOR_BORDER_UP.to_string(),
            point_background_color: COLOR_POINT_BACKGROUND.to_string(),
            point_border_width: 1,
            point_hover_radius: 5,
            point_hover_background_color: COLOR_BACKGROUND_UP.to_string(),
            point_hover_border_color: COLOR_BORDER_UP.to_string(),
            point_hover_border_width: 2,
            point_radius: 1,
            point_hit_radius: 10,
            span_gaps: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    pub maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutout_percentage: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Legend {
    pub display: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Scales {
    pub x_axes: Vec<Axis>,
    pub y_axes: Vec<Axis>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Axis {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeScale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeScale {
    pub unit: String,
    pub unit_step_size: u32,
    pub display_formats: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    /// Tick value to label. Not a Chart.js option: the dashboard page turns
    /// it into a `callback`, which JSON cannot express.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_labels: Option<BTreeMap<String, String>>,
}

fn time_axis(unit: &str, step: u32, format: &str) -> Axis {
    Axis {
        kind: Some("time".to_string()),
        time: Some(TimeScale {
            unit: unit.to_string(),
            unit_step_size: step,
            display_formats: BTreeMap::from([(unit.to_string(), format.to_string())]),
        }),
        ..Axis::default()
    }
}

fn doughnut_chart(title: &str, pct: PercentagePair) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: vec!["Up".to_string(), "Down".to_string()],
            datasets: vec![Dataset {
                label: title.to_string(),
                data: vec![pct.up, pct.down],
                background_color: Colors::PerPoint(vec![
                    COLOR_BACKGROUND_UP.to_string(),
                    COLOR_BACKGROUND_DOWN.to_string(),
                ]),
                border_color: Colors::PerPoint(vec![
                    COLOR_BORDER_UP.to_string(),
                    COLOR_BORDER_DOWN.to_string(),
                ]),
                border_width: Some(1),
                line: None,
            }],
        },
        options: ChartOptions {
            title: Title {
                display: true,
                text: title.to_string(),
            },
            legend: None,
            maintain_aspect_ratio: false,
            cutout_percentage: Some(DOUGHNUT_CUTOUT_PERCENTAGE),
            scales: None,
        },
    }
}

fn line_chart(
    title: &str,
    label: &str,
    labels: Vec<String>,
    data: Vec<f64>,
    stepped: bool,
    scales: Scales,
) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: label.to_string(),
                data,
                background_color: Colors::Single(COLOR_BACKGROUND_UP.to_string()),
                border_color: Colors::Single(COLOR_BORDER_UP.to_string()),
                border_width: None,
                line: Some(LineStyle::up(stepped)),
            }],
        },
        options: ChartOptions {
            title: Title {
                display: true,
                text: title.to_string(),
            },
            legend: Some(Legend { display: false }),
            maintain_aspect_ratio: false,
            cutout_percentage: None,
            scales: Some(scales),
        },
    }
}

/// Doughnut of today's up/down split
pub fn today_chart(pct: PercentagePair) -> ChartConfig {
    doughnut_chart("Uptime Today", pct)
}

/// Doughnut of the all-time up/down split
pub fn lifetime_chart(pct: PercentagePair) -> ChartConfig {
    doughnut_chart("Lifetime Uptime", pct)
}

/// Stepped up/down line over the instant feed
pub fn instant_chart(records: &[InstantRecord]) -> ChartConfig {
    let (timestamps, states) = aggregate::instant_states(records);
    let labels = timestamps
        .iter()
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .collect();

    let y_axis = Axis {
        ticks: Some(Ticks {
            min: Some(0.0),
            max: Some(1.0),
            step_size: Some(1.0),
            tick_labels: Some(BTreeMap::from([
                ("0".to_string(), "Down".to_string()),
                ("1".to_string(), "Up".to_string()),
            ])),
            ..Ticks::default()
        }),
        ..Axis::default()
    };

    line_chart(
        "Instant feed",
        "Instant Uptime",
        labels,
        states.into_iter().map(f64::from).collect(),
        true,
        Scales {
            x_axes: vec![time_axis("hour", 2, "HH:mm")],
            y_axes: vec![y_axis],
        },
    )
}

/// Daily uptime percentage line, one point per day of `records`
pub fn thirty_day_chart(records: &[DailyRecord]) -> ChartConfig {
    let (days, uptimes) = aggregate::daily_uptime_series(records);
    let labels = days.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();

    let y_axis = Axis {
        display: Some(true),
        ticks: Some(Ticks {
            begin_at_zero: Some(true),
            ..Ticks::default()
        }),
        ..Axis::default()
    };

    line_chart(
        "30 Days Uptime",
        "Daily Uptime",
        labels,
        uptimes,
        false,
        Scales {
            x_axes: vec![time_axis("day", 5, "MMM DD")],
            y_axes: vec![y_axis],
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::to_percentages;
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_today_chart_config() {
        let config = today_chart(to_percentages(90, 10).unwrap());
        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(value["type"], "doughnut");
        assert_eq!(value["data"]["labels"], json!(["Up", "Down"]));
        assert_eq!(value["data"]["datasets"][0]["label"], "Uptime Today");
        assert_eq!(value["data"]["datasets"][0]["data"], json!([90.0, 10.0]));
        assert_eq!(
            value["data"]["datasets"][0]["backgroundColor"],
            json!([COLOR_BACKGROUND_UP, COLOR_BACKGROUND_DOWN])
        );
        assert_eq!(value["data"]["datasets"][0]["borderWidth"], 1);
        assert_eq!(value["options"]["cutoutPercentage"], 33);
        assert_eq!(value["options"]["maintainAspectRatio"], false);
        assert!(value["options"].get("scales").is_none());
        assert!(value["data"]["datasets"][0].get("fill").is_none());
    }

    #[test]
    fn test_lifetime_chart_title() {
        let config = lifetime_chart(to_percentages(95, 5).unwrap());

        assert_eq!(config.options.title.text, "Lifetime Uptime");
        assert_eq!(config.data.datasets[0].label, "Lifetime Uptime");
    }

    #[test]
    fn test_instant_chart_config() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let records = vec![
            InstantRecord::new(t0, true),
            InstantRecord::new(t0 + chrono::Duration::seconds(30), false),
        ];
        let value = serde_json::to_value(instant_chart(&records)).unwrap();

        assert_eq!(value["type"], "line");
        assert_eq!(
            value["data"]["labels"],
            json!(["2024-03-01T10:00:00Z", "2024-03-01T10:00:30Z"])
        );
        let dataset = &value["data"]["datasets"][0];
        assert_eq!(dataset["data"], json!([1.0, 0.0]));
        assert_eq!(dataset["steppedLine"], true);
        assert_eq!(dataset["fill"], true);
        assert_eq!(dataset["pointHitRadius"], 10);
        assert_eq!(dataset["backgroundColor"], COLOR_BACKGROUND_UP);
        assert_eq!(value["options"]["legend"]["display"], false);

        let x_axis = &value["options"]["scales"]["xAxes"][0];
        assert_eq!(x_axis["type"], "time");
        assert_eq!(x_axis["time"]["unitStepSize"], 2);
        assert_eq!(x_axis["time"]["displayFormats"]["hour"], "HH:mm");

        let ticks = &value["options"]["scales"]["yAxes"][0]["ticks"];
        assert_eq!(ticks["max"], 1.0);
        assert_eq!(ticks["tickLabels"], json!({"0": "Down", "1": "Up"}));
    }

    #[test]
    fn test_thirty_day_chart_config() {
        let records = vec![
            DailyRecord::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 95, 5),
            DailyRecord::new(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(), 97, 3),
        ];
        let value = serde_json::to_value(thirty_day_chart(&records)).unwrap();

        assert_eq!(value["options"]["title"]["text"], "30 Days Uptime");
        assert_eq!(value["data"]["labels"], json!(["2024-03-01", "2024-03-02"]));
        assert_eq!(value["data"]["datasets"][0]["data"], json!([95.0, 97.0]));
        assert_eq!(value["data"]["datasets"][0]["steppedLine"], false);
        assert_eq!(
            value["options"]["scales"]["xAxes"][0]["time"]["displayFormats"]["day"],
            "MMM DD"
        );
        assert_eq!(value["options"]["scales"]["yAxes"][0]["ticks"]["beginAtZero"], true);
    }
}
