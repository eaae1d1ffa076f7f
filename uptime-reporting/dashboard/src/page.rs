//! Standalone HTML page drawing the dashboard with Chart.js

use crate::dashboard::Dashboard;
use crate::errors::Result;

const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@2.9.4/dist/Chart.bundle.min.js";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Uptime</title>
  <script src="__CHART_JS_URL__"></script>
  <style>
    body { font-family: sans-serif; margin: 1em; }
    .row { display: flex; flex-wrap: wrap; }
    .chart { position: relative; flex: 1 1 20em; height: 16em; margin: 0.5em; }
    .wide { flex-basis: 100%; }
  </style>
</head>
<body>
  <div class="row">
    <div class="chart"><canvas id="chart-today"></canvas></div>
    <div class="chart"><canvas id="chart-lifetime"></canvas></div>
  </div>
  <div class="row">
    <div class="chart wide"><canvas id="chart-instant"></canvas></div>
    <div class="chart wide"><canvas id="chart-30days"></canvas></div>
  </div>
  <script>
    "use strict";
    var charts = __CHARTS__;
    Object.keys(charts).forEach(function (id) {
      var config = charts[id];
      var scales = config.options.scales || {};
      (scales.yAxes || []).forEach(function (axis) {
        if (axis.ticks && axis.ticks.tickLabels) {
          var labels = axis.ticks.tickLabels;
          axis.ticks.callback = function (value) { return labels[String(value)]; };
        }
      });
      new Chart(document.getElementById(id), config);
    });
  </script>
</body>
</html>
"#;

/// Render the dashboard as a page. Charts absent from `dashboard` leave
/// their canvas blank.
pub fn render_page(dashboard: &Dashboard) -> Result<String> {
    // "</" inside the inline script would close the element early
    let charts = serde_json::to_string(dashboard)?.replace("</", "<\\/");

    Ok(TEMPLATE
        .replace("__CHART_JS_URL__", CHART_JS_URL)
        .replace("__CHARTS__", &charts))
}
