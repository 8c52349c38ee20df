//! Export mounted chart configs to JSON.
//!
//! The bundle is what a browser page would pass to the charting library, one
//! entry per canvas, plus the trend period slots so a front-end can switch
//! periods without re-reading the page.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::chart::ChartConfig;
use crate::dashboard::{ChartRegistry, Dashboard};
use crate::domain::TrendBundle;
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct ExportedChart<'a> {
    pub canvas: &'a str,
    pub config: &'a ChartConfig,
}

#[derive(Debug, Serialize)]
pub struct ConfigBundle<'a> {
    pub tool: &'static str,
    pub generated: DateTime<Local>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_period: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trends: Option<&'a TrendBundle>,
    pub charts: Vec<ExportedChart<'a>>,
}

impl<'a> ConfigBundle<'a> {
    pub fn from_dashboard(dash: &'a Dashboard<ChartRegistry>) -> Self {
        Self {
            tool: "charts",
            generated: Local::now(),
            active_period: dash.active_state().map(|s| s.period.control_arg()),
            trends: dash.period_store().map(|s| s.bundle()),
            charts: dash
                .backend()
                .iter()
                .map(|c| ExportedChart {
                    canvas: &c.canvas_id,
                    config: &c.config,
                })
                .collect(),
        }
    }
}

/// Serialize the bundle as pretty JSON text.
pub fn bundle_json(dash: &Dashboard<ChartRegistry>) -> Result<String, AppError> {
    serde_json::to_string_pretty(&ConfigBundle::from_dashboard(dash))
        .map_err(|e| AppError::runtime(format!("Failed to serialize chart configs: {e}")))
}

/// Write the bundle to `path`.
pub fn write_bundle_json(path: &Path, dash: &Dashboard<ChartRegistry>) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::runtime(format!("Failed to create export '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, &ConfigBundle::from_dashboard(dash))
        .map_err(|e| AppError::runtime(format!("Failed to write export JSON: {e}")))?;
    tracing::info!(path = %path.display(), "wrote chart configs");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::page::Page;

    #[test]
    fn bundle_lists_charts_and_active_period() {
        let page = Page::from_html(r#"<canvas id="donationChart"></canvas><canvas id="donationsTrendSparkline" data-trend="[1,2]"></canvas>"#);
        let mut dash = Dashboard::mount(&page, ChartRegistry::new());
        dash.switch_chart_period("year");

        let v: serde_json::Value = serde_json::from_str(&bundle_json(&dash).unwrap()).unwrap();
        assert_eq!(v["active_period"], "year");
        assert_eq!(v["charts"][0]["canvas"], "donationChart");
        assert_eq!(v["charts"][0]["config"]["options"]["plugins"]["title"]["text"], "Yearly Donations");
        assert_eq!(v["charts"][1]["config"]["data"]["datasets"][0]["data"][1], 2.0);
        assert_eq!(v["trends"]["monthly"]["labels"][0], "Week 1");
    }

    #[test]
    fn writes_bundle_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts.json");
        let dash = Dashboard::mount(&Page::default(), ChartRegistry::new());
        write_bundle_json(&path, &dash).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"charts\": []"));
    }
}
