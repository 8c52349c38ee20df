//! One builder per dashboard chart.
//!
//! Builders take already normalized data and only decide presentation:
//! chart family, colors, axes and tooltip style.

use crate::domain::{CampaignPerformance, SeriesData};
use crate::store::ActiveChartState;

use super::config::{
    Animation, Axis, BLUE, ChartConfig, ChartData, ChartKind, ChartOptions, Dataset, GRAY, GREEN, IndexAxis,
    Legend, PURPLE, Paint, Plugins, Rgba, Scales, Title, Tooltip, TooltipFormat, YELLOW,
};

fn hidden_legend() -> Option<Legend> {
    Some(Legend { display: false })
}

fn tooltip(format: TooltipFormat) -> Option<Tooltip> {
    Some(Tooltip {
        enabled: true,
        format: Some(format),
    })
}

/// Vertical bar chart of donations per month.
pub fn monthly_donations(series: &SeriesData) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: series.labels.clone(),
            datasets: vec![Dataset::new(
                Some("Monthly Donations"),
                series.values.clone(),
                Paint::Solid(BLUE.with_alpha(0.5)),
                Paint::Solid(BLUE),
                1,
            )],
        },
        options: ChartOptions {
            scales: Some(Scales {
                x: None,
                y: Some(Axis::currency_from_zero()),
            }),
            plugins: Plugins {
                legend: hidden_legend(),
                tooltip: tooltip(TooltipFormat::Currency),
                title: None,
            },
            ..ChartOptions::default()
        },
    }
}

/// Horizontal bars of raised amount against goal per campaign.
pub fn campaign_performance(data: &CampaignPerformance) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: data.labels.clone(),
            datasets: vec![
                Dataset::new(
                    Some("Raised"),
                    data.raised.clone(),
                    Paint::Solid(GREEN.with_alpha(0.5)),
                    Paint::Solid(GREEN),
                    1,
                ),
                Dataset::new(
                    Some("Goal"),
                    data.goals.clone(),
                    Paint::Solid(GRAY.with_alpha(0.5)),
                    Paint::Solid(GRAY),
                    1,
                ),
            ],
        },
        options: ChartOptions {
            index_axis: Some(IndexAxis::Y),
            scales: Some(Scales {
                x: Some(Axis::currency_from_zero()),
                y: None,
            }),
            plugins: Plugins {
                legend: None,
                tooltip: tooltip(TooltipFormat::LabeledCurrency),
                title: None,
            },
            ..ChartOptions::default()
        },
    }
}

/// Doughnut of donation amounts per source.
pub fn donation_sources(series: &SeriesData) -> ChartConfig {
    let palette = [BLUE, GREEN, YELLOW, PURPLE];
    let mut dataset = Dataset::new(
        None,
        series.values.clone(),
        Paint::PerPoint(palette.iter().map(|c| c.with_alpha(0.8)).collect()),
        Paint::PerPoint(palette.to_vec()),
        1,
    );
    dataset.hover_offset = Some(15);

    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: series.labels.clone(),
            datasets: vec![dataset],
        },
        options: ChartOptions {
            cutout: Some("65%".to_string()),
            plugins: Plugins {
                legend: hidden_legend(),
                tooltip: tooltip(TooltipFormat::ShareOfTotal),
                title: None,
            },
            animation: Some(Animation {
                animate_scale: true,
                animate_rotate: true,
            }),
            ..ChartOptions::default()
        },
    }
}

/// Filled line chart of the currently selected trend period.
pub fn donation_trends(state: &ActiveChartState) -> ChartConfig {
    let mut dataset = Dataset::new(
        Some("Donations"),
        state.series.values.clone(),
        Paint::Solid(BLUE.with_alpha(0.2)),
        Paint::Solid(BLUE),
        2,
    );
    dataset.point_background_color = Some(BLUE);
    dataset.point_radius = Some(4);
    dataset.tension = Some(0.3);
    dataset.fill = Some(true);

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: state.series.labels.clone(),
            datasets: vec![dataset],
        },
        options: ChartOptions {
            scales: Some(Scales {
                x: None,
                y: Some(Axis::currency_from_zero()),
            }),
            plugins: Plugins {
                legend: hidden_legend(),
                tooltip: tooltip(TooltipFormat::Currency),
                title: state.title.as_ref().map(|text| Title {
                    display: true,
                    text: text.clone(),
                }),
            },
            ..ChartOptions::default()
        },
    }
}

/// KPI sparkline colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparklineTone {
    Donations,
    Campaigns,
    Donors,
}

impl SparklineTone {
    pub fn color(self) -> Rgba {
        match self {
            SparklineTone::Donations => GREEN,
            SparklineTone::Campaigns => BLUE,
            SparklineTone::Donors => PURPLE,
        }
    }
}

/// Axis-less filled line for a KPI card. Labels are `1..=n`.
pub fn sparkline(values: &[f64], tone: SparklineTone) -> ChartConfig {
    let color = tone.color();
    let mut dataset = Dataset::new(
        None,
        values.to_vec(),
        Paint::Solid(color.with_alpha(0.2)),
        Paint::Solid(color),
        2,
    );
    dataset.point_radius = Some(0);
    dataset.tension = Some(0.4);
    dataset.fill = Some(true);

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: (1..=values.len()).map(|i| i.to_string()).collect(),
            datasets: vec![dataset],
        },
        options: ChartOptions {
            scales: Some(Scales {
                x: Some(Axis::hidden()),
                y: Some(Axis::hidden()),
            }),
            plugins: Plugins {
                legend: hidden_legend(),
                tooltip: Some(Tooltip {
                    enabled: false,
                    format: None,
                }),
                title: None,
            },
            ..ChartOptions::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Period, defaults};
    use crate::store::{PeriodStore, switch_period};

    #[test]
    fn campaign_chart_is_horizontal_with_two_datasets() {
        let cfg = campaign_performance(&defaults::campaigns());
        assert!(cfg.is_horizontal());
        let names: Vec<_> = cfg.data.datasets.iter().map(|d| d.label.as_deref()).collect();
        assert_eq!(names, vec![Some("Raised"), Some("Goal")]);
    }

    #[test]
    fn trends_title_follows_state() {
        let store = PeriodStore::from_attribute(None);
        let initial = donation_trends(&ActiveChartState::initial(&store));
        assert_eq!(initial.title(), None);
        assert_eq!(initial.data.labels.len(), 7);

        let switched = donation_trends(&switch_period(&store, Period::Year.control_arg()));
        assert_eq!(switched.title(), Some("Yearly Donations"));
        assert_eq!(switched.data.labels.len(), 12);
    }

    #[test]
    fn sparkline_labels_count_from_one() {
        let cfg = sparkline(&[3.0, 4.0, 5.0], SparklineTone::Donors);
        assert_eq!(cfg.data.labels, vec!["1", "2", "3"]);
        assert_eq!(cfg.data.datasets[0].border_color, Paint::Solid(PURPLE));
    }

    #[test]
    fn doughnut_json_has_cutout_and_palette() {
        let v = serde_json::to_value(donation_sources(&defaults::sources())).unwrap();
        assert_eq!(v["type"], "doughnut");
        assert_eq!(v["options"]["cutout"], "65%");
        assert_eq!(v["data"]["datasets"][0]["borderColor"][2], "rgba(245, 158, 11, 1)");
        assert_eq!(v["data"]["datasets"][0]["hoverOffset"], 15);
    }
}
