//! Built-in placeholder data.
//!
//! Every chart falls back to these when its attribute is missing or
//! unusable, so the dashboard always renders something.

use super::types::{CampaignPerformance, SeriesData, TrendBundle};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn donations() -> SeriesData {
    SeriesData::new(
        MONTHS[..6].iter().copied(),
        [1200.0, 1900.0, 3000.0, 2400.0, 1800.0, 3200.0],
    )
}

pub fn campaigns() -> CampaignPerformance {
    CampaignPerformance {
        labels: (1..=5).map(|i| format!("Campaign {i}")).collect(),
        raised: vec![12000.0, 8500.0, 15000.0, 9000.0, 4500.0],
        goals: vec![20000.0, 10000.0, 25000.0, 15000.0, 5000.0],
    }
}

pub fn sources() -> SeriesData {
    SeriesData::new(
        ["Direct", "Social Media", "Website", "Other"],
        [2450.0, 1280.0, 1865.0, 587.0],
    )
}

pub fn weekly() -> SeriesData {
    SeriesData::new(
        ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        [125.0, 232.0, 187.0, 290.0, 346.0, 402.0, 501.0],
    )
}

pub fn monthly() -> SeriesData {
    SeriesData::new(
        ["Week 1", "Week 2", "Week 3", "Week 4"],
        [1250.0, 1432.0, 1687.0, 1890.0],
    )
}

pub fn yearly() -> SeriesData {
    SeriesData::new(
        MONTHS,
        [
            5250.0, 4890.0, 6540.0, 5780.0, 6432.0, 7230.0, 6890.0, 7654.0, 8320.0, 7890.0, 8765.0, 9230.0,
        ],
    )
}

pub fn trends() -> TrendBundle {
    TrendBundle {
        weekly: weekly(),
        monthly: monthly(),
        yearly: yearly(),
    }
}

/// Flat seven-day sparkline.
pub fn sparkline() -> Vec<f64> {
    vec![0.0; 7]
}
