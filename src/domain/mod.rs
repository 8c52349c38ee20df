//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - chart data shapes (`SeriesData`, `TrendBundle`, `SourceDataset`, `CampaignPerformance`)
//! - the trend `Period` and its control/slot/title naming
//! - built-in placeholder data (`defaults`)

pub mod defaults;
pub mod types;

pub use types::*;
