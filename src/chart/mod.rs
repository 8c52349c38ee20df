//! Chart configurations for the dashboard.
//!
//! - config objects in the charting library's shape (`config`)
//! - one builder per dashboard chart (`builders`)
//! - tick/tooltip formatting (`format`)

pub mod builders;
pub mod config;
pub mod format;

pub use config::*;
pub use format::{format_currency, format_tick, format_tooltip};

/// Canvas ids the portal template renders, and the attribute each reads.
pub mod canvas {
    pub const MONTHLY_DONATIONS: &str = "monthlyDonationsChart";
    pub const CAMPAIGN_PERFORMANCE: &str = "campaignPerformanceChart";
    pub const DONATION_SOURCES: &str = "donationSourcesChart";
    pub const DONATION_TRENDS: &str = "donationChart";
    pub const DONATIONS_SPARKLINE: &str = "donationsTrendSparkline";
    pub const CAMPAIGNS_SPARKLINE: &str = "campaignsTrendSparkline";
    pub const DONORS_SPARKLINE: &str = "donorsTrendSparkline";

    pub const ATTR_DONATIONS: &str = "donations";
    pub const ATTR_CAMPAIGNS: &str = "campaigns";
    pub const ATTR_SOURCES: &str = "sources";
    pub const ATTR_TRENDS: &str = "trends";
    pub const ATTR_TREND: &str = "trend";
}
