//! Dashboard page-view context.
//!
//! `Dashboard` owns everything the charts need for the lifetime of one page
//! view: the backend, the handles it returned, the trend period slots and the
//! period controls. It is created by `mount`, driven by
//! `switch_chart_period`, and torn down by `unmount`.

use crate::chart::builders::{self, SparklineTone};
use crate::chart::canvas;
use crate::dataset;
use crate::io::html::Element;
use crate::io::page::Page;
use crate::store::{ActiveChartState, PeriodControl, PeriodControls, PeriodStore, switch_period};

mod backend;

pub use backend::{ChartBackend, ChartHandle, ChartRegistry, MountedChart};

const SPARKLINES: [(&str, SparklineTone); 3] = [
    (canvas::DONATIONS_SPARKLINE, SparklineTone::Donations),
    (canvas::CAMPAIGNS_SPARKLINE, SparklineTone::Campaigns),
    (canvas::DONORS_SPARKLINE, SparklineTone::Donors),
];

struct TrendChart {
    handle: ChartHandle,
    store: PeriodStore,
    state: ActiveChartState,
}

pub struct Dashboard<B: ChartBackend> {
    backend: B,
    handles: Vec<ChartHandle>,
    trends: Option<TrendChart>,
    controls: PeriodControls,
}

impl<B: ChartBackend> Dashboard<B> {
    /// Create every chart whose canvas is present on `page`.
    pub fn mount(page: &Page, backend: B) -> Self {
        let args = page.period_control_args();
        let controls = if args.is_empty() {
            PeriodControls::standard()
        } else {
            PeriodControls::new(args.into_iter().map(PeriodControl::new).collect())
        };

        let mut dash = Self {
            backend,
            handles: Vec::new(),
            trends: None,
            controls,
        };

        if let Some(el) = page.element_by_id(canvas::MONTHLY_DONATIONS) {
            tracing::debug!(data = ?el.dataset(canvas::ATTR_DONATIONS), "monthly donations chart data");
            let series = dataset::monthly_donations(el.dataset(canvas::ATTR_DONATIONS));
            dash.create(canvas::MONTHLY_DONATIONS, &builders::monthly_donations(&series));
        }

        if let Some(el) = page.element_by_id(canvas::CAMPAIGN_PERFORMANCE) {
            tracing::debug!(data = ?el.dataset(canvas::ATTR_CAMPAIGNS), "campaign performance chart data");
            let data = dataset::campaign_performance(el.dataset(canvas::ATTR_CAMPAIGNS));
            dash.create(canvas::CAMPAIGN_PERFORMANCE, &builders::campaign_performance(&data));
        }

        if let Some(el) = page.element_by_id(canvas::DONATION_SOURCES) {
            tracing::debug!(data = ?el.dataset(canvas::ATTR_SOURCES), "donation sources chart data");
            let series = dataset::donation_sources(el.dataset(canvas::ATTR_SOURCES));
            dash.create(canvas::DONATION_SOURCES, &builders::donation_sources(&series));
        }

        if let Some(el) = page.element_by_id(canvas::DONATION_TRENDS) {
            dash.mount_trends(el);
        }

        for (id, tone) in SPARKLINES {
            if let Some(el) = page.element_by_id(id) {
                let values = dataset::sparkline(el.dataset(canvas::ATTR_TREND));
                dash.create(id, &builders::sparkline(&values, tone));
            }
        }

        tracing::info!(charts = dash.handles.len(), "dashboard mounted");
        dash
    }

    fn mount_trends(&mut self, el: &Element) {
        tracing::debug!(data = ?el.dataset(canvas::ATTR_TRENDS), "donation trends chart data");
        let store = PeriodStore::from_attribute(el.dataset(canvas::ATTR_TRENDS));
        let state = ActiveChartState::initial(&store);
        let handle = self.create(canvas::DONATION_TRENDS, &builders::donation_trends(&state));
        self.trends = Some(TrendChart { handle, store, state });
    }

    fn create(&mut self, canvas_id: &str, config: &crate::chart::ChartConfig) -> ChartHandle {
        let handle = self.backend.create(canvas_id, config);
        self.handles.push(handle);
        handle
    }

    /// Page-level period switch, as invoked by a period control.
    ///
    /// Does nothing when the page has no trend chart.
    pub fn switch_chart_period(&mut self, period: &str) {
        let Some(trends) = self.trends.as_mut() else {
            return;
        };

        if !self.controls.activate(period) {
            tracing::debug!(period, "no control matches period");
        }

        trends.state = switch_period(&trends.store, period);
        self.backend
            .update(trends.handle, &builders::donation_trends(&trends.state));
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn controls(&self) -> &PeriodControls {
        &self.controls
    }

    /// Displayed trend state, if the page has a trend chart.
    pub fn active_state(&self) -> Option<&ActiveChartState> {
        self.trends.as_ref().map(|t| &t.state)
    }

    pub fn period_store(&self) -> Option<&PeriodStore> {
        self.trends.as_ref().map(|t| &t.store)
    }

    /// Destroy every chart and hand the backend back.
    pub fn unmount(mut self) -> B {
        for handle in self.handles.drain(..) {
            self.backend.destroy(handle);
        }
        tracing::debug!("dashboard unmounted");
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults;

    fn full_page() -> Page {
        Page::from_html(
            r#"
            <canvas id="monthlyDonationsChart" data-donations=""></canvas>
            <canvas id="campaignPerformanceChart"></canvas>
            <canvas id="donationSourcesChart" data-sources='[{"source":"Direct","amount":10},{"source":"Web","amount":5}]'></canvas>
            <button onclick="switchChartPeriod('week')">W</button>
            <button onclick="switchChartPeriod('month')">M</button>
            <button onclick="switchChartPeriod('year')">Y</button>
            <canvas id="donationChart" data-trends="{&amp;quot;monthly&amp;quot;:{&amp;quot;labels&amp;quot;:[&amp;quot;A&amp;quot;],&amp;quot;values&amp;quot;:[1]}}"></canvas>
            <canvas id="donorsTrendSparkline" data-trend="[4,5,6]"></canvas>
            "#,
        )
    }

    #[test]
    fn mounts_only_present_canvases() {
        let dash = Dashboard::mount(&full_page(), ChartRegistry::new());
        let ids: Vec<_> = dash.backend().iter().map(|c| c.canvas_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "monthlyDonationsChart",
                "campaignPerformanceChart",
                "donationSourcesChart",
                "donationChart",
                "donorsTrendSparkline",
            ]
        );
        let sources = dash.backend().by_canvas("donationSourcesChart").unwrap();
        assert_eq!(sources.config.data.labels, vec!["Direct", "Web"]);
    }

    #[test]
    fn doubly_escaped_trends_reach_the_store() {
        let dash = Dashboard::mount(&full_page(), ChartRegistry::new());
        let store = dash.period_store().unwrap();
        assert_eq!(store.slot(crate::domain::Period::Month).labels, vec!["A"]);
        assert_eq!(store.slot(crate::domain::Period::Week), &defaults::weekly());
    }

    #[test]
    fn switch_updates_chart_title_and_controls() {
        let mut dash = Dashboard::mount(&full_page(), ChartRegistry::new());
        dash.switch_chart_period("month");

        let trends = dash.backend().by_canvas("donationChart").unwrap();
        assert_eq!(trends.draws, 2);
        assert_eq!(trends.config.title(), Some("Monthly Donations"));
        assert_eq!(trends.config.data.labels, vec!["A"]);
        assert_eq!(dash.controls().active(), Some("month"));
    }

    #[test]
    fn bogus_period_shows_weekly_with_no_active_control() {
        let mut dash = Dashboard::mount(&full_page(), ChartRegistry::new());
        dash.switch_chart_period("month");
        dash.switch_chart_period("bogus");

        let state = dash.active_state().unwrap();
        assert_eq!(state.series, defaults::weekly());
        assert_eq!(state.title.as_deref(), Some("Weekly Donations"));
        assert_eq!(dash.controls().active(), None);
    }

    #[test]
    fn switching_twice_is_idempotent() {
        let mut once = Dashboard::mount(&full_page(), ChartRegistry::new());
        once.switch_chart_period("week");
        let mut twice = Dashboard::mount(&full_page(), ChartRegistry::new());
        twice.switch_chart_period("week");
        twice.switch_chart_period("week");

        assert_eq!(once.active_state(), twice.active_state());
        assert_eq!(once.controls(), twice.controls());
        let a = &once.backend().by_canvas("donationChart").unwrap().config;
        let b = &twice.backend().by_canvas("donationChart").unwrap().config;
        assert_eq!(a, b);
    }

    #[test]
    fn switch_without_trend_chart_is_a_no_op() {
        let page = Page::from_html(r#"<canvas id="donationSourcesChart"></canvas>"#);
        let mut dash = Dashboard::mount(&page, ChartRegistry::new());
        dash.switch_chart_period("year");
        assert!(dash.active_state().is_none());
        assert_eq!(dash.controls().active(), None);
        assert_eq!(dash.backend().by_canvas("donationSourcesChart").unwrap().draws, 1);
    }

    #[test]
    fn unmount_destroys_all_charts() {
        let dash = Dashboard::mount(&full_page(), ChartRegistry::new());
        let registry = dash.unmount();
        assert!(registry.is_empty());
    }

    #[test]
    fn empty_donations_attribute_uses_sample_data() {
        let dash = Dashboard::mount(&full_page(), ChartRegistry::new());
        let bar = dash.backend().by_canvas("monthlyDonationsChart").unwrap();
        assert_eq!(bar.config.data.labels, defaults::donations().labels);
    }
}
