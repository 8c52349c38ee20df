//! Period-keyed data for the donation trends chart.
//!
//! The trends attribute carries three series (weekly, monthly, yearly). They
//! are decoded once when the dashboard mounts and never change afterwards; a
//! period switch only swaps which one is displayed.

use serde_json::Value;

use crate::dataset::{labels_field, values_field};
use crate::decode::decode_or;
use crate::domain::{Period, SeriesData, TrendBundle, defaults};

/// Style classes of an inactive period control.
pub const INACTIVE_CLASSES: [&str; 2] = ["bg-gray-100", "text-gray-600"];
/// Style classes of the active period control.
pub const ACTIVE_CLASSES: [&str; 2] = ["bg-blue-100", "text-blue-600"];

/// The three period slots, each defaulted independently.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodStore {
    bundle: TrendBundle,
}

impl PeriodStore {
    /// Decode `data-trends` text and fill the slots.
    pub fn from_attribute(raw: Option<&str>) -> Self {
        let fallback = serde_json::to_value(defaults::trends()).unwrap_or(Value::Null);
        let value = decode_or(raw, fallback);
        tracing::debug!(%value, "parsed trends data");
        Self::from_value(&value)
    }

    /// Fill the slots from an already decoded value.
    ///
    /// Within a slot, `labels` and `values` are each taken from the input when
    /// they are arrays and otherwise from that period's built-in series.
    pub fn from_value(value: &Value) -> Self {
        let slot = |period: Period, default: fn() -> SeriesData| -> SeriesData {
            let Some(raw) = value.get(period.slot_key()) else {
                return default();
            };
            if !raw.is_object() {
                tracing::warn!(slot = period.slot_key(), "trend slot is not an object, using sample data");
                return default();
            }
            let fallback = default();
            SeriesData {
                labels: labels_field(raw, "labels").unwrap_or(fallback.labels),
                values: values_field(raw, "values").unwrap_or(fallback.values),
            }
        };

        Self {
            bundle: TrendBundle {
                weekly: slot(Period::Week, defaults::weekly),
                monthly: slot(Period::Month, defaults::monthly),
                yearly: slot(Period::Year, defaults::yearly),
            },
        }
    }

    pub fn slot(&self, period: Period) -> &SeriesData {
        self.bundle.slot(period)
    }

    pub fn bundle(&self) -> &TrendBundle {
        &self.bundle
    }
}

/// What the trend chart is currently showing.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveChartState {
    pub period: Period,
    pub series: SeriesData,
    /// Unset until the first switch; the initial chart has no title.
    pub title: Option<String>,
}

impl ActiveChartState {
    pub fn initial(store: &PeriodStore) -> Self {
        Self {
            period: Period::Week,
            series: store.slot(Period::Week).clone(),
            title: None,
        }
    }
}

/// Replace the displayed state with the slot selected by `period`.
///
/// Unknown periods show the weekly slot.
pub fn switch_period(store: &PeriodStore, period: &str) -> ActiveChartState {
    let resolved = Period::from_control(period);
    if resolved.control_arg() != period {
        tracing::debug!(requested = period, "unknown period, showing weekly data");
    }
    ActiveChartState {
        period: resolved,
        series: store.slot(resolved).clone(),
        title: Some(resolved.title().to_string()),
    }
}

/// One period button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodControl {
    /// Argument the control passes when clicked (`week`, `month`, ...).
    pub arg: String,
    pub classes: Vec<String>,
}

impl PeriodControl {
    pub fn new(arg: impl Into<String>) -> Self {
        Self {
            arg: arg.into(),
            classes: INACTIVE_CLASSES.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn is_active(&self) -> bool {
        ACTIVE_CLASSES.iter().all(|c| self.has_class(c))
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn remove_classes(&mut self, classes: &[&str]) {
        self.classes.retain(|c| !classes.contains(&c.as_str()));
    }

    fn add_classes(&mut self, classes: &[&str]) {
        for class in classes {
            if !self.has_class(class) {
                self.classes.push(class.to_string());
            }
        }
    }
}

/// The fixed set of period buttons next to the trend chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodControls {
    controls: Vec<PeriodControl>,
}

impl PeriodControls {
    pub fn new(controls: Vec<PeriodControl>) -> Self {
        Self { controls }
    }

    /// Week / month / year buttons, as rendered by the portal template.
    pub fn standard() -> Self {
        Self::new(Period::ALL.iter().map(|p| PeriodControl::new(p.control_arg())).collect())
    }

    /// Reset every control, then mark the one passing `requested` as active.
    ///
    /// Returns whether a control matched.
    pub fn activate(&mut self, requested: &str) -> bool {
        for control in &mut self.controls {
            control.remove_classes(&ACTIVE_CLASSES);
            control.add_classes(&INACTIVE_CLASSES);
        }
        let Some(control) = self.controls.iter_mut().find(|c| c.arg == requested) else {
            return false;
        };
        control.remove_classes(&INACTIVE_CLASSES);
        control.add_classes(&ACTIVE_CLASSES);
        true
    }

    pub fn active(&self) -> Option<&str> {
        self.controls.iter().find(|c| c.is_active()).map(|c| c.arg.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PeriodControl> {
        self.controls.iter()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_slots_default_independently() {
        let store = PeriodStore::from_value(&json!({
            "monthly": {"labels": ["W1", "W2"], "values": [1, 2]}
        }));
        assert_eq!(store.slot(Period::Month), &SeriesData::new(["W1", "W2"], [1.0, 2.0]));
        assert_eq!(store.slot(Period::Week), &defaults::weekly());
        assert_eq!(store.slot(Period::Year), &defaults::yearly());
    }

    #[test]
    fn incomplete_slot_keeps_supplied_field() {
        let store = PeriodStore::from_value(&json!({
            "weekly": {"labels": ["Mon"]},
            "monthly": {"labels": "bad", "values": [4, "5"]},
            "yearly": 3
        }));
        assert_eq!(store.slot(Period::Week).labels, vec!["Mon"]);
        assert_eq!(store.slot(Period::Week).values, defaults::weekly().values);
        assert_eq!(store.slot(Period::Month).labels, defaults::monthly().labels);
        assert_eq!(store.slot(Period::Month).values, vec![4.0, 5.0]);
        assert_eq!(store.slot(Period::Year), &defaults::yearly());
    }

    #[test]
    fn escaped_trends_attribute_decodes() {
        let raw = "{&quot;yearly&quot;:{&quot;labels&quot;:[&quot;2024&quot;],&quot;values&quot;:[9]}}";
        let store = PeriodStore::from_attribute(Some(raw));
        assert_eq!(store.slot(Period::Year), &SeriesData::new(["2024"], [9.0]));
    }

    #[test]
    fn switch_selects_slot_and_title() {
        let store = PeriodStore::from_attribute(None);
        let state = switch_period(&store, "month");
        assert_eq!(state.series, defaults::monthly());
        assert_eq!(state.title.as_deref(), Some("Monthly Donations"));
    }

    #[test]
    fn unknown_period_shows_weekly() {
        let store = PeriodStore::from_attribute(None);
        let state = switch_period(&store, "bogus");
        assert_eq!(state.period, Period::Week);
        assert_eq!(state.series, defaults::weekly());
        assert_eq!(state.title.as_deref(), Some("Weekly Donations"));
    }

    #[test]
    fn controls_mark_exactly_the_requested_one() {
        let mut controls = PeriodControls::standard();
        assert!(controls.activate("year"));
        assert_eq!(controls.active(), Some("year"));
        assert!(controls.activate("week"));
        assert_eq!(controls.active(), Some("week"));
        assert_eq!(controls.iter().filter(|c| c.is_active()).count(), 1);
    }

    #[test]
    fn unmatched_request_leaves_no_control_active() {
        let mut controls = PeriodControls::standard();
        controls.activate("month");
        assert!(!controls.activate("bogus"));
        assert_eq!(controls.active(), None);
        for c in controls.iter() {
            assert_eq!(c.classes, vec!["bg-gray-100", "text-gray-600"]);
        }
    }
}
