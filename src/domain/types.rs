//! Shared domain types.
//!
//! These types are intentionally kept small and serializable so they can be:
//!
//! - decoded straight out of HTML data attributes
//! - handed to chart builders without conversion
//! - exported back to JSON alongside chart configs

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One labeled series: the unit every chart is built from.
///
/// `labels.len() == values.len()` is expected but not enforced; renderers
/// draw the common prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    pub labels: Vec<String>,
    #[serde(deserialize_with = "de_values")]
    pub values: Vec<f64>,
}

impl SeriesData {
    pub fn new<L: Into<String>>(labels: impl IntoIterator<Item = L>, values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            values: values.into_iter().collect(),
        }
    }
}

/// Trend chart period as chosen by a user control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    Year,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Week, Period::Month, Period::Year];

    /// Resolve a control argument. Anything unrecognized is the weekly view.
    pub fn from_control(arg: &str) -> Period {
        match arg {
            "week" => Period::Week,
            "month" => Period::Month,
            "year" => Period::Year,
            _ => Period::Week,
        }
    }

    /// Argument a period control passes when clicked.
    pub fn control_arg(self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }

    /// Key of the period's slot in the `data-trends` object.
    pub fn slot_key(self) -> &'static str {
        match self {
            Period::Week => "weekly",
            Period::Month => "monthly",
            Period::Year => "yearly",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Period::Week => "Weekly Donations",
            Period::Month => "Monthly Donations",
            Period::Year => "Yearly Donations",
        }
    }
}

/// The three period slots of the donation trends chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendBundle {
    pub weekly: SeriesData,
    pub monthly: SeriesData,
    pub yearly: SeriesData,
}

impl TrendBundle {
    pub fn slot(&self, period: Period) -> &SeriesData {
        match period {
            Period::Week => &self.weekly,
            Period::Month => &self.monthly,
            Period::Year => &self.yearly,
        }
    }
}

/// One `{source, amount}` record of the donation sources attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    #[serde(default, deserialize_with = "de_label")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "de_amount")]
    pub amount: Option<f64>,
}

/// Donation sources input, shape decided once at decode time.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceDataset {
    /// `[{source, amount}, ...]`
    SourceRecordList(Vec<SourceRecord>),
    /// `{labels, values}` with either field possibly missing.
    LabeledSeries {
        labels: Option<Vec<String>>,
        values: Option<Vec<f64>>,
    },
}

/// Campaign performance input: raised vs goal per campaign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignPerformance {
    pub labels: Vec<String>,
    pub raised: Vec<f64>,
    pub goals: Vec<f64>,
}

/// Convert one JSON scalar into a chart value.
///
/// Numbers pass through, numeric strings (decimal fields rendered by the
/// server) are parsed, everything else is an absent-like `NaN` that charts
/// draw as a gap and JSON writes as `null`.
pub fn value_to_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Render a JSON scalar as a label the way a chart library would stringify it.
pub fn value_to_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => number_label(n),
        other => other.to_string(),
    }
}

/// Integral numbers print without a fraction (`1.0` is `"1"`).
fn number_label(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

fn de_values<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    let raw: Vec<Value> = Vec::deserialize(deserializer)?;
    Ok(raw.iter().map(value_to_f64).collect())
}

fn de_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Null => None,
        other => Some(value_to_label(&other)),
    })
}

fn de_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    let v = value_to_f64(&raw);
    Ok(if v.is_nan() { None } else { Some(v) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_control_resolves_to_week() {
        assert_eq!(Period::from_control("month"), Period::Month);
        assert_eq!(Period::from_control("bogus"), Period::Week);
        assert_eq!(Period::from_control(""), Period::Week);
        assert_eq!(Period::from_control("Month"), Period::Week);
    }

    #[test]
    fn series_accepts_numeric_strings() {
        let s: SeriesData = serde_json::from_str(r#"{"labels":["a","b","c"],"values":[1,"2.5",null]}"#).unwrap();
        assert_eq!(s.values[0], 1.0);
        assert_eq!(s.values[1], 2.5);
        assert!(s.values[2].is_nan());
    }

    #[test]
    fn series_requires_both_fields() {
        assert!(serde_json::from_str::<SeriesData>(r#"{"labels":["a"]}"#).is_err());
    }

    #[test]
    fn numeric_labels_print_like_javascript() {
        assert_eq!(value_to_label(&serde_json::json!(1.0)), "1");
        assert_eq!(value_to_label(&serde_json::json!(-20.0)), "-20");
        assert_eq!(value_to_label(&serde_json::json!(2024)), "2024");
        assert_eq!(value_to_label(&serde_json::json!(2.5)), "2.5");
        assert_eq!(value_to_label(&serde_json::json!(true)), "true");
    }

    #[test]
    fn source_record_tolerates_missing_fields() {
        let r: SourceRecord = serde_json::from_str(r#"{"amount":"12"}"#).unwrap();
        assert_eq!(r.source, None);
        assert_eq!(r.amount, Some(12.0));
    }
}
