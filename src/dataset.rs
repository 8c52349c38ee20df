//! Normalization of decoded attribute data into chart-ready series.
//!
//! Each chart attribute has its own tolerated shapes. The functions here take
//! raw attribute text, run it through the tolerant decoder, and always return
//! something drawable.

use serde_json::Value;

use crate::decode::decode_or;
use crate::domain::types::{value_to_f64, value_to_label};
use crate::domain::{CampaignPerformance, SeriesData, SourceDataset, SourceRecord, defaults};

/// Read one array field off an object.
///
/// Missing or `null` fields, and any non-object input, read as `None`. A
/// field of the wrong shape is also `None`, so only that field falls back.
fn array_field<'a>(value: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    match value.get(key)? {
        Value::Array(items) => Some(items),
        Value::Null => None,
        other => {
            tracing::warn!(field = key, found = %other, "expected an array, using default for this field");
            None
        }
    }
}

pub(crate) fn labels_field(value: &Value, key: &str) -> Option<Vec<String>> {
    array_field(value, key).map(|items| items.iter().map(value_to_label).collect())
}

pub(crate) fn values_field(value: &Value, key: &str) -> Option<Vec<f64>> {
    array_field(value, key).map(|items| items.iter().map(value_to_f64).collect())
}

impl SourceDataset {
    /// Classify decoded sources input: arrays are record lists, everything
    /// else is read as a labeled series.
    pub fn from_value(value: Value) -> SourceDataset {
        match value {
            Value::Array(items) => SourceDataset::SourceRecordList(
                items
                    .into_iter()
                    .map(|item| {
                        serde_json::from_value(item).unwrap_or(SourceRecord {
                            source: None,
                            amount: None,
                        })
                    })
                    .collect(),
            ),
            other => SourceDataset::LabeledSeries {
                labels: labels_field(&other, "labels"),
                values: values_field(&other, "values"),
            },
        }
    }

    /// Produce the uniform `(labels, values)` pair.
    ///
    /// Records map `source` to labels and `amount` to values in order; a
    /// missing source is an empty label and a missing amount a gap. Labeled
    /// series fill each missing field from `fallback`.
    pub fn normalize(&self, fallback: &SeriesData) -> SeriesData {
        match self {
            SourceDataset::SourceRecordList(records) => SeriesData {
                labels: records.iter().map(|r| r.source.clone().unwrap_or_default()).collect(),
                values: records.iter().map(|r| r.amount.unwrap_or(f64::NAN)).collect(),
            },
            SourceDataset::LabeledSeries { labels, values } => SeriesData {
                labels: labels.clone().unwrap_or_else(|| fallback.labels.clone()),
                values: values.clone().unwrap_or_else(|| fallback.values.clone()),
            },
        }
    }
}

/// `data-sources`: records or labeled series, defaulted per field.
pub fn donation_sources(raw: Option<&str>) -> SeriesData {
    let fallback = defaults::sources();
    let value = decode_or(raw, serde_json::to_value(&fallback).unwrap_or(Value::Null));
    let dataset = SourceDataset::from_value(value);
    tracing::debug!(?dataset, "parsed source data");
    dataset.normalize(&fallback)
}

/// `data-donations`: missing labels or values are left empty.
pub fn monthly_donations(raw: Option<&str>) -> SeriesData {
    let fallback = defaults::donations();
    let value = decode_or(raw, serde_json::to_value(&fallback).unwrap_or(Value::Null));
    SeriesData {
        labels: labels_field(&value, "labels").unwrap_or_default(),
        values: values_field(&value, "values").unwrap_or_default(),
    }
}

/// `data-campaigns`: each of labels/raised/goals defaulted independently.
pub fn campaign_performance(raw: Option<&str>) -> CampaignPerformance {
    let fallback = defaults::campaigns();
    let value = decode_or(raw, serde_json::to_value(&fallback).unwrap_or(Value::Null));
    CampaignPerformance {
        labels: labels_field(&value, "labels").unwrap_or(fallback.labels),
        raised: values_field(&value, "raised").unwrap_or(fallback.raised),
        goals: values_field(&value, "goals").unwrap_or(fallback.goals),
    }
}

/// `data-trend` on a KPI card: a flat array of numbers.
pub fn sparkline(raw: Option<&str>) -> Vec<f64> {
    let value: Value = decode_or(raw, Value::Null);
    match value {
        Value::Array(items) => items.iter().map(value_to_f64).collect(),
        _ => defaults::sparkline(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_list_maps_source_and_amount_in_order() {
        let s = donation_sources(Some(r#"[{"source":"Direct","amount":10},{"source":"Web","amount":5}]"#));
        assert_eq!(s.labels, vec!["Direct", "Web"]);
        assert_eq!(s.values, vec![10.0, 5.0]);
    }

    #[test]
    fn malformed_records_propagate_as_gaps() {
        let s = donation_sources(Some(r#"[{"source":"Direct"},{"amount":3},7]"#));
        assert_eq!(s.labels, vec!["Direct", "", ""]);
        assert!(s.values[0].is_nan());
        assert_eq!(s.values[1], 3.0);
        assert!(s.values[2].is_nan());
    }

    #[test]
    fn labeled_series_defaults_missing_field() {
        let s = donation_sources(Some(r#"{"labels":["A","B"]}"#));
        assert_eq!(s.labels, vec!["A", "B"]);
        assert_eq!(s.values, defaults::sources().values);
    }

    #[test]
    fn badly_typed_field_only_defaults_itself() {
        let s = donation_sources(Some(r#"{"labels":["A","B"],"values":"oops"}"#));
        assert_eq!(s.labels, vec!["A", "B"]);
        assert_eq!(s.values, defaults::sources().values);

        let s = donation_sources(Some(r#"{"labels":7,"values":[1,2]}"#));
        assert_eq!(s.labels, defaults::sources().labels);
        assert_eq!(s.values, vec![1.0, 2.0]);
    }

    #[test]
    fn absent_sources_use_defaults() {
        assert_eq!(donation_sources(None), defaults::sources());
        assert_eq!(donation_sources(Some("oops")), defaults::sources());
    }

    #[test]
    fn classification_is_explicit() {
        let list = SourceDataset::from_value(serde_json::json!([]));
        assert_eq!(list, SourceDataset::SourceRecordList(vec![]));
        let series = SourceDataset::from_value(serde_json::json!(42));
        assert_eq!(
            series,
            SourceDataset::LabeledSeries {
                labels: None,
                values: None
            }
        );
    }

    #[test]
    fn donations_missing_fields_become_empty() {
        let s = monthly_donations(Some(r#"{"labels":["Jan"]}"#));
        assert_eq!(s.labels, vec!["Jan"]);
        assert!(s.values.is_empty());
        assert_eq!(monthly_donations(None), defaults::donations());
    }

    #[test]
    fn campaigns_default_per_field() {
        let c = campaign_performance(Some(r#"{"labels":["Roof"],"raised":[100]}"#));
        assert_eq!(c.labels, vec!["Roof"]);
        assert_eq!(c.raised, vec![100.0]);
        assert_eq!(c.goals, defaults::campaigns().goals);
    }

    #[test]
    fn campaigns_keep_valid_fields_next_to_a_bad_one() {
        let c = campaign_performance(Some(r#"{"labels":["Roof","Well"],"raised":[100,"250"],"goals":"n/a"}"#));
        assert_eq!(c.labels, vec!["Roof", "Well"]);
        assert_eq!(c.raised, vec![100.0, 250.0]);
        assert_eq!(c.goals, defaults::campaigns().goals);
    }

    #[test]
    fn sparkline_falls_back_to_flat_week() {
        assert_eq!(sparkline(Some("[1,2,3]")), vec![1.0, 2.0, 3.0]);
        assert_eq!(sparkline(None), vec![0.0; 7]);
        assert_eq!(sparkline(Some(r#"{"a":1}"#)), vec![0.0; 7]);
    }
}
