//! Value formatting for ticks and tooltips.

use super::config::{TickFormat, TooltipFormat};

/// Group an amount the way `Number.prototype.toLocaleString()` does in en-US:
/// comma thousands separators, at most three fraction digits.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return "NaN".to_string();
    }
    let rounded = (value * 1000.0).round() / 1000.0;
    let negative = rounded < 0.0;
    let text = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    let sign = if negative { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

/// `$` + grouped amount.
pub fn format_currency(value: f64) -> String {
    format!("${}", format_grouped(value))
}

pub fn format_tick(value: f64, ticks: TickFormat) -> String {
    match ticks {
        TickFormat::Plain => format_grouped(value),
        TickFormat::Currency => format_currency(value),
    }
}

/// Tooltip text for one hovered point.
///
/// `dataset_label` is the dataset's label and `point_label` the category
/// label; `dataset` holds every value of the hovered dataset (needed for the
/// share-of-total format).
pub fn format_tooltip(
    format: TooltipFormat,
    dataset_label: Option<&str>,
    point_label: &str,
    value: f64,
    dataset: &[f64],
) -> String {
    match format {
        TooltipFormat::Currency => format_currency(value),
        TooltipFormat::LabeledCurrency => {
            format!("{}: {}", dataset_label.unwrap_or(""), format_currency(value))
        }
        TooltipFormat::ShareOfTotal => {
            let total: f64 = dataset.iter().filter(|v| v.is_finite()).sum();
            let pct = if total != 0.0 { value / total * 100.0 } else { f64::NAN };
            let pct = if pct.is_finite() { format!("{pct:.1}") } else { "NaN".to_string() };
            format!("{point_label}: {} ({pct}%)", format_currency(value))
        }
    }
}
