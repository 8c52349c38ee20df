//! Chart configuration objects.
//!
//! The shape mirrors what the browser charting library consumes (`type`,
//! `data.labels`, `data.datasets`, `options`), so a config serialized here can
//! be handed to it unchanged. Function-valued options (tick and tooltip
//! callbacks) are described by enums instead and evaluated in `format`.

use serde::Serialize;

/// Chart family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Doughnut,
    Line,
}

/// RGBA color as written in the portal's chart configs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub f32);

impl Rgba {
    pub const fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba(self.0, self.1, self.2, alpha)
    }

    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, self.3)
    }
}

impl Serialize for Rgba {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.css())
    }
}

pub const BLUE: Rgba = Rgba(59, 130, 246, 1.0);
pub const GREEN: Rgba = Rgba(16, 185, 129, 1.0);
pub const YELLOW: Rgba = Rgba(245, 158, 11, 1.0);
pub const PURPLE: Rgba = Rgba(139, 92, 246, 1.0);
pub const GRAY: Rgba = Rgba(209, 213, 219, 1.0);

/// One color for the whole dataset, or one per data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Solid(Rgba),
    PerPoint(Vec<Rgba>),
}

impl Paint {
    /// Color used for point `idx`, cycling through per-point palettes.
    pub fn at(&self, idx: usize) -> Rgba {
        match self {
            Paint::Solid(c) => *c,
            Paint::PerPoint(cs) if cs.is_empty() => GRAY,
            Paint::PerPoint(cs) => cs[idx % cs.len()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Non-finite entries serialize as `null` (a gap).
    pub data: Vec<f64>,
    pub background_color: Paint,
    pub border_color: Paint,
    pub border_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_background_color: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_offset: Option<u32>,
}

impl Dataset {
    pub fn new(label: Option<&str>, data: Vec<f64>, background: Paint, border: Paint, border_width: u32) -> Self {
        Self {
            label: label.map(str::to_string),
            data,
            background_color: background,
            border_color: border,
            border_width,
            point_background_color: None,
            point_radius: None,
            tension: None,
            fill: None,
            hover_offset: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// How axis ticks are labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TickFormat {
    Plain,
    Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub display: bool,
    pub begin_at_zero: bool,
    pub ticks: TickFormat,
}

impl Axis {
    pub fn currency_from_zero() -> Self {
        Self {
            display: true,
            begin_at_zero: true,
            ticks: TickFormat::Currency,
        }
    }

    pub fn hidden() -> Self {
        Self {
            display: false,
            begin_at_zero: false,
            ticks: TickFormat::Plain,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scales {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Axis>,
}

/// How a tooltip line is written for a hovered point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TooltipFormat {
    /// `$1,234`
    Currency,
    /// `Raised: $1,234`
    LabeledCurrency,
    /// `Direct: $2,450 (39.6%)`
    ShareOfTotal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<TooltipFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Plugins {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Tooltip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    pub animate_scale: bool,
    pub animate_rotate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexAxis {
    X,
    Y,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_axis: Option<IndexAxis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            index_axis: None,
            cutout: None,
            scales: None,
            plugins: Plugins::default(),
            animation: None,
        }
    }
}

/// A complete chart description handed to a backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    /// Bars laid out along the y axis.
    pub fn is_horizontal(&self) -> bool {
        self.options.index_axis == Some(IndexAxis::Y)
    }

    pub fn title(&self) -> Option<&str> {
        self.options
            .plugins
            .title
            .as_ref()
            .filter(|t| t.display)
            .map(|t| t.text.as_str())
    }

    /// Value-axis tick format (`y` for vertical charts, `x` for horizontal).
    pub fn value_ticks(&self) -> TickFormat {
        let scales = self.options.scales.as_ref();
        let axis = if self.is_horizontal() {
            scales.and_then(|s| s.x.as_ref())
        } else {
            scales.and_then(|s| s.y.as_ref())
        };
        axis.map(|a| a.ticks).unwrap_or(TickFormat::Plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_chart_library_shape() {
        let cfg = ChartConfig {
            kind: ChartKind::Line,
            data: ChartData {
                labels: vec!["a".into(), "b".into()],
                datasets: vec![Dataset::new(
                    Some("Donations"),
                    vec![1.0, f64::NAN],
                    Paint::Solid(BLUE.with_alpha(0.2)),
                    Paint::Solid(BLUE),
                    2,
                )],
            },
            options: ChartOptions::default(),
        };
        let v = serde_json::to_value(&cfg).unwrap();
        assert_eq!(v["type"], "line");
        assert_eq!(v["data"]["datasets"][0]["backgroundColor"], "rgba(59, 130, 246, 0.2)");
        assert_eq!(v["data"]["datasets"][0]["data"][1], serde_json::Value::Null);
        assert_eq!(v["options"]["maintainAspectRatio"], false);
        assert!(v["options"].get("indexAxis").is_none());
    }

    #[test]
    fn per_point_paint_cycles() {
        let p = Paint::PerPoint(vec![BLUE, GREEN]);
        assert_eq!(p.at(0), BLUE);
        assert_eq!(p.at(3), GREEN);
    }
}
