//! Plotters-powered line chart widget for Ratatui.
//!
//! Used for the donation trends chart: category labels on x, amounts on y.
//! Output is drawn into the Ratatui buffer through `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::chart::{ChartConfig, Rgba, format_tick};

/// A render-only view of one line chart config.
///
/// Series and bounds are computed up front by `from_config`, so `render()`
/// only draws.
pub struct TrendPlottersChart<'a> {
    pub labels: &'a [String],
    /// `(index, value)` per dataset, gaps removed.
    pub series: Vec<(Rgba, Vec<(f64, f64)>)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub fmt_y: fn(f64) -> String,
}

impl<'a> TrendPlottersChart<'a> {
    pub fn from_config(config: &'a ChartConfig) -> Self {
        let labels = &config.data.labels;
        let series: Vec<(Rgba, Vec<(f64, f64)>)> = config
            .data
            .datasets
            .iter()
            .map(|ds| {
                let points = ds
                    .data
                    .iter()
                    .take(labels.len())
                    .enumerate()
                    .filter(|(_, v)| v.is_finite())
                    .map(|(i, &v)| (i as f64, v))
                    .collect();
                (ds.border_color.at(0), points)
            })
            .collect();

        let (mut y_min, mut y_max) = (0.0_f64, f64::NEG_INFINITY);
        for (_, points) in &series {
            for &(_, y) in points {
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }
        if !y_max.is_finite() || y_max <= y_min {
            y_max = y_min + 1.0;
        }
        let pad = (y_max - y_min).abs() * 0.05;

        Self {
            labels,
            series,
            x_bounds: [0.0, (labels.len().max(2) - 1) as f64],
            y_bounds: [y_min, y_max + pad],
            fmt_y: currency_tick,
        }
    }

    fn label_at(&self, x: f64) -> String {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        self.labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

fn currency_tick(v: f64) -> String {
    format_tick(v, crate::chart::TickFormat::Currency)
}

impl<'a> Widget for TrendPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let n_labels = self.labels.len().clamp(2, 7);
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(n_labels)
                .y_labels(5)
                .x_label_formatter(&|v| self.label_at(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for (color, points) in &self.series {
                let color = RGBColor(color.0, color.1, color.2);
                chart.draw_series(LineSeries::new(points.iter().copied(), &color))?;
                // Circles are mis-scaled by the terminal backend; a pixel marks each point.
                chart.draw_series(points.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::builders;
    use crate::domain::SeriesData;
    use crate::store::ActiveChartState;

    #[test]
    fn bounds_start_at_zero_and_cover_values() {
        let state = ActiveChartState {
            period: crate::domain::Period::Week,
            series: SeriesData::new(["a", "b", "c"], [10.0, f64::NAN, 30.0]),
            title: None,
        };
        let cfg = builders::donation_trends(&state);
        let chart = TrendPlottersChart::from_config(&cfg);
        assert_eq!(chart.x_bounds, [0.0, 2.0]);
        assert_eq!(chart.y_bounds[0], 0.0);
        assert!(chart.y_bounds[1] > 30.0);
        assert_eq!(chart.series[0].1, vec![(0.0, 10.0), (2.0, 30.0)]);
        assert_eq!(chart.label_at(2.0), "c");
        assert_eq!(chart.label_at(0.5), "");
    }
}
