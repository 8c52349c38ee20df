//! ASCII plotting of chart configs for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks of what a page would display
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - line charts: `-` segments, `o` points (unless the dataset hides points)
//! - vertical bars: `#` columns
//! - horizontal bars: one row per label and dataset (`#`, `=`, `*`, ...)
//! - doughnuts: a share table with proportional bars

use crate::chart::{ChartConfig, ChartKind, format_tick};

const ROW_MARKS: [char; 4] = ['#', '=', '*', '+'];

/// Render one chart as text.
pub fn render_chart(canvas_id: &str, config: &ChartConfig, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let mut out = header(canvas_id, config);
    out.push('\n');
    let body = match config.kind {
        ChartKind::Line => render_line(config, width, height),
        ChartKind::Bar if config.is_horizontal() => render_rows(config, width),
        ChartKind::Bar => render_columns(config, width, height),
        ChartKind::Doughnut => render_shares(config, width),
    };
    out.push_str(&body);
    out
}

fn header(canvas_id: &str, config: &ChartConfig) -> String {
    let kind = match config.kind {
        ChartKind::Line => "line",
        ChartKind::Bar if config.is_horizontal() => "horizontal bar",
        ChartKind::Bar => "bar",
        ChartKind::Doughnut => "doughnut",
    };
    match config.title() {
        Some(title) => format!("{canvas_id} [{kind}] {title}"),
        None => format!("{canvas_id} [{kind}]"),
    }
}

/// Finite `(index, value)` pairs of a dataset, limited to the label count.
fn indexed_points(config: &ChartConfig, dataset: usize) -> Vec<(f64, f64)> {
    let n = config.data.labels.len();
    config.data.datasets[dataset]
        .data
        .iter()
        .take(n)
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| (i as f64, v))
        .collect()
}

fn value_range(config: &ChartConfig) -> Option<(f64, f64)> {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for ds in &config.data.datasets {
        for &v in ds.data.iter().take(config.data.labels.len()) {
            if v.is_finite() {
                min_v = min_v.min(v);
                max_v = max_v.max(v);
            }
        }
    }
    if min_v.is_finite() && max_v.is_finite() {
        Some((min_v, max_v))
    } else {
        None
    }
}

fn render_line(config: &ChartConfig, width: usize, height: usize) -> String {
    let ticks = config.value_ticks();
    let begin_at_zero = config
        .options
        .scales
        .as_ref()
        .and_then(|s| s.y.as_ref())
        .is_some_and(|a| a.begin_at_zero);

    let Some((mut y_min, y_max)) = value_range(config) else {
        return "(no data)\n".to_string();
    };
    if begin_at_zero {
        y_min = y_min.min(0.0);
    }
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);
    let x_max = (config.data.labels.len().max(2) - 1) as f64;

    let mut grid = vec![vec![' '; width]; height];
    for (idx, ds) in config.data.datasets.iter().enumerate() {
        let points = indexed_points(config, idx);
        draw_curve(&mut grid, &points, 0.0, x_max, y_min, y_max);
        if ds.point_radius != Some(0) {
            for &(x, y) in &points {
                let col = map_x(x, 0.0, x_max, width);
                let row = map_y(y, y_min, y_max, height);
                grid[row][col] = 'o';
            }
        }
    }

    let mut out = format!(
        "y=[{}, {}]\n",
        format_tick(y_min, ticks),
        format_tick(y_max, ticks)
    );
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    if let (Some(first), Some(last)) = (config.data.labels.first(), config.data.labels.last()) {
        out.push_str(&format!("x: {first} .. {last}\n"));
    }
    out
}

fn render_columns(config: &ChartConfig, width: usize, height: usize) -> String {
    let labels = &config.data.labels;
    let Some(ds) = config.data.datasets.first() else {
        return "(no data)\n".to_string();
    };
    if labels.is_empty() {
        return "(no data)\n".to_string();
    }
    let ticks = config.value_ticks();
    let max = value_range(config).map(|(_, hi)| hi).filter(|hi| *hi > 0.0).unwrap_or(1.0);

    let slot = (width / labels.len()).max(1);
    let bar_width = slot.saturating_sub(1).max(1);
    let heights: Vec<usize> = labels
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let v = ds.data.get(i).copied().unwrap_or(f64::NAN);
            if v.is_finite() && v > 0.0 {
                ((v / max) * height as f64).round() as usize
            } else {
                0
            }
        })
        .collect();

    let mut out = String::new();
    for row in 0..height {
        let level = height - row;
        let mut line = String::new();
        for &h in &heights {
            let ch = if h >= level { '#' } else { ' ' };
            line.extend(std::iter::repeat_n(ch, bar_width));
            line.extend(std::iter::repeat_n(' ', slot - bar_width));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    for (i, label) in labels.iter().enumerate() {
        let v = ds.data.get(i).copied().unwrap_or(f64::NAN);
        out.push_str(&format!("{label}: {}\n", fmt_value(v, ticks)));
    }
    out
}

fn render_rows(config: &ChartConfig, width: usize) -> String {
    let labels = &config.data.labels;
    if labels.is_empty() || config.data.datasets.is_empty() {
        return "(no data)\n".to_string();
    }
    let ticks = config.value_ticks();
    let label_w = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0).min(16);
    let bar_space = width.saturating_sub(label_w + 14).max(5);
    let max = value_range(config).map(|(_, hi)| hi).filter(|hi| *hi > 0.0).unwrap_or(1.0);

    let mut out = String::new();
    for (i, label) in labels.iter().enumerate() {
        for (d, ds) in config.data.datasets.iter().enumerate() {
            let v = ds.data.get(i).copied().unwrap_or(f64::NAN);
            let len = if v.is_finite() && v > 0.0 {
                ((v / max) * bar_space as f64).round() as usize
            } else {
                0
            };
            let name: String = if d == 0 { label.chars().take(label_w).collect() } else { String::new() };
            let bar: String = std::iter::repeat_n(ROW_MARKS[d % ROW_MARKS.len()], len).collect();
            out.push_str(&format!("{name:<label_w$} |{bar} {}\n", fmt_value(v, ticks)));
        }
    }
    let legend: Vec<String> = config
        .data
        .datasets
        .iter()
        .enumerate()
        .map(|(d, ds)| format!("{} {}", ROW_MARKS[d % ROW_MARKS.len()], ds.label.as_deref().unwrap_or("-")))
        .collect();
    out.push_str(&legend.join("  "));
    out.push('\n');
    out
}

fn render_shares(config: &ChartConfig, width: usize) -> String {
    let labels = &config.data.labels;
    let Some(ds) = config.data.datasets.first() else {
        return "(no data)\n".to_string();
    };
    let total: f64 = ds.data.iter().take(labels.len()).filter(|v| v.is_finite()).sum();
    let label_w = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0).min(16);
    let bar_space = width.saturating_sub(label_w + 20).max(5);

    let mut out = String::new();
    for (i, label) in labels.iter().enumerate() {
        let v = ds.data.get(i).copied().unwrap_or(f64::NAN);
        let pct = if v.is_finite() && total > 0.0 { v / total * 100.0 } else { 0.0 };
        let len = ((pct / 100.0) * bar_space as f64).round() as usize;
        let bar: String = std::iter::repeat_n('#', len).collect();
        let name: String = label.chars().take(label_w).collect();
        out.push_str(&format!(
            "{name:<label_w$} {pct:>5.1}% {bar:<bar_space$} {}\n",
            fmt_value(v, crate::chart::TickFormat::Currency)
        ));
    }
    out
}

fn fmt_value(v: f64, ticks: crate::chart::TickFormat) -> String {
    if v.is_finite() { format_tick(v, ticks) } else { "-".to_string() }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = if span > 0.0 { span * frac } else { min.abs().max(1.0) * frac };
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, '-'),
            None => grid[row][col] = '-',
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::builders;
    use crate::domain::{CampaignPerformance, SeriesData, defaults};
    use crate::store::{PeriodStore, switch_period};

    #[test]
    fn bar_golden_snapshot_small() {
        let cfg = builders::monthly_donations(&SeriesData::new(["A", "B"], [100.0, 50.0]));
        let txt = render_chart("monthlyDonationsChart", &cfg, 10, 5);
        let expected = concat!(
            "monthlyDonationsChart [bar]\n",
            "####\n",
            "####\n",
            "#### ####\n",
            "#### ####\n",
            "#### ####\n",
            "A: $100\n",
            "B: $50\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn horizontal_rows_golden_snapshot() {
        let cfg = builders::campaign_performance(&CampaignPerformance {
            labels: vec!["Roof".into()],
            raised: vec![50.0],
            goals: vec![100.0],
        });
        let txt = render_chart("campaignPerformanceChart", &cfg, 28, 5);
        let expected = concat!(
            "campaignPerformanceChart [horizontal bar]\n",
            "Roof |##### $50\n",
            "     |========== $100\n",
            "# Raised  = Goal\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn line_chart_shows_title_and_label_span() {
        let store = PeriodStore::from_attribute(None);
        let cfg = builders::donation_trends(&switch_period(&store, "month"));
        let txt = render_chart("donationChart", &cfg, 40, 8);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "donationChart [line] Monthly Donations");
        assert_eq!(lines[lines.len() - 1], "x: Week 1 .. Week 4");
        let grid = &lines[2..lines.len() - 1];
        assert_eq!(grid.len(), 8);
        assert_eq!(grid.iter().map(|l| l.matches('o').count()).sum::<usize>(), 4);
    }

    #[test]
    fn doughnut_lists_shares() {
        let cfg = builders::donation_sources(&defaults::sources());
        let txt = render_chart("donationSourcesChart", &cfg, 60, 5);
        assert!(txt.contains("Direct        39.6%"));
        assert!(txt.contains("$2,450"));
    }

    #[test]
    fn empty_series_render_placeholder() {
        let cfg = builders::monthly_donations(&SeriesData::new(Vec::<String>::new(), Vec::new()));
        assert!(render_chart("m", &cfg, 20, 5).ends_with("(no data)\n"));
        let line = builders::sparkline(&[], builders::SparklineTone::Donations);
        assert!(render_chart("s", &line, 20, 5).ends_with("(no data)\n"));
    }
}
