//! Line Chart
//!
//! Text line chart of a per-date series. Dates run along the x axis in series
//! order; the y axis is scaled to the series range with 10% padding.

use std::fmt::Write;

use crate::model::DatePoint;

const POINT: char = '*';
const LINE: char = '.';
const LABEL_WIDTH: usize = 10;

/// Chart dimensions
#[derive(Debug, Clone, Copy)]
pub struct ChartConfig {
    /// Plot rows
    pub height: usize,
    /// Columns between consecutive points
    pub spacing: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            height: 10,
            spacing: 6,
        }
    }
}

/// Y-axis bounds after padding
#[derive(Debug, Clone, Copy, PartialEq)]
struct Scale {
    min: f64,
    max: f64,
}

impl Scale {
    fn for_series(series: &[DatePoint]) -> Self {
        let mut min = series.iter().map(|p| p.amount).fold(f64::INFINITY, f64::min);
        let mut max = series
            .iter()
            .map(|p| p.amount)
            .fold(f64::NEG_INFINITY, f64::max);

        let range = max - min;
        let padding = if range > 0.0 { range * 0.1 } else { 1.0 };
        min -= padding;
        max += padding;

        Self { min, max }
    }

    /// Row index for a value, row 0 at the top
    fn row(&self, value: f64, height: usize) -> usize {
        let rows = (height.max(2) - 1) as f64;
        let ratio = (self.max - value) / (self.max - self.min);
        (ratio * rows).round().clamp(0.0, rows) as usize
    }

    /// Value shown at a row
    fn value_at(&self, row: usize, height: usize) -> f64 {
        let rows = (height.max(2) - 1) as f64;
        self.max - (row as f64 / rows) * (self.max - self.min)
    }
}

/// Plot the series onto a character grid
fn plot(series: &[DatePoint], config: &ChartConfig) -> Vec<Vec<char>> {
    let height = config.height.max(2);
    let spacing = config.spacing.max(1);
    let width = (series.len().saturating_sub(1)) * spacing + 1;
    let scale = Scale::for_series(series);

    let mut grid = vec![vec![' '; width]; height];

    // Connecting segments first so points overwrite them
    for (i, pair) in series.windows(2).enumerate() {
        let x0 = i * spacing;
        for step in 1..spacing {
            let t = step as f64 / spacing as f64;
            let value = pair[0].amount + t * (pair[1].amount - pair[0].amount);
            grid[scale.row(value, height)][x0 + step] = LINE;
        }
    }

    for (i, point) in series.iter().enumerate() {
        grid[scale.row(point.amount, height)][i * spacing] = POINT;
    }

    grid
}

/// Render a titled chart for one customer's series
pub fn render_chart(title: &str, series: &[DatePoint], config: &ChartConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);

    if series.is_empty() {
        let _ = writeln!(out, "No transactions to plot");
        return out;
    }

    let height = config.height.max(2);
    let scale = Scale::for_series(series);
    let grid = plot(series, config);
    let labelled = [0, height / 2, height - 1];

    for (row, cells) in grid.iter().enumerate() {
        let label = if labelled.contains(&row) {
            format!("{:.1}", scale.value_at(row, height))
        } else {
            String::new()
        };
        let line: String = cells.iter().collect();
        let _ = writeln!(out, "{:>w$} |{}", label, line.trim_end(), w = LABEL_WIDTH);
    }

    let width = grid.first().map(|r| r.len()).unwrap_or(1);
    let _ = writeln!(out, "{:>w$} +{}", "", "-".repeat(width), w = LABEL_WIDTH);

    let first = &series[0].date;
    let axis = match series.last() {
        Some(last) if series.len() > 1 => {
            let gap = width.saturating_sub(first.len() + last.date.len()).max(1);
            format!("{}{}{}", first, " ".repeat(gap), last.date)
        }
        _ => first.clone(),
    };
    let _ = writeln!(out, "{:>w$}  {}", "", axis, w = LABEL_WIDTH);

    out
}
