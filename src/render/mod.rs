//! Terminal Presentation
//!
//! Text renderings of the dashboard: the totals table, the customer selector
//! and the per-date line chart. All output is built as strings; printing is
//! left to the caller.

mod chart;
mod table;

pub use chart::{render_chart, ChartConfig};
pub use table::{format_amount, render_options, render_series, render_summaries};

use std::fmt::Write;

use crate::dashboard::DashboardView;

/// Output format for tabular data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

/// Errors that can occur while rendering
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("CSV error: {0}")]
    Csv(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<csv::Error> for RenderError {
    fn from(err: csv::Error) -> Self {
        RenderError::Csv(err.to_string())
    }
}

/// Render the full dashboard: table, selector and, when selected, the chart.
///
/// JSON output is the view itself; CSV output is the table only.
pub fn render_dashboard(
    view: &DashboardView,
    format: OutputFormat,
    chart: &ChartConfig,
) -> Result<String, RenderError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(view)?),
        OutputFormat::Csv => render_summaries(&view.rows, format),
        OutputFormat::Table => {
            let mut out = render_summaries(&view.rows, format)?;
            let _ = writeln!(out);
            let _ = writeln!(out, "Customers");
            out.push_str(&render_options(&view.options, format)?);

            if let Some(selection) = &view.selection {
                let title = format!(
                    "{} (total {})",
                    selection.customer.name,
                    format_amount(selection.total)
                );
                let _ = writeln!(out);
                out.push_str(&render_chart(&title, &selection.series, chart));
            }
            Ok(out)
        }
    }
}
