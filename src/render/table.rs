//! Table output
//!
//! Renders customer summaries, selector entries and date series as aligned
//! text, CSV or JSON.

use std::fmt::Write;

use super::{OutputFormat, RenderError};
use crate::dashboard::CustomerOption;
use crate::model::{CustomerSummary, DatePoint};

const NAME_HEADER: &str = "Name";
const AMOUNT_HEADER: &str = "Transaction Amount";

/// Render the customer totals table
pub fn render_summaries(
    rows: &[CustomerSummary],
    format: OutputFormat,
) -> Result<String, RenderError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => write_csv(
            &["id", "name", "amount"],
            rows.iter()
                .map(|r| vec![r.id.to_string(), r.name.clone(), format_amount(r.amount)]),
        ),
        OutputFormat::Table => {
            if rows.is_empty() {
                return Ok("No customers match the search\n".to_string());
            }
            let width = rows
                .iter()
                .map(|r| r.name.chars().count())
                .max()
                .unwrap_or(0)
                .max(NAME_HEADER.len());

            let mut out = String::new();
            let _ = writeln!(out, "{:<width$} | {}", NAME_HEADER, AMOUNT_HEADER);
            let _ = writeln!(out, "{}", "-".repeat(width + 3 + AMOUNT_HEADER.len()));
            for row in rows {
                let _ = writeln!(
                    out,
                    "{:<width$} | {:>w2$}",
                    row.name,
                    format_amount(row.amount),
                    w2 = AMOUNT_HEADER.len()
                );
            }
            Ok(out)
        }
    }
}

/// Render the customer selector list
pub fn render_options(
    options: &[CustomerOption],
    format: OutputFormat,
) -> Result<String, RenderError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(options)?),
        OutputFormat::Csv => write_csv(
            &["id", "name"],
            options.iter().map(|o| vec![o.id.to_string(), o.name.clone()]),
        ),
        OutputFormat::Table => {
            if options.is_empty() {
                return Ok("No customers\n".to_string());
            }
            let mut out = String::new();
            let _ = writeln!(out, "{:<8} {}", "ID", NAME_HEADER);
            let _ = writeln!(out, "{}", "-".repeat(30));
            for option in options {
                let _ = writeln!(out, "{:<8} {}", option.id, option.name);
            }
            Ok(out)
        }
    }
}

/// Render a date series as rows (the chart has its own renderer)
pub fn render_series(series: &[DatePoint], format: OutputFormat) -> Result<String, RenderError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(series)?),
        OutputFormat::Csv => write_csv(
            &["date", "amount"],
            series
                .iter()
                .map(|p| vec![p.date.clone(), format_amount(p.amount)]),
        ),
        OutputFormat::Table => {
            let mut out = String::new();
            let _ = writeln!(out, "{:<12} | {}", "Date", "Amount");
            let _ = writeln!(out, "{}", "-".repeat(26));
            for point in series {
                let _ = writeln!(out, "{:<12} | {:>10}", point.date, format_amount(point.amount));
            }
            Ok(out)
        }
    }
}

/// Whole amounts print without decimals, others with two
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    }
}

fn write_csv<I>(header: &[&str], records: I) -> Result<String, RenderError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for record in records {
        writer.write_record(&record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| RenderError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| RenderError::Csv(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<CustomerSummary> {
        vec![
            CustomerSummary {
                id: 1,
                name: "Ahmed Ali".to_string(),
                amount: 3125.0,
            },
            CustomerSummary {
                id: 2,
                name: "Aya, Elsayed".to_string(),
                amount: 1850.5,
            },
        ]
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(8.0), "8");
        assert_eq!(format_amount(1850.5), "1850.50");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn test_table_has_header_and_rows() {
        let out = render_summaries(&rows(), OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[0].ends_with("Transaction Amount"));
        assert!(lines[2].starts_with("Ahmed Ali"));
        assert!(lines[2].ends_with("3125"));
        assert!(lines[3].ends_with("1850.50"));
    }

    #[test]
    fn test_idle_customer_renders_plain_zero() {
        use crate::model::Customer;
        use crate::pipeline::customer_totals;

        let idle = customer_totals(&[Customer::new(1, "Acme")], &[], "");
        assert_eq!(format_amount(idle[0].amount), "0");

        let table = render_summaries(&idle, OutputFormat::Table).unwrap();
        assert!(table.lines().nth(2).unwrap().ends_with(" 0"));
        assert!(!table.contains("-0"));

        let csv = render_summaries(&idle, OutputFormat::Csv).unwrap();
        assert_eq!(csv, "id,name,amount\n1,Acme,0\n");

        let json = render_summaries(&idle, OutputFormat::Json).unwrap();
        assert!(!json.contains("-0"));
    }

    #[test]
    fn test_empty_table() {
        let out = render_summaries(&[], OutputFormat::Table).unwrap();
        assert_eq!(out, "No customers match the search\n");
    }

    #[test]
    fn test_csv_quotes_names() {
        let out = render_summaries(&rows(), OutputFormat::Csv).unwrap();
        assert_eq!(
            out,
            "id,name,amount\n1,Ahmed Ali,3125\n2,\"Aya, Elsayed\",1850.50\n"
        );
    }

    #[test]
    fn test_json_rows() {
        let out = render_summaries(&rows(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["amount"], 3125.0);
        assert_eq!(value[1]["name"], "Aya, Elsayed");
    }

    #[test]
    fn test_options_table() {
        let options = vec![CustomerOption {
            id: 7,
            name: "Acme".to_string(),
        }];
        let out = render_options(&options, OutputFormat::Table).unwrap();
        assert!(out.lines().any(|l| l.starts_with("7") && l.ends_with("Acme")));
    }

    #[test]
    fn test_series_csv() {
        let series = vec![DatePoint {
            date: "2024-01-01".to_string(),
            amount: 8.0,
        }];
        let out = render_series(&series, OutputFormat::Csv).unwrap();
        assert_eq!(out, "date,amount\n2024-01-01,8\n");
    }
}
