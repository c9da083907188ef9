//! Summit CLI
//!
//! Terminal dashboard over the customers/transactions service:
//! - Show per-customer totals, filtered by name
//! - List customers for selection
//! - Chart one customer's amounts by date
//! - Check the loaded data

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use summit::config::{self, Config, ConfigLoad};
use summit::dashboard::{Dashboard, ViewQuery};
use summit::pipeline;
use summit::render::{self, ChartConfig, OutputFormat};
use summit::source::{DataSource, HttpSource, MemorySource};

#[derive(Parser)]
#[command(name = "summit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Customer transaction dashboard")]
#[command(long_about = "Summit fetches customers and transactions once, then shows per-customer totals,\na name search, and a per-date chart for a selected customer.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Service base URL (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Read customers and transactions from a JSON file instead of the service
    #[arg(long, global = true, conflicts_with = "base_url")]
    pub from_file: Option<PathBuf>,

    /// Config file (default: standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Per-customer transaction totals
    Table {
        /// Case-insensitive name filter
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// List customers available for selection
    Customers,

    /// Chart one customer's amounts by date
    Chart {
        /// Customer identifier
        #[arg(short, long, required_unless_present = "position")]
        customer: Option<u64>,
        /// 1-based position in the customer list
        #[arg(short, long, conflicts_with = "customer")]
        position: Option<usize>,
        /// Chart height in rows
        #[arg(long, default_value = "10")]
        height: usize,
    },

    /// Table, customer list and (with --customer) chart together
    Dashboard {
        /// Case-insensitive name filter
        #[arg(short, long, default_value = "")]
        search: String,
        /// Customer identifier to chart
        #[arg(short, long)]
        customer: Option<u64>,
    },

    /// Summarize the loaded data
    Check,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_deref());
    }

    let loaded = match &cli.config {
        Some(path) => ConfigLoad::explicit(path, Config::load_with_env(path)?),
        None => Config::load_default(),
    };

    summit::logging::init(&loaded.config.logging, "summit=info");
    loaded.report();

    let mut config = loaded.config;
    if let Some(url) = &cli.base_url {
        config.source.base_url = url.clone();
    }

    let source: Arc<dyn DataSource> = match &cli.from_file {
        Some(path) => Arc::new(
            MemorySource::from_file(path)
                .with_context(|| format!("Failed to read data file {:?}", path))?,
        ),
        None => Arc::new(HttpSource::new(config.source.http())?),
    };

    let dashboard = Dashboard::new();
    tracing::info!("Loading data from {}...", source.describe());
    dashboard
        .load(source.as_ref())
        .await
        .with_context(|| format!("Could not load data from {}", source.describe()))?;

    let output = match cli.command {
        Commands::Table { search } => {
            let rows = dashboard.rows(&search).await?;
            render::render_summaries(&rows, cli.format)?
        }

        Commands::Customers => {
            let options = dashboard.options().await?;
            render::render_options(&options, cli.format)?
        }

        Commands::Chart {
            customer,
            position,
            height,
        } => {
            let customer_id = match (customer, position) {
                (Some(id), _) => id,
                (None, Some(position)) => {
                    let snapshot = dashboard.snapshot().await?;
                    pipeline::customer_at_position(&snapshot.customers, position)
                        .map(|c| c.id)
                        .ok_or_else(|| {
                            anyhow!(
                                "No customer at position {} (the list has {} customers)",
                                position,
                                snapshot.customers.len()
                            )
                        })?
                }
                (None, None) => return Err(anyhow!("Pass --customer or --position")),
            };

            let selection = dashboard.selection(customer_id).await?;
            match cli.format {
                OutputFormat::Table => {
                    let title = format!(
                        "{} (total {})",
                        selection.customer.name,
                        render::format_amount(selection.total)
                    );
                    let chart = ChartConfig {
                        height,
                        ..ChartConfig::default()
                    };
                    render::render_chart(&title, &selection.series, &chart)
                }
                format => render::render_series(&selection.series, format)?,
            }
        }

        Commands::Dashboard { search, customer } => {
            let query = ViewQuery {
                search,
                selected: customer,
            };
            let view = dashboard.view(&query).await?;
            render::render_dashboard(&view, cli.format, &ChartConfig::default())?
        }

        Commands::Check => {
            let snapshot = dashboard.snapshot().await?;
            let unmatched =
                pipeline::unmatched_transactions(&snapshot.customers, &snapshot.transactions);

            let mut out = String::new();
            out.push_str(&format!("Source: {}\n", source.describe()));
            out.push_str(&format!("Customers: {}\n", snapshot.customers.len()));
            out.push_str(&format!("Transactions: {}\n", snapshot.transactions.len()));
            out.push_str(&format!("Unmatched transactions: {}\n", unmatched.len()));
            if !unmatched.is_empty() {
                out.push_str("\nUnmatched (first 10):\n");
                for tx in unmatched.iter().take(10) {
                    out.push_str(&format!(
                        "  #{} customer_id={} date={} amount={}\n",
                        tx.id,
                        tx.customer_id,
                        tx.date,
                        render::format_amount(tx.amount)
                    ));
                }
            }
            out
        }

        Commands::Config { .. } => unreachable!("handled before loading"),
    };

    print!("{}", output);
    Ok(())
}

fn write_default_config(output: Option<&std::path::Path>) -> anyhow::Result<()> {
    let content = config::generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &content)?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }

    Ok(())
}
