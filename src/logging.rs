//! Logging setup
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` wins over the
//! configured level. Logs go to stderr so CLI output stays clean on stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize the global subscriber.
///
/// `default_directive` applies when `RUST_LOG` is unset and the configured
/// level is the default, e.g. `"summit=info,tower_http=debug"`.
pub fn init(config: &LoggingConfig, default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config, default_directive)));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}

fn filter_directive(config: &LoggingConfig, default_directive: &str) -> String {
    if config.level == LoggingConfig::default().level {
        default_directive.to_string()
    } else {
        format!("summit={}", config.level)
    }
}
