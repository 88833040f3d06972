//! Structured logging for Tellus tools.
//!
//! Console output via the `tracing` ecosystem, filterable through `RUST_LOG`
//! or an explicit filter string.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for a Tellus binary.
///
/// `RUST_LOG` wins when set; otherwise `filter` is used, falling back to
/// `"info"` when `None`. Call once at startup.
pub fn init_logging(filter: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or("info")));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

/// The default filter used when neither `RUST_LOG` nor a CLI filter is set.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_is_info() {
        let filter = default_env_filter();
        assert!(format!("{filter}").contains("info"));
    }

    #[test]
    fn test_explicit_filter_strings_parse() {
        let filters = ["info", "debug,tellus_surface=trace", "warn", "error"];
        for text in &filters {
            assert!(
                EnvFilter::try_new(text).is_ok(),
                "Filter should parse: {text}"
            );
        }
    }
}
