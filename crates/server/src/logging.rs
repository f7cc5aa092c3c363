//! Log filter setup.
//!
//! `RUST_LOG` replaces the defaults entirely when set, so any directive it
//! carries (including `tokengate_server=debug` for per-token events) wins.

use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset, empty or unparsable.
pub const DEFAULT_LOG_DIRECTIVES: &str = "tokengate_server=info,tokengate_core=info";

/// Builds the log filter from a `RUST_LOG` value.
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

/// Installs the JSON subscriber, filtered by the `RUST_LOG` environment variable.
pub fn setup_logging() {
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .init();
}
