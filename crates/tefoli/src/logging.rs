//! Log output for applications built on tefoli.
//!
//! The wrappers log through `tracing`; this module installs a subscriber
//! printing those events.

use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Directives used when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVES: &str = "tefoli_dl=info";

/// Initializes log output.
///
/// Safe to call multiple times - only the first call has effect. Filtering
/// follows `RUST_LOG`, defaulting to [`DEFAULT_DIRECTIVES`]. Does nothing if
/// another global subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init();
    });
}

/// Returns true once [`init`] ran.
pub fn is_initialized() -> bool {
    INIT.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();

        assert!(is_initialized());
        tracing::info!("logging initialized");
    }

    #[test]
    fn test_default_directives_parse() {
        assert!(DEFAULT_DIRECTIVES.parse::<tracing_subscriber::filter::Directive>().is_ok());
    }
}
