//! Tracing initialization

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Environment variable holding a full `EnvFilter` directive
pub const LOG_ENV: &str = "TRIPBUDGET_LOG";

/// Initialize logging to stderr.
///
/// `TRIPBUDGET_LOG` wins when set and valid. Otherwise the configured level
/// is used, raised by one step per `verbosity`. Safe to call more than once;
/// only the first call installs a subscriber.
pub fn init_tracing(logging: &LoggingConfig, verbosity: u8) {
    INIT.call_once(|| {
        let level = effective_level(&logging.level, verbosity);
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(format!("tripbudget={level}")));

        let registry = tracing_subscriber::registry().with(filter);
        if logging.format == "json" {
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        } else {
            registry
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .init();
        }
    });
}

/// Configured level raised by `verbosity` steps, capped at trace
#[must_use]
pub fn effective_level(configured: &str, verbosity: u8) -> &'static str {
    const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
    let base = LEVELS.iter().position(|l| *l == configured).unwrap_or(1);
    LEVELS[(base + usize::from(verbosity)).min(LEVELS.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("warn", 0, "warn")]
    #[case("warn", 1, "info")]
    #[case("warn", 2, "debug")]
    #[case("info", 9, "trace")]
    #[case("bogus", 0, "warn")]
    fn test_effective_level(#[case] configured: &str, #[case] verbosity: u8, #[case] expected: &str) {
        assert_eq!(effective_level(configured, verbosity), expected);
    }

    #[test]
    fn test_init_is_idempotent() {
        let logging = LoggingConfig::default();
        init_tracing(&logging, 0);
        init_tracing(&logging, 2);
    }
}
