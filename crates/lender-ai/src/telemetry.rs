//! Structured logging setup for the qualification service.
//!
//! `RUST_LOG` wins outright when present. Otherwise the configured
//! `LENDER_LOG_LEVEL` seeds the filter with HTTP-stack internals capped at
//! warn, so running the service at debug surfaces borrower workflow logs
//! rather than connection chatter.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

/// Dependency targets held below the service's own level.
const QUIET_TARGETS: [&str; 3] = ["hyper", "tower", "mio"];

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("log filter '{value}' is not a valid tracing directive set")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("tracing subscriber could not be installed: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync>),
}

/// Expand the configured level into a full directive set. Targets listed
/// after the base level take precedence, so the caps apply even when the
/// level itself is a multi-directive string.
fn filter_directives(config: &TelemetryConfig) -> String {
    let mut directives = config.log_level.trim().to_string();
    for target in QUIET_TARGETS {
        directives.push(',');
        directives.push_str(target);
        directives.push_str("=warn");
    }
    directives
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directives = filter_directives(config);
            EnvFilter::try_new(&directives).map_err(|source| TelemetryError::Filter {
                value: directives,
                source,
            })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Install)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cap_dependency_noise() {
        let config = TelemetryConfig {
            log_level: "debug".to_string(),
        };
        let directives = filter_directives(&config);
        assert!(directives.starts_with("debug"));
        for target in QUIET_TARGETS {
            assert!(directives.contains(&format!("{target}=warn")));
        }
        EnvFilter::try_new(&directives).expect("directive set parses");
    }

    #[test]
    fn garbage_level_fails_filter_parse() {
        let config = TelemetryConfig {
            log_level: "info=debug=trace".to_string(),
        };
        assert!(EnvFilter::try_new(&filter_directives(&config)).is_err());
    }
}
