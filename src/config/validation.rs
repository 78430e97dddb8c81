//! Semantic configuration checks.
//!
//! Syntactic validity is serde's job; this module rejects configs that
//! deserialize fine but cannot run (unparseable addresses, a request
//! timeout shorter than the maximum delay, paths that are not absolute).

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic validation failure.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),

    #[error("request timeout {timeout_secs}s is shorter than max delay {max_delay_ms}ms")]
    TimeoutBelowMaxDelay { timeout_secs: u64, max_delay_ms: u64 },

    #[error("max_payload_bytes {0} exceeds the 16 MiB ceiling")]
    PayloadLimitTooLarge(usize),

    #[error("final_path '{0}' must start with '/'")]
    RelativeFinalPath(String),
}

/// Check a deserialized config for semantic problems.
///
/// Collects all failures rather than stopping at the first, so an operator
/// sees every problem in one pass.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs.saturating_mul(1000) <= config.limits.max_delay_ms {
        errors.push(ValidationError::TimeoutBelowMaxDelay {
            timeout_secs: config.timeouts.request_secs,
            max_delay_ms: config.limits.max_delay_ms,
        });
    }

    if config.limits.max_payload_bytes > 16 * 1024 * 1024 {
        errors.push(ValidationError::PayloadLimitTooLarge(
            config.limits.max_payload_bytes,
        ));
    }

    if !config.site.final_path.starts_with('/') {
        errors.push(ValidationError::RelativeFinalPath(
            config.site.final_path.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn rejects_bad_bind_address() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::InvalidBindAddress(_)
        ));
    }

    #[test]
    fn rejects_timeout_below_max_delay() {
        let mut config = ServerConfig::default();
        config.timeouts.request_secs = 5;
        config.limits.max_delay_ms = 10_000;
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::TimeoutBelowMaxDelay { .. }
        ));
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "bogus".to_string();
        config.site.final_path = "final".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
