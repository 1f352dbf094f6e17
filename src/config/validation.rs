//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (worker count, buffer sizes, timeouts)
//! - Check listener addresses and TLS material presence
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.workers must be at least 1")]
    NoWorkers,

    #[error("at least one listener is required")]
    NoListeners,

    #[error("listener {index}: invalid bind address {address:?}")]
    BadAddress { index: usize, address: String },

    #[error("listener {index}: unknown protocol {protocol:?}")]
    UnknownProtocol { index: usize, protocol: String },

    #[error("listener {index}: https requires a [tls] section")]
    MissingTls { index: usize },

    #[error("io.write_buffer_size must be greater than 0")]
    ZeroWriteBuffer,

    #[error("supervisor.{0} must be greater than 0")]
    ZeroTimer(&'static str),
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.workers == 0 {
        errors.push(ValidationError::NoWorkers);
    }

    if config.listeners.is_empty() {
        errors.push(ValidationError::NoListeners);
    }

    for (index, listener) in config.listeners.iter().enumerate() {
        if listener.bind_address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::BadAddress {
                index,
                address: listener.bind_address.clone(),
            });
        }

        match listener.protocol.to_ascii_lowercase().as_str() {
            "http" => {}
            "https" => {
                if listener.tls.is_none() {
                    errors.push(ValidationError::MissingTls { index });
                }
            }
            _ => errors.push(ValidationError::UnknownProtocol {
                index,
                protocol: listener.protocol.clone(),
            }),
        }
    }

    if config.io.write_buffer_size == 0 {
        errors.push(ValidationError::ZeroWriteBuffer);
    }

    if config.supervisor.relieve_interval_ms == 0 {
        errors.push(ValidationError::ZeroTimer("relieve_interval_ms"));
    }
    if config.supervisor.wakeup_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimer("wakeup_timeout_secs"));
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
    use crate::config::schema::ListenerConfig;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&ServerConfig::default()), Ok(()));
    }

    #[test]
    fn https_without_tls_is_rejected() {
        let mut config = ServerConfig::default();
        config.listeners = vec![ListenerConfig {
            bind_address: "127.0.0.1:8443".into(),
            protocol: "HTTPS".into(),
            tls: None,
        }];

        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::MissingTls { index: 0 }])
        );
    }

    #[test]
    fn collects_all_listener_errors() {
        let mut config = ServerConfig::default();
        config.listeners = vec![ListenerConfig {
            bind_address: "not-an-address".into(),
            protocol: "gopher".into(),
            tls: None,
        }];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ValidationError::UnknownProtocol {
            index: 0,
            protocol: "gopher".into()
        }));
    }
}
