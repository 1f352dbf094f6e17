//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Process-level settings (worker count, identity).
    pub server: ProcessConfig,

    /// Listening endpoints.
    pub listeners: Vec<ListenerConfig>,

    /// HTTP/2 negotiation settings.
    pub h2: H2Config,

    /// Connection I/O settings.
    pub io: IoConfig,

    /// Worker supervision settings.
    pub supervisor: SupervisorConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: ProcessConfig::default(),
            listeners: vec![ListenerConfig::default()],
            h2: H2Config::default(),
            io: IoConfig::default(),
            supervisor: SupervisorConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Process-level settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProcessConfig {
    /// Server description, sent in the User-Agent of internal dummy connections.
    pub description: String,

    /// Number of worker processes forked at startup.
    pub workers: usize,

    /// Directory the process changes into before dumping core.
    pub coredump_dir: String,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            description: format!("h2mpm/{}", env!("CARGO_PKG_VERSION")),
            workers: 4,
            coredump_dir: std::env::temp_dir().display().to_string(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Protocol served on this endpoint ("http" or "https").
    pub protocol: String,

    /// Optional TLS configuration. Required when protocol is "https".
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            protocol: "http".to_string(),
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// HTTP/2 negotiation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct H2Config {
    /// Sniff for the connection preface on connections that did not
    /// negotiate h2 (direct mode).
    pub direct: bool,

    /// Enforce RFC 7540 TLS requirements (TLS 1.2+, no blacklisted cipher).
    pub modern_tls_only: bool,
}

impl Default for H2Config {
    fn default() -> Self {
        Self {
            direct: true,
            modern_tls_only: true,
        }
    }
}

/// When output is coalesced in the channel's write buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferOutput {
    /// Buffer only on TLS transports.
    Auto,
    /// Always buffer.
    Always,
    /// Never buffer.
    Never,
}

/// Connection I/O settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IoConfig {
    /// Output buffering policy.
    pub buffer_output: BufferOutput,

    /// Capacity of the output buffer in bytes.
    pub write_buffer_size: usize,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            buffer_output: BufferOutput::Auto,
            write_buffer_size: 64 * 1024,
        }
    }
}

/// Worker supervision settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SupervisorConfig {
    /// How often exited workers are reaped, in milliseconds.
    pub relieve_interval_ms: u64,

    /// Connect timeout for the dummy wakeup connection, in seconds.
    pub wakeup_timeout_secs: u64,

    /// How long a dying worker waits for its connections to finish, in seconds.
    pub drain_timeout_secs: u64,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            relieve_interval_ms: 1000,
            wakeup_timeout_secs: 3,
            drain_timeout_secs: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
