//! HTTP/2 negotiation subsystem.
//!
//! # Data Flow
//! ```text
//! accepted connection (HTTP/1.1 by default)
//!     → sniffer.rs (TLS handshake / ALPN, or connection preface peek)
//!     → compliance.rs (RFC 7540 TLS requirements, strict)
//!     → ProtocolEngine (external HTTP/2 implementation)
//! ```
//!
//! # Design Decisions
//! - Sniffing never consumes input: a declined connection is parsed as
//!   HTTP/1.1 from its first byte
//! - Sniffing errors decline the upgrade instead of failing the connection
//! - The cipher table lives in its own module and is indexed once at startup

use std::fmt;

pub mod ciphers;
pub mod compliance;
pub mod sniffer;

pub use compliance::{ComplianceFailure, SecurityPolicy};
pub use sniffer::{Dispatch, ProtocolEngine, ProtocolSniffer};

/// Connection preface every HTTP/2 client sends first (RFC 7540, section 3.5).
pub const PREFACE: &[u8; 24] = b"PRI * HTTP/2.0\r\n\r\nSM\r\n\r\n";

/// ALPN token of the default protocol.
pub const HTTP1_TOKEN: &str = "http/1.1";

/// HTTP/2 variants a connection can switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// HTTP/2 over TLS.
    H2,
    /// HTTP/2 over cleartext TCP.
    H2c,
}

impl Protocol {
    /// Protocol identifier as used by ALPN and the Upgrade header.
    pub fn token(self) -> &'static str {
        match self {
            Protocol::H2 => "h2",
            Protocol::H2c => "h2c",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "h2" => Some(Protocol::H2),
            "h2c" => Some(Protocol::H2c),
            _ => None,
        }
    }

    /// Protocol selected through ALPN. Only `h2` may be negotiated over TLS.
    pub fn from_alpn(alpn: &[u8]) -> Option<Self> {
        (alpn == Protocol::H2.token().as_bytes()).then_some(Protocol::H2)
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip() {
        for protocol in [Protocol::H2, Protocol::H2c] {
            assert_eq!(Protocol::from_token(protocol.token()), Some(protocol));
        }
        assert_eq!(Protocol::from_token("http/1.1"), None);
    }

    #[test]
    fn alpn_only_selects_h2() {
        assert_eq!(Protocol::from_alpn(b"h2"), Some(Protocol::H2));
        assert_eq!(Protocol::from_alpn(b"h2c"), None);
        assert_eq!(Protocol::from_alpn(b"http/1.1"), None);
    }

    #[test]
    fn preface_is_24_bytes() {
        assert_eq!(PREFACE.len(), 24);
        assert!(PREFACE.starts_with(b"PRI * HTTP/2.0"));
    }
}
