//! Transport security requirements for HTTP/2 (RFC 7540, section 9.2).
//!
//! # Responsibilities
//! - Hold the prohibited cipher table, built once at startup
//! - Decide whether an encrypted connection may carry HTTP/2
//! - Report the exact reason a connection fails
//!
//! # Design Decisions
//! - The policy is an immutable value shared via `Arc`; connections only read it
//! - Missing version or cipher information fails only in strict mode
//!   (`require_all`); an encrypted transport with no session data at all
//!   always fails because nothing can be checked

use std::collections::HashMap;

use thiserror::Error;

use crate::h2::ciphers::{RFC7540_BLACKLIST, RFC7540_IANA_ONLY, RFC7540_SOURCE};
use crate::net::connection::ConnectionId;
use crate::net::transport::{TlsSession, Transport};

/// Why a connection does not meet the security requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComplianceFailure {
    #[error("TLS protocol not suitable: {0}")]
    ProtocolNotSuitable(String),

    #[error("TLS protocol is undetermined")]
    ProtocolUnknown,

    #[error("TLS cipher {cipher} blacklisted by {rule}")]
    CipherBlacklisted {
        cipher: String,
        rule: &'static str,
    },

    #[error("TLS cipher is undetermined")]
    CipherUnknown,

    #[error("TLS session parameters unavailable")]
    LookupUnavailable,
}

/// Process-wide security policy for HTTP/2 connections.
#[derive(Debug, Clone)]
pub struct SecurityPolicy {
    enforce: bool,
    blacklist: HashMap<&'static str, &'static str>,
}

impl SecurityPolicy {
    /// The RFC 7540 policy. When `enforce` is false every connection passes.
    pub fn rfc7540(enforce: bool) -> Self {
        let mut blacklist = HashMap::with_capacity(RFC7540_BLACKLIST.len() * 2 + RFC7540_IANA_ONLY.len());
        for (openssl, iana) in RFC7540_BLACKLIST {
            blacklist.insert(*openssl, RFC7540_SOURCE);
            blacklist.insert(*iana, RFC7540_SOURCE);
        }
        for iana in RFC7540_IANA_ONLY {
            blacklist.insert(*iana, RFC7540_SOURCE);
        }

        tracing::debug!(entries = blacklist.len(), enforce, "Cipher blacklist loaded");

        Self { enforce, blacklist }
    }

    pub fn is_enforced(&self) -> bool {
        self.enforce
    }

    /// Source tag of the rule that prohibits `cipher`, if any.
    pub fn blacklist_source(&self, cipher: &str) -> Option<&'static str> {
        self.blacklist.get(cipher).copied()
    }

    /// Check negotiated parameters. `session` is `None` when they could not
    /// be looked up.
    pub fn check(
        &self,
        is_tls: bool,
        session: Option<&TlsSession>,
        require_all: bool,
    ) -> Result<(), ComplianceFailure> {
        if !is_tls || !self.enforce {
            return Ok(());
        }
        let session = session.ok_or(ComplianceFailure::LookupUnavailable)?;

        match non_empty(session.protocol_version.as_deref()) {
            Some(version) if !version_is_suitable(version) => {
                return Err(ComplianceFailure::ProtocolNotSuitable(version.to_string()));
            }
            Some(_) => {}
            None if require_all => return Err(ComplianceFailure::ProtocolUnknown),
            None => {}
        }

        match non_empty(session.cipher.as_deref()) {
            Some(cipher) => {
                if let Some(source) = self.blacklist_source(cipher) {
                    return Err(ComplianceFailure::CipherBlacklisted {
                        cipher: cipher.to_string(),
                        rule: source,
                    });
                }
            }
            None if require_all => return Err(ComplianceFailure::CipherUnknown),
            None => {}
        }

        Ok(())
    }

    /// Check a live transport, logging the reason on failure.
    pub fn check_transport<T: Transport>(
        &self,
        conn: ConnectionId,
        transport: &T,
        require_all: bool,
    ) -> Result<(), ComplianceFailure> {
        let session = transport.tls_session();
        self.check(transport.is_tls(), session.as_ref(), require_all)
            .inspect_err(|failure| {
                tracing::debug!(connection_id = %conn, reason = %failure, "Connection not compliant");
            })
    }

    /// Boolean form of [`check_transport`](Self::check_transport).
    pub fn is_compliant<T: Transport>(&self, conn: ConnectionId, transport: &T, require_all: bool) -> bool {
        self.check_transport(conn, transport, require_all).is_ok()
    }
}

/// TLS 1.2 or newer. Anything not named `TLS*` (SSLv3, ...) is rejected.
pub fn version_is_suitable(version: &str) -> bool {
    version.starts_with("TLS") && version != "TLSv1" && version != "TLSv1.1"
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(version: Option<&str>, cipher: Option<&str>) -> TlsSession {
        TlsSession {
            protocol_version: version.map(str::to_string),
            cipher: cipher.map(str::to_string),
            alpn: None,
        }
    }

    #[test]
    fn plaintext_and_unenforced_always_pass() {
        let strict = SecurityPolicy::rfc7540(true);
        assert!(strict.check(false, None, true).is_ok());

        let lax = SecurityPolicy::rfc7540(false);
        let bad = session(Some("SSLv3"), Some("RC4-MD5"));
        assert!(lax.check(true, Some(&bad), true).is_ok());
    }

    #[test]
    fn old_protocols_fail() {
        let policy = SecurityPolicy::rfc7540(true);
        for version in ["TLSv1", "TLSv1.1", "SSLv3", "SSLv2"] {
            let s = session(Some(version), Some("ECDHE-RSA-AES128-GCM-SHA256"));
            assert_eq!(
                policy.check(true, Some(&s), false),
                Err(ComplianceFailure::ProtocolNotSuitable(version.to_string()))
            );
        }
        for version in ["TLSv1.2", "TLSv1.3"] {
            let s = session(Some(version), Some("TLS13_AES_128_GCM_SHA256"));
            assert!(policy.check(true, Some(&s), true).is_ok());
        }
    }

    #[test]
    fn missing_data_is_lenient_unless_required() {
        let policy = SecurityPolicy::rfc7540(true);

        let empty = session(None, None);
        assert!(policy.check(true, Some(&empty), false).is_ok());
        assert_eq!(
            policy.check(true, Some(&empty), true),
            Err(ComplianceFailure::ProtocolUnknown)
        );

        let no_cipher = session(Some("TLSv1.2"), Some(""));
        assert!(policy.check(true, Some(&no_cipher), false).is_ok());
        assert_eq!(
            policy.check(true, Some(&no_cipher), true),
            Err(ComplianceFailure::CipherUnknown)
        );
    }

    #[test]
    fn missing_session_fails_on_tls() {
        let policy = SecurityPolicy::rfc7540(true);
        assert_eq!(
            policy.check(true, None, false),
            Err(ComplianceFailure::LookupUnavailable)
        );
    }

    #[test]
    fn every_listed_cipher_is_rejected_under_both_names() {
        let policy = SecurityPolicy::rfc7540(true);
        for (openssl, iana) in RFC7540_BLACKLIST {
            for name in [*openssl, *iana] {
                let s = session(Some("TLSv1.2"), Some(name));
                match policy.check(true, Some(&s), false) {
                    Err(ComplianceFailure::CipherBlacklisted { cipher, rule }) => {
                        assert_eq!(cipher, name);
                        assert_eq!(rule, "rfc7540");
                    }
                    other => panic!("{name}: unexpected {other:?}"),
                }
            }
        }
    }

    #[test]
    fn null_suites_are_rejected() {
        let policy = SecurityPolicy::rfc7540(true);
        for name in ["TLS_NULL_WITH_NULL_NULL", "NULL-MD5", "TLS_RSA_WITH_NULL_MD5"] {
            let s = session(Some("TLSv1.2"), Some(name));
            assert!(
                matches!(policy.check(true, Some(&s), false), Err(ComplianceFailure::CipherBlacklisted { .. })),
                "{name} accepted"
            );
        }
    }

    #[test]
    fn unlisted_cipher_passes() {
        let policy = SecurityPolicy::rfc7540(true);
        let s = session(Some("TLSv1.2"), Some("TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256"));
        assert!(policy.check(true, Some(&s), true).is_ok());
        assert_eq!(policy.blacklist_source("ECDHE-RSA-AES256-GCM-SHA384"), None);
    }
}
