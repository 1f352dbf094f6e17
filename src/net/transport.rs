//! Byte transports underneath a connection.
//!
//! A transport is any tokio byte stream that can also describe its security
//! posture. Plain TCP reports no TLS session; the TLS transport completes its
//! handshake lazily so that negotiation results (ALPN) only become visible
//! after `handshake()` or the first read.

use std::future::Future;
use std::io;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

/// Security parameters negotiated on an encrypted transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsSession {
    /// Protocol version in OpenSSL notation (`TLSv1.2`, `TLSv1.3`, ...).
    pub protocol_version: Option<String>,
    /// Negotiated cipher suite name.
    pub cipher: Option<String>,
    /// Protocol chosen through ALPN.
    pub alpn: Option<Vec<u8>>,
}

/// A connection's byte stream.
pub trait Transport: AsyncRead + AsyncWrite + Unpin + Send {
    /// Whether the bytes travel encrypted.
    fn is_tls(&self) -> bool {
        false
    }

    /// Negotiated security parameters. `None` on plaintext transports and on
    /// encrypted ones whose parameters cannot be determined.
    fn tls_session(&self) -> Option<TlsSession> {
        None
    }

    /// Drive any pending handshake to completion without consuming
    /// application data.
    fn handshake(&mut self) -> impl Future<Output = io::Result<()>> + Send {
        async { Ok(()) }
    }
}

impl Transport for TcpStream {}

impl Transport for tokio::io::DuplexStream {}
