//! Listening sockets shared by the prefork workers.
//!
//! # Responsibilities
//! - Bind every configured address in the parent, before any worker exists
//! - Describe each endpoint (address + protocol) for the wakeup connection
//! - Hand each worker a tokio listener over the inherited socket
//! - Accept connections and wrap them in the right transport

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

use crate::config::ListenerConfig;
use crate::net::tls::{load_tls_acceptor, TlsSetupError, TlsTransport};

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("Invalid bind address {address}: {source}")]
    Address {
        address: String,
        source: std::net::AddrParseError,
    },

    #[error("Failed to bind: {0}")]
    Bind(std::io::Error),

    #[error("Failed to accept: {0}")]
    Accept(std::io::Error),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] TlsSetupError),
}

/// A listening address together with the protocol served on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenEndpoint {
    pub addr: SocketAddr,
    pub protocol: String,
}

/// A socket bound in the parent process, inherited by workers across fork.
pub struct BoundListener {
    socket: std::net::TcpListener,
    endpoint: ListenEndpoint,
    tls: Option<TlsAcceptor>,
}

impl BoundListener {
    /// Bind the configured address and load its TLS material.
    pub fn bind(config: &ListenerConfig) -> Result<Self, ListenerError> {
        let addr: SocketAddr = config
            .bind_address
            .parse()
            .map_err(|source| ListenerError::Address {
                address: config.bind_address.clone(),
                source,
            })?;

        let socket = std::net::TcpListener::bind(addr).map_err(ListenerError::Bind)?;
        socket.set_nonblocking(true).map_err(ListenerError::Bind)?;
        let local_addr = socket.local_addr().map_err(ListenerError::Bind)?;

        let tls = match &config.tls {
            Some(tls) => Some(load_tls_acceptor(
                tls.cert_path.as_ref(),
                tls.key_path.as_ref(),
            )?),
            None => None,
        };

        tracing::info!(
            address = %local_addr,
            protocol = %config.protocol,
            tls = tls.is_some(),
            "Listener bound"
        );

        Ok(Self {
            socket,
            endpoint: ListenEndpoint {
                addr: local_addr,
                protocol: config.protocol.clone(),
            },
            tls,
        })
    }

    pub fn endpoint(&self) -> &ListenEndpoint {
        &self.endpoint
    }

    /// Register the socket with the current tokio runtime.
    pub fn into_listener(self) -> Result<Listener, ListenerError> {
        let inner = TcpListener::from_std(self.socket).map_err(ListenerError::Bind)?;
        Ok(Listener {
            inner,
            endpoint: self.endpoint,
            tls: self.tls,
        })
    }
}

/// An accepted connection before any bytes were exchanged.
pub enum Accepted {
    Plain(tokio::net::TcpStream),
    Tls(TlsTransport),
}

/// A worker's view of one listening socket.
pub struct Listener {
    inner: TcpListener,
    endpoint: ListenEndpoint,
    tls: Option<TlsAcceptor>,
}

impl Listener {
    /// Accept the next connection. The TLS handshake is left to the transport.
    pub async fn accept(&self) -> Result<(Accepted, SocketAddr), ListenerError> {
        let (stream, addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;
        // Small frames are coalesced by the channel, not by the kernel.
        let _ = stream.set_nodelay(true);

        tracing::debug!(peer_addr = %addr, local_addr = %self.endpoint.addr, "Connection accepted");

        let accepted = match &self.tls {
            Some(acceptor) => Accepted::Tls(TlsTransport::accept(acceptor, stream)),
            None => Accepted::Plain(stream),
        };
        Ok((accepted, addr))
    }

    pub fn endpoint(&self) -> &ListenEndpoint {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_reports_actual_port() {
        let config = ListenerConfig {
            bind_address: "127.0.0.1:0".to_string(),
            ..ListenerConfig::default()
        };
        let bound = BoundListener::bind(&config).unwrap();
        assert_ne!(bound.endpoint().addr.port(), 0);
        assert_eq!(bound.endpoint().protocol, "http");
    }

    #[test]
    fn bad_address_is_rejected() {
        let config = ListenerConfig {
            bind_address: "not-an-address".to_string(),
            ..ListenerConfig::default()
        };
        assert!(matches!(
            BoundListener::bind(&config),
            Err(ListenerError::Address { .. })
        ));
    }

    #[tokio::test]
    async fn accepts_plain_connections() {
        let config = ListenerConfig {
            bind_address: "127.0.0.1:0".to_string(),
            ..ListenerConfig::default()
        };
        let listener = BoundListener::bind(&config).unwrap().into_listener().unwrap();
        let addr = listener.endpoint().addr;

        let client = tokio::spawn(async move { tokio::net::TcpStream::connect(addr).await });
        let (accepted, _) = listener.accept().await.unwrap();
        assert!(matches!(accepted, Accepted::Plain(_)));
        client.await.unwrap().unwrap();
    }
}
