//! TLS configuration, certificate loading and the TLS transport.

use std::fs::File;
use std::future::{poll_fn, Future};
use std::io::{self, BufReader};
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{ready, Context, Poll};

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;
use tokio_rustls::rustls::{self, ProtocolVersion};
use tokio_rustls::{server, Accept, TlsAcceptor};

use crate::h2::{Protocol, HTTP1_TOKEN};
use crate::net::transport::{TlsSession, Transport};

/// Error type for TLS setup.
#[derive(Debug, Error)]
pub enum TlsSetupError {
    #[error("Certificate file not found: {0:?}")]
    MissingCertificate(std::path::PathBuf),

    #[error("Private key file not found: {0:?}")]
    MissingKey(std::path::PathBuf),

    #[error("No private key in {0:?}")]
    NoKey(std::path::PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TLS error: {0}")]
    Rustls(#[from] rustls::Error),
}

/// Load a TLS acceptor from certificate and key files.
///
/// ALPN offers `h2` first, then `http/1.1`.
pub fn load_tls_acceptor(cert_path: &Path, key_path: &Path) -> Result<TlsAcceptor, TlsSetupError> {
    // Basic validation
    if !cert_path.exists() {
        return Err(TlsSetupError::MissingCertificate(cert_path.to_path_buf()));
    }
    if !key_path.exists() {
        return Err(TlsSetupError::MissingKey(key_path.to_path_buf()));
    }

    let certs = rustls_pemfile::certs(&mut BufReader::new(File::open(cert_path)?))
        .collect::<Result<Vec<_>, _>>()?;
    let key = rustls_pemfile::private_key(&mut BufReader::new(File::open(key_path)?))?
        .ok_or_else(|| TlsSetupError::NoKey(key_path.to_path_buf()))?;

    let mut config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)?;
    config.alpn_protocols = vec![
        Protocol::H2.token().as_bytes().to_vec(),
        HTTP1_TOKEN.as_bytes().to_vec(),
    ];

    Ok(TlsAcceptor::from(Arc::new(config)))
}

enum TlsState {
    Handshaking(Accept<TcpStream>),
    Streaming(Box<server::TlsStream<TcpStream>>),
    Failed,
}

/// Server-side TLS over TCP with a lazily completed handshake.
pub struct TlsTransport {
    state: TlsState,
}

impl TlsTransport {
    /// Start accepting a TLS session on `stream`. No bytes are exchanged
    /// until the transport is first polled.
    pub fn accept(acceptor: &TlsAcceptor, stream: TcpStream) -> Self {
        Self {
            state: TlsState::Handshaking(acceptor.accept(stream)),
        }
    }

    fn poll_handshake(&mut self, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut self.state {
            TlsState::Handshaking(accept) => match ready!(Pin::new(accept).poll(cx)) {
                Ok(stream) => {
                    self.state = TlsState::Streaming(Box::new(stream));
                    Poll::Ready(Ok(()))
                }
                Err(e) => {
                    self.state = TlsState::Failed;
                    Poll::Ready(Err(e))
                }
            },
            TlsState::Streaming(_) => Poll::Ready(Ok(())),
            TlsState::Failed => Poll::Ready(Err(io::ErrorKind::NotConnected.into())),
        }
    }

    fn stream(&mut self) -> Option<Pin<&mut server::TlsStream<TcpStream>>> {
        match &mut self.state {
            TlsState::Streaming(stream) => Some(Pin::new(stream.as_mut())),
            _ => None,
        }
    }
}

/// OpenSSL-style name of a TLS protocol version.
fn version_name(version: ProtocolVersion) -> String {
    match version {
        ProtocolVersion::SSLv2 => "SSLv2".to_string(),
        ProtocolVersion::SSLv3 => "SSLv3".to_string(),
        ProtocolVersion::TLSv1_0 => "TLSv1".to_string(),
        ProtocolVersion::TLSv1_1 => "TLSv1.1".to_string(),
        ProtocolVersion::TLSv1_2 => "TLSv1.2".to_string(),
        ProtocolVersion::TLSv1_3 => "TLSv1.3".to_string(),
        other => format!("{other:?}"),
    }
}

impl AsyncRead for TlsTransport {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        ready!(this.poll_handshake(cx))?;
        match this.stream() {
            Some(stream) => stream.poll_read(cx, buf),
            None => Poll::Ready(Err(io::ErrorKind::NotConnected.into())),
        }
    }
}

impl AsyncWrite for TlsTransport {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        ready!(this.poll_handshake(cx))?;
        match this.stream() {
            Some(stream) => stream.poll_write(cx, buf),
            None => Poll::Ready(Err(io::ErrorKind::NotConnected.into())),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut().stream() {
            Some(stream) => stream.poll_flush(cx),
            None => Poll::Ready(Ok(())),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut().stream() {
            Some(stream) => stream.poll_shutdown(cx),
            None => Poll::Ready(Ok(())),
        }
    }
}

impl Transport for TlsTransport {
    fn is_tls(&self) -> bool {
        true
    }

    fn tls_session(&self) -> Option<TlsSession> {
        let TlsState::Streaming(stream) = &self.state else {
            return None;
        };
        let (_, conn) = stream.get_ref();
        Some(TlsSession {
            protocol_version: conn.protocol_version().map(version_name),
            cipher: conn
                .negotiated_cipher_suite()
                .map(|suite| format!("{:?}", suite.suite())),
            alpn: conn.alpn_protocol().map(<[u8]>::to_vec),
        })
    }

    fn handshake(&mut self) -> impl Future<Output = io::Result<()>> + Send {
        poll_fn(move |cx| self.poll_handshake(cx))
    }
}
