//! Protocol detection on freshly accepted connections.
//!
//! # Responsibilities
//! - Skip internal per-stream connections
//! - Trigger the TLS handshake so ALPN can select `h2`
//! - Otherwise peek for the connection preface (direct mode)
//! - Gate encrypted HTTP/2 on the security policy, then hand off
//!
//! # States
//! ```text
//! NotSniffed ──(TLS)──→ SecurityTriggered ──(ALPN h2)──────────→ Detected
//!     │                        │
//!     └──(direct mode)─────────┴──→ peek 24 bytes ──(preface)──→ Detected
//!                                        │
//!                                        └──(mismatch/short/error)──→ Declined
//! ```

use std::future::Future;
use std::sync::Arc;

use crate::h2::compliance::{ComplianceFailure, SecurityPolicy};
use crate::h2::{Protocol, PREFACE};
use crate::net::channel::{BufferedChannel, ChannelError};
use crate::net::connection::ConnContext;
use crate::net::transport::Transport;
use crate::observability::metrics;

/// Outcome of [`ProtocolSniffer::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The protocol engine processed the connection; nothing else may touch it.
    Handled(Protocol),
    /// Stay on HTTP/1.1. Any peeked bytes are still staged.
    Declined,
    /// HTTP/2 was selected but the TLS parameters are not acceptable.
    Rejected(ComplianceFailure),
}

/// The HTTP/2 implementation a detected connection is handed to.
pub trait ProtocolEngine: Send + Sync {
    /// Serve the connection until it ends. `ctx.selected` holds the protocol.
    fn serve<T: Transport>(
        &self,
        ctx: &ConnContext,
        channel: &mut BufferedChannel<T>,
    ) -> impl Future<Output = Result<(), ChannelError>> + Send;
}

/// Decides per connection whether HTTP/2 takes over.
pub struct ProtocolSniffer<E> {
    policy: Arc<SecurityPolicy>,
    direct: bool,
    engine: E,
}

impl<E: ProtocolEngine> ProtocolSniffer<E> {
    /// `direct` enables preface detection on connections that did not
    /// negotiate HTTP/2 through TLS.
    pub fn new(policy: Arc<SecurityPolicy>, direct: bool, engine: E) -> Self {
        Self {
            policy,
            direct,
            engine,
        }
    }

    pub fn policy(&self) -> &SecurityPolicy {
        &self.policy
    }

    /// Detect the protocol and, on HTTP/2, run the engine.
    pub async fn dispatch<T: Transport>(
        &self,
        ctx: &mut ConnContext,
        channel: &mut BufferedChannel<T>,
    ) -> Dispatch {
        if ctx.stream_task {
            tracing::trace!(connection_id = %ctx.id, "Stream connection, not sniffing");
            metrics::record_sniff("declined");
            return Dispatch::Declined;
        }

        if ctx.selected.is_none() {
            match self.sniff(ctx, channel).await {
                Ok(detected) => ctx.selected = detected,
                Err(e) => {
                    tracing::debug!(connection_id = %ctx.id, error = %e, "Protocol sniffing failed");
                }
            }
        }

        let Some(protocol) = ctx.selected else {
            tracing::trace!(connection_id = %ctx.id, "Declined");
            metrics::record_sniff("declined");
            return Dispatch::Declined;
        };

        if let Err(failure) = self.policy.check_transport(ctx.id, channel.transport(), true) {
            metrics::record_sniff("rejected");
            return Dispatch::Rejected(failure);
        }

        tracing::debug!(connection_id = %ctx.id, protocol = %protocol, "Handing connection to protocol engine");
        metrics::record_sniff("handled");

        if let Err(e) = self.engine.serve(ctx, channel).await {
            tracing::debug!(connection_id = %ctx.id, protocol = %protocol, error = %e, "Protocol engine ended with error");
        }
        Dispatch::Handled(protocol)
    }

    async fn sniff<T: Transport>(
        &self,
        ctx: &ConnContext,
        channel: &mut BufferedChannel<T>,
    ) -> Result<Option<Protocol>, ChannelError> {
        let is_tls = channel.transport().is_tls();

        if is_tls {
            channel.transport_mut().handshake().await?;
            let negotiated = channel
                .transport()
                .tls_session()
                .and_then(|session| session.alpn)
                .and_then(|alpn| Protocol::from_alpn(&alpn));
            if let Some(protocol) = negotiated {
                tracing::trace!(connection_id = %ctx.id, protocol = %protocol, "Selected through ALPN");
                return Ok(Some(protocol));
            }
        }

        if !self.direct {
            return Ok(None);
        }

        let seen = channel
            .peek_while(PREFACE.len(), |seen| PREFACE.starts_with(seen))
            .await?;
        if seen.as_slice() == PREFACE.as_slice() {
            let protocol = if is_tls { Protocol::H2 } else { Protocol::H2c };
            tracing::trace!(connection_id = %ctx.id, protocol = %protocol, "Direct mode detected");
            Ok(Some(protocol))
        } else {
            tracing::trace!(
                connection_id = %ctx.id,
                bytes = seen.len(),
                seen = %String::from_utf8_lossy(&seen),
                "Preface not detected"
            );
            Ok(None)
        }
    }
}
