//! Bundled protocol handlers.
//!
//! The HTTP/2 engine and the HTTP/1 request pipeline live outside this crate.
//! These stand-ins let the binary answer every connection: HTTP/2 clients get
//! a connection-level GOAWAY, HTTP/1 clients get a minimal response and
//! `Connection: close`.

use std::fmt::Write as _;

use crate::h2::ProtocolEngine;
use crate::net::channel::{BufferedChannel, ChannelError, ReadMode, ReadProgress};
use crate::net::connection::ConnContext;
use crate::net::transport::Transport;

/// HTTP/2 error code telling the client to retry over HTTP/1.1.
pub const HTTP_1_1_REQUIRED: u32 = 0xd;

/// HTTP/2 error code for TLS parameters below the RFC 7540 baseline.
pub const INADEQUATE_SECURITY: u32 = 0xc;

/// Largest request head the HTTP/1 responder accepts.
pub const MAX_REQUEST_HEAD: usize = 8192;

const FRAME_SETTINGS: u8 = 0x4;
const FRAME_GOAWAY: u8 = 0x7;

fn frame_header(out: &mut Vec<u8>, length: u32, kind: u8) {
    out.extend_from_slice(&length.to_be_bytes()[1..]);
    out.push(kind);
    out.push(0); // flags
    out.extend_from_slice(&0u32.to_be_bytes()); // stream 0
}

/// An empty SETTINGS frame followed by GOAWAY carrying `error_code`.
pub fn goaway_frames(error_code: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(9 + 9 + 8);
    frame_header(&mut out, 0, FRAME_SETTINGS);
    frame_header(&mut out, 8, FRAME_GOAWAY);
    out.extend_from_slice(&0u32.to_be_bytes()); // last stream id
    out.extend_from_slice(&error_code.to_be_bytes());
    out
}

/// Close an HTTP/2 connection with GOAWAY.
pub async fn refuse_h2<T: Transport>(
    channel: &mut BufferedChannel<T>,
    error_code: u32,
) -> Result<(), ChannelError> {
    channel.write(&goaway_frames(error_code)).await?;
    channel.flush().await
}

/// Engine that accepts the handoff and tells the client to use HTTP/1.1.
#[derive(Debug, Default, Clone, Copy)]
pub struct RefusingEngine;

impl ProtocolEngine for RefusingEngine {
    async fn serve<T: Transport>(
        &self,
        ctx: &ConnContext,
        channel: &mut BufferedChannel<T>,
    ) -> Result<(), ChannelError> {
        tracing::debug!(connection_id = %ctx.id, protocol = ?ctx.selected, "Refusing HTTP/2 connection");
        refuse_h2(channel, HTTP_1_1_REQUIRED).await
    }
}

fn find_head_end(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|w| w == b"\r\n\r\n").map(|pos| pos + 4)
}

/// Read one request head and answer it. The connection is not kept alive.
pub async fn serve_http1<T: Transport>(
    channel: &mut BufferedChannel<T>,
    server: &str,
) -> Result<(), ChannelError> {
    let mut head = Vec::new();
    let mut complete = false;

    while !complete {
        channel
            .read(ReadMode::Blocking, |data| {
                // The terminator may straddle two spans.
                let search_from = head.len().saturating_sub(3);
                head.extend_from_slice(data);
                match find_head_end(&head[search_from..]) {
                    Some(end) => {
                        let end = search_from + end;
                        let unused = head.len() - end;
                        head.truncate(end);
                        complete = true;
                        ReadProgress::done(data.len() - unused)
                    }
                    None => ReadProgress::more(data.len()),
                }
            })
            .await?;

        if !complete && head.len() > MAX_REQUEST_HEAD {
            tracing::debug!(connection_id = %channel.id(), bytes = head.len(), "Request head too large");
            channel.write(&response(431, "Request Header Fields Too Large", server, &[], "")).await?;
            return channel.flush().await;
        }
    }

    channel.write(&respond_to(&head, server)).await?;
    channel.flush().await
}

/// Response bytes for a complete request head.
pub fn respond_to(head: &[u8], server: &str) -> Vec<u8> {
    let text = String::from_utf8_lossy(head);
    let mut parts = text.lines().next().unwrap_or_default().split_whitespace();
    let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next()) else {
        return response(400, "Bad Request", server, &[], "");
    };
    if !version.starts_with("HTTP/1.") {
        return response(505, "HTTP Version Not Supported", server, &[], "");
    }

    match (method, target) {
        ("OPTIONS", "*") => response(200, "OK", server, &[("Allow", "GET, HEAD, OPTIONS")], ""),
        ("GET", _) => response(200, "OK", server, &[], &format!("{method} {target} served over HTTP/1.1\n")),
        ("HEAD", _) => {
            let mut out = response(200, "OK", server, &[], &format!("{method} {target} served over HTTP/1.1\n"));
            if let Some(end) = find_head_end(&out) {
                out.truncate(end);
            }
            out
        }
        _ => response(405, "Method Not Allowed", server, &[("Allow", "GET, HEAD, OPTIONS")], ""),
    }
}

fn response(status: u16, reason: &str, server: &str, headers: &[(&str, &str)], body: &str) -> Vec<u8> {
    let mut out = String::new();
    let _ = write!(out, "HTTP/1.1 {status} {reason}\r\nServer: {server}\r\n");
    for (name, value) in headers {
        let _ = write!(out, "{name}: {value}\r\n");
    }
    let _ = write!(out, "Content-Length: {}\r\nConnection: close\r\n\r\n{body}", body.len());
    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::IoConfig;
    use crate::h2::{Protocol, PREFACE};
    use crate::net::connection::{ConnectionId, NoActivity};
    use crate::net::memory::{MemoryHandle, MemoryTransport};

    fn channel() -> (BufferedChannel<MemoryTransport>, MemoryHandle) {
        let (transport, handle) = MemoryTransport::new();
        let channel = BufferedChannel::new(
            ConnectionId::new(),
            transport,
            &IoConfig::default(),
            Arc::new(NoActivity),
        );
        (channel, handle)
    }

    #[test]
    fn goaway_carries_error_code() {
        let frames = goaway_frames(HTTP_1_1_REQUIRED);
        assert_eq!(&frames[..9], &[0, 0, 0, 0x4, 0, 0, 0, 0, 0]);
        assert_eq!(&frames[9..18], &[0, 0, 8, 0x7, 0, 0, 0, 0, 0]);
        assert_eq!(&frames[18..], &[0, 0, 0, 0, 0, 0, 0, 0xd]);
    }

    #[tokio::test]
    async fn refusing_engine_sends_goaway() {
        let (mut channel, handle) = channel();
        handle.push_input(PREFACE);
        let mut ctx = ConnContext::new(channel.id());
        ctx.selected = Some(Protocol::H2c);

        RefusingEngine.serve(&ctx, &mut channel).await.unwrap();
        assert_eq!(handle.written(), goaway_frames(HTTP_1_1_REQUIRED));
        assert!(!channel.is_dirty());
    }

    #[tokio::test]
    async fn answers_get_and_leaves_body_staged() {
        let (mut channel, handle) = channel();
        handle.push_input(b"GET /index HTTP/1.1\r\nHost: a\r\n");
        handle.push_input(b"\r\nleftover");

        serve_http1(&mut channel, "h2mpm").await.unwrap();

        let written = String::from_utf8(handle.written()).unwrap();
        assert!(written.starts_with("HTTP/1.1 200 OK\r\nServer: h2mpm\r\n"));
        assert!(written.contains("Connection: close\r\n"));
        assert!(written.ends_with("GET /index served over HTTP/1.1\n"));
        assert_eq!(channel.staged_len(), "leftover".len());
    }

    #[tokio::test]
    async fn answers_dummy_connection() {
        let (mut channel, handle) = channel();
        handle.push_input(b"OPTIONS * HTTP/1.0\r\nUser-Agent: h2mpm (internal dummy connection)\r\n\r\n");

        serve_http1(&mut channel, "h2mpm").await.unwrap();
        let written = String::from_utf8(handle.written()).unwrap();
        assert!(written.starts_with("HTTP/1.1 200 OK"));
        assert!(written.contains("Allow: GET, HEAD, OPTIONS\r\n"));
        assert!(written.ends_with("Content-Length: 0\r\nConnection: close\r\n\r\n"));
    }

    #[tokio::test]
    async fn oversized_head_is_refused() {
        let (mut channel, handle) = channel();
        handle.push_input(b"GET / HTTP/1.1\r\n");
        handle.push_input(&vec![b'x'; MAX_REQUEST_HEAD + 1]);

        serve_http1(&mut channel, "h2mpm").await.unwrap();
        assert!(handle.written().starts_with(b"HTTP/1.1 431 "));
    }

    #[tokio::test]
    async fn peer_closing_mid_head_is_eof() {
        let (mut channel, handle) = channel();
        handle.push_input(b"GET / HTTP/1.1\r\n");
        handle.close();

        assert!(matches!(
            serve_http1(&mut channel, "h2mpm").await,
            Err(ChannelError::Eof)
        ));
    }

    #[test]
    fn response_statuses() {
        assert!(respond_to(b"garbage\r\n\r\n", "s").starts_with(b"HTTP/1.1 400 "));
        assert!(respond_to(b"GET / HTTP/2.0\r\n\r\n", "s").starts_with(b"HTTP/1.1 505 "));
        assert!(respond_to(b"POST / HTTP/1.1\r\n\r\n", "s").starts_with(b"HTTP/1.1 405 "));

        let head = respond_to(b"HEAD / HTTP/1.1\r\n\r\n", "s");
        assert!(head.ends_with(b"\r\n\r\n"));
        assert!(String::from_utf8(head).unwrap().contains("Content-Length: 28\r\n"));
    }
}
