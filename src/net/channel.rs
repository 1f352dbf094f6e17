//! Buffered connection I/O.
//!
//! # Responsibilities
//! - Stage inbound bytes and feed them to a consumer that may accept only a prefix
//! - Serve blocking (awaited) and non-blocking (single poll) reads
//! - Coalesce outbound bytes on encrypted transports and emit them in
//!   adaptively sized chunks
//! - Report busy states to an [`ActivityBoard`]
//!
//! # Write sizing
//! ```text
//! write_size = 1300 ──(≥ 1 MiB written since reset)──→ 16384
//!      ↑                                                 │
//!      └────────────(≥ 1s since last write)──────────────┘
//! ```
//! Sizing only decides how staged bytes are grouped into transport writes; it
//! never changes which bytes are sent.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::time::Instant;

use crate::config::{BufferOutput, IoConfig};
use crate::net::connection::{ActivityBoard, BusyState, ConnectionId};
use crate::net::transport::Transport;

/// Chunk size used after creation and after an idle period.
pub const INITIAL_WRITE_SIZE: usize = 1300;

/// Chunk size used on connections with sustained throughput.
pub const MAX_WRITE_SIZE: usize = 16384;

/// Idle time after which the chunk size drops back to the initial size.
pub const WRITE_SIZE_IDLE: Duration = Duration::from_secs(1);

/// Bytes written since the last reset after which the chunk size grows.
pub const WRITE_SIZE_GROWTH_BYTES: u64 = 1024 * 1024;

/// Maximum bytes requested from the transport per read.
pub const READ_SIZE: usize = 16 * 4096;

/// Hex characters of read data shown at trace level.
const TRACE_PREVIEW_CHARS: usize = 32;

/// Error type for channel operations.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Read would block")]
    WouldBlock,

    #[error("Connection closed by peer")]
    Eof,

    #[error("Transport error: {0}")]
    Transport(#[from] io::Error),
}

/// How a read may wait for the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Wait for data. Only valid when the connection has no pending work.
    Blocking,
    /// Poll the transport once and fail with `WouldBlock` if nothing is ready.
    NonBlocking,
}

/// Answer of a read consumer for one span of bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadProgress {
    /// Bytes accepted from the front of the span.
    pub consumed: usize,
    /// The consumer wants no more data for now.
    pub done: bool,
}

impl ReadProgress {
    /// Accept `consumed` bytes and keep reading.
    pub fn more(consumed: usize) -> Self {
        Self {
            consumed,
            done: false,
        }
    }

    /// Accept `consumed` bytes and stop.
    pub fn done(consumed: usize) -> Self {
        Self {
            consumed,
            done: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    EndOfStream,
}

#[derive(Debug)]
enum Span {
    Data { bytes: Vec<u8>, offset: usize },
    Meta(Marker),
}

impl Span {
    fn remaining(&self) -> &[u8] {
        match self {
            Span::Data { bytes, offset } => &bytes[*offset..],
            Span::Meta(_) => &[],
        }
    }
}

enum Drain {
    Done,
    Stalled,
    Exhausted,
}

/// One connection's staged input and output.
pub struct BufferedChannel<T> {
    id: ConnectionId,
    transport: T,
    input: VecDeque<Span>,
    eof: bool,
    buffer: Vec<u8>,
    bufsize: usize,
    write_size: usize,
    bytes_written: u64,
    last_write: Option<Instant>,
    unflushed: bool,
    board: Arc<dyn ActivityBoard>,
}

impl<T: Transport> BufferedChannel<T> {
    /// Wrap `transport`. Output buffering is decided here, once.
    pub fn new(
        id: ConnectionId,
        transport: T,
        io: &IoConfig,
        board: Arc<dyn ActivityBoard>,
    ) -> Self {
        let buffered = match io.buffer_output {
            BufferOutput::Auto => transport.is_tls(),
            BufferOutput::Always => true,
            BufferOutput::Never => false,
        };
        let bufsize = if buffered { io.write_buffer_size } else { 0 };

        tracing::trace!(connection_id = %id, bufsize, "Channel created");

        Self {
            id,
            transport,
            input: VecDeque::new(),
            eof: false,
            buffer: Vec::with_capacity(bufsize),
            bufsize,
            write_size: INITIAL_WRITE_SIZE,
            bytes_written: 0,
            last_write: None,
            unflushed: false,
            board,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Whether output is coalesced before reaching the transport.
    pub fn is_buffered(&self) -> bool {
        self.bufsize > 0
    }

    /// Current output chunk size.
    pub fn write_size(&self) -> usize {
        self.write_size
    }

    /// Whether written bytes await a flush.
    pub fn is_dirty(&self) -> bool {
        self.unflushed
    }

    /// Bytes staged for output.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Input bytes staged but not yet consumed.
    pub fn staged_len(&self) -> usize {
        self.input.iter().map(|span| span.remaining().len()).sum()
    }

    /// Feed input to `on_data`.
    ///
    /// Staged input is offered first. Unless the consumer is done or stalled
    /// by then, the channel asks the transport once for more. Returns the
    /// total bytes consumed. Bytes the consumer did not accept stay staged for
    /// the next call.
    ///
    /// When staged bytes were consumed, a transport read that would block or
    /// hits end of stream still returns the total. The end of stream is
    /// reported by the next call.
    pub async fn read<F>(&mut self, mode: ReadMode, mut on_data: F) -> Result<usize, ChannelError>
    where
        F: FnMut(&[u8]) -> ReadProgress,
    {
        let mut total = 0;
        match self.drain(&mut on_data, &mut total) {
            Drain::Done | Drain::Stalled => return Ok(total),
            Drain::Exhausted => {}
        }

        if self.eof {
            return if total > 0 { Ok(total) } else { Err(ChannelError::Eof) };
        }

        match self.fill(mode).await {
            Ok(_) => {
                self.drain(&mut on_data, &mut total);
                Ok(total)
            }
            Err(ChannelError::WouldBlock | ChannelError::Eof) if total > 0 => Ok(total),
            Err(e) => Err(e),
        }
    }

    /// Stage input until `n` bytes are available or the peer closes.
    /// Returns a copy of at most `n` staged bytes; nothing is consumed.
    pub async fn peek(&mut self, n: usize) -> Result<Vec<u8>, ChannelError> {
        self.peek_while(n, |_| true).await
    }

    /// Like [`peek`](Self::peek), but also stops staging as soon as
    /// `wanted` rejects the bytes seen so far.
    pub async fn peek_while<P>(&mut self, n: usize, mut wanted: P) -> Result<Vec<u8>, ChannelError>
    where
        P: FnMut(&[u8]) -> bool,
    {
        loop {
            let seen = self.staged_prefix(n);
            if seen.len() >= n || self.eof || !wanted(&seen) {
                return Ok(seen);
            }
            match self.fill(ReadMode::Blocking).await {
                Ok(_) | Err(ChannelError::Eof) => {}
                Err(e) => return Err(e),
            }
        }
    }

    /// Queue `data` for output.
    pub async fn write(&mut self, data: &[u8]) -> Result<(), ChannelError> {
        self.unflushed = true;

        if self.bufsize == 0 {
            self.board.set_busy(self.id, BusyState::Write);
            return self.emit(data).await;
        }

        let mut rest = data;
        while !rest.is_empty() {
            let room = self.bufsize - self.buffer.len();
            if room == 0 {
                self.flush_chunks().await?;
                continue;
            }
            let n = room.min(rest.len());
            self.buffer.extend_from_slice(&rest[..n]);
            rest = &rest[n..];
        }
        Ok(())
    }

    /// Push everything written so far to the peer. A no-op when clean.
    /// On failure the channel stays dirty.
    pub async fn flush(&mut self) -> Result<(), ChannelError> {
        if !self.unflushed {
            return Ok(());
        }

        self.flush_chunks().await?;
        self.board.set_busy(self.id, BusyState::Write);
        if let Err(e) = self.transport.flush().await {
            tracing::debug!(connection_id = %self.id, error = %e, "Flush failed");
            return Err(e.into());
        }
        self.unflushed = false;
        Ok(())
    }

    fn drain<F>(&mut self, on_data: &mut F, total: &mut usize) -> Drain
    where
        F: FnMut(&[u8]) -> ReadProgress,
    {
        while let Some(span) = self.input.front_mut() {
            let Span::Data { bytes, offset } = span else {
                self.input.pop_front();
                continue;
            };

            let available = bytes.len() - *offset;
            let progress = on_data(&bytes[*offset..]);
            let consumed = progress.consumed.min(available);
            *offset += consumed;
            *total += consumed;

            if consumed == available {
                self.input.pop_front();
            }
            if progress.done {
                return Drain::Done;
            }
            if consumed < available {
                return Drain::Stalled;
            }
        }
        Drain::Exhausted
    }

    async fn fill(&mut self, mode: ReadMode) -> Result<usize, ChannelError> {
        let state = match mode {
            ReadMode::Blocking => BusyState::KeepAlive,
            ReadMode::NonBlocking => BusyState::Read,
        };
        self.board.set_busy(self.id, state);

        let mut buf = vec![0u8; READ_SIZE];
        let result = match mode {
            ReadMode::Blocking => self.transport.read(&mut buf).await,
            ReadMode::NonBlocking => match self.transport.read(&mut buf).now_or_never() {
                Some(result) => result,
                None => return Err(ChannelError::WouldBlock),
            },
        };

        let n = match result {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                return Err(ChannelError::WouldBlock)
            }
            Err(e) => {
                tracing::debug!(connection_id = %self.id, error = %e, "Read failed");
                return Err(e.into());
            }
        };

        if n == 0 {
            self.eof = true;
            self.input.push_back(Span::Meta(Marker::EndOfStream));
            tracing::trace!(connection_id = %self.id, "Read end of stream");
            return Err(ChannelError::Eof);
        }

        buf.truncate(n);
        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!(
                connection_id = %self.id,
                bytes = n,
                preview = %hex_preview(&buf),
                "Read from transport"
            );
        }
        self.input.push_back(Span::Data {
            bytes: buf,
            offset: 0,
        });
        Ok(n)
    }

    fn staged_prefix(&self, n: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(n);
        for span in &self.input {
            let data = span.remaining();
            let take = data.len().min(n - out.len());
            out.extend_from_slice(&data[..take]);
            if out.len() == n {
                break;
            }
        }
        out
    }

    fn retune(&mut self, now: Instant) {
        let idle = self
            .last_write
            .map_or(true, |at| now.duration_since(at) >= WRITE_SIZE_IDLE);

        if self.write_size > INITIAL_WRITE_SIZE && idle {
            tracing::debug!(
                connection_id = %self.id,
                from = self.write_size,
                to = INITIAL_WRITE_SIZE,
                "Write size reset after idle"
            );
            self.write_size = INITIAL_WRITE_SIZE;
            self.bytes_written = 0;
        } else if self.write_size < MAX_WRITE_SIZE && self.bytes_written >= WRITE_SIZE_GROWTH_BYTES {
            tracing::debug!(
                connection_id = %self.id,
                from = self.write_size,
                to = MAX_WRITE_SIZE,
                written = self.bytes_written,
                "Write size grown"
            );
            self.write_size = MAX_WRITE_SIZE;
        }
    }

    async fn flush_chunks(&mut self) -> Result<(), ChannelError> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let now = Instant::now();
        self.retune(now);
        self.board.set_busy(self.id, BusyState::Write);

        let mut sent = 0;
        let result = self.write_chunks(&mut sent).await;

        // Whatever reached the transport is gone from the buffer, so a retry
        // resumes where this attempt stopped.
        self.buffer.drain(..sent);
        self.bytes_written += sent as u64;
        if sent > 0 {
            self.last_write = Some(now);
        }

        if let Err(e) = result {
            tracing::debug!(
                connection_id = %self.id,
                sent,
                remaining = self.buffer.len(),
                error = %e,
                "Write failed"
            );
            return Err(e.into());
        }
        Ok(())
    }

    /// Emit the buffer in `write_size` chunks, counting accepted bytes in `sent`.
    async fn write_chunks(&mut self, sent: &mut usize) -> io::Result<()> {
        while *sent < self.buffer.len() {
            let chunk_end = (*sent + self.write_size).min(self.buffer.len());
            while *sent < chunk_end {
                let n = self.transport.write(&self.buffer[*sent..chunk_end]).await?;
                if n == 0 {
                    return Err(io::ErrorKind::WriteZero.into());
                }
                *sent += n;
            }
        }
        Ok(())
    }

    async fn emit(&mut self, data: &[u8]) -> Result<(), ChannelError> {
        if let Err(e) = self.transport.write_all(data).await {
            tracing::debug!(connection_id = %self.id, error = %e, "Write failed");
            return Err(e.into());
        }
        self.bytes_written += data.len() as u64;
        self.last_write = Some(Instant::now());
        Ok(())
    }
}

fn hex_preview(data: &[u8]) -> String {
    let mut out = String::with_capacity(TRACE_PREVIEW_CHARS);
    for byte in data.iter().take(TRACE_PREVIEW_CHARS / 2) {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::connection::{ConnectionTracker, NoActivity};
    use crate::net::memory::{MemoryHandle, MemoryTransport};

    fn tls_channel() -> (BufferedChannel<MemoryTransport>, MemoryHandle) {
        let (transport, handle) = MemoryTransport::new();
        let channel = BufferedChannel::new(
            ConnectionId::new(),
            transport.with_tls(None),
            &IoConfig::default(),
            Arc::new(NoActivity),
        );
        (channel, handle)
    }

    fn plain_channel() -> (BufferedChannel<MemoryTransport>, MemoryHandle) {
        let (transport, handle) = MemoryTransport::new();
        let channel = BufferedChannel::new(
            ConnectionId::new(),
            transport,
            &IoConfig::default(),
            Arc::new(NoActivity),
        );
        (channel, handle)
    }

    fn chunk_sizes(handle: &MemoryHandle) -> Vec<usize> {
        handle.chunks().iter().map(Vec::len).collect()
    }

    #[test]
    fn buffering_follows_transport_under_auto() {
        assert!(tls_channel().0.is_buffered());
        assert!(!plain_channel().0.is_buffered());

        let (transport, _handle) = MemoryTransport::new();
        let io = IoConfig {
            buffer_output: BufferOutput::Always,
            ..IoConfig::default()
        };
        let channel = BufferedChannel::new(ConnectionId::new(), transport, &io, Arc::new(NoActivity));
        assert!(channel.is_buffered());
    }

    #[tokio::test]
    async fn flush_splits_into_write_size_chunks() {
        let (mut channel, handle) = tls_channel();
        let data: Vec<u8> = (0..2000u32).map(|i| i as u8).collect();

        channel.write(&data).await.unwrap();
        assert!(handle.chunks().is_empty());
        assert_eq!(channel.buffered_len(), 2000);

        channel.flush().await.unwrap();
        assert_eq!(chunk_sizes(&handle), vec![1300, 700]);
        assert_eq!(handle.written(), data);
        assert_eq!(handle.flushes(), 1);
        assert!(!channel.is_dirty());
    }

    #[tokio::test]
    async fn flush_when_clean_does_nothing() {
        let (mut channel, handle) = tls_channel();
        channel.flush().await.unwrap();
        assert_eq!(handle.flushes(), 0);
    }

    #[tokio::test]
    async fn full_buffer_is_flushed_while_writing() {
        let (mut channel, handle) = tls_channel();
        let data = vec![7u8; 70_000];

        channel.write(&data).await.unwrap();
        // The first 64 KiB went out when the buffer filled up.
        assert_eq!(handle.written().len(), 65536);
        assert_eq!(channel.buffered_len(), 70_000 - 65536);

        channel.flush().await.unwrap();
        assert_eq!(handle.written(), data);
    }

    #[tokio::test]
    async fn buffering_is_lossless_across_many_writes() {
        let (mut channel, handle) = tls_channel();
        let mut expected = Vec::new();

        for round in 0..50u32 {
            let piece: Vec<u8> = (0..(round * 97 + 9)).map(|i| (i ^ round) as u8).collect();
            channel.write(&piece).await.unwrap();
            expected.extend_from_slice(&piece);
            if round % 7 == 0 {
                channel.flush().await.unwrap();
            }
        }
        channel.flush().await.unwrap();

        assert_eq!(handle.written(), expected);
        assert!(handle.chunks().iter().all(|c| c.len() <= MAX_WRITE_SIZE));
    }

    #[tokio::test(start_paused = true)]
    async fn write_size_grows_after_a_mebibyte_and_resets_when_idle() {
        let (mut channel, handle) = tls_channel();

        channel.write(&vec![1u8; 1024 * 1024]).await.unwrap();
        channel.flush().await.unwrap();
        assert_eq!(channel.write_size(), INITIAL_WRITE_SIZE);

        let before = handle.chunks().len();
        channel.write(&vec![2u8; 20_000]).await.unwrap();
        channel.flush().await.unwrap();
        assert_eq!(channel.write_size(), MAX_WRITE_SIZE);
        assert_eq!(chunk_sizes(&handle)[before..], [16384, 3616]);

        // Not idle long enough: stays large.
        tokio::time::advance(Duration::from_millis(900)).await;
        channel.write(&[3u8; 100]).await.unwrap();
        channel.flush().await.unwrap();
        assert_eq!(channel.write_size(), MAX_WRITE_SIZE);

        tokio::time::advance(Duration::from_secs(1)).await;
        let before = handle.chunks().len();
        channel.write(&[4u8; 2000]).await.unwrap();
        channel.flush().await.unwrap();
        assert_eq!(channel.write_size(), INITIAL_WRITE_SIZE);
        assert_eq!(chunk_sizes(&handle)[before..], [1300, 700]);
    }

    #[tokio::test]
    async fn unbuffered_writes_go_straight_through() {
        let (mut channel, handle) = plain_channel();

        channel.write(b"hello ").await.unwrap();
        channel.write(b"world").await.unwrap();
        assert_eq!(handle.chunks(), vec![b"hello ".to_vec(), b"world".to_vec()]);
        assert!(channel.is_dirty());

        channel.flush().await.unwrap();
        assert!(!channel.is_dirty());
        assert_eq!(handle.flushes(), 1);
    }

    #[tokio::test]
    async fn failed_flush_keeps_channel_dirty() {
        let (mut channel, handle) = tls_channel();
        channel.write(b"payload").await.unwrap();

        handle.fail_writes(io::ErrorKind::BrokenPipe);
        let err = channel.flush().await.unwrap_err();
        assert!(matches!(err, ChannelError::Transport(_)));
        assert!(channel.is_dirty());

        handle.heal_writes();
        channel.flush().await.unwrap();
        assert!(!channel.is_dirty());
        assert_eq!(handle.written(), b"payload");
    }

    #[tokio::test]
    async fn retry_after_partial_flush_sends_each_byte_once() {
        let (mut channel, handle) = tls_channel();
        let data: Vec<u8> = (0..2000u32).map(|i| (i % 251) as u8).collect();
        channel.write(&data).await.unwrap();

        handle.fail_writes_after(1, io::ErrorKind::BrokenPipe);
        let err = channel.flush().await.unwrap_err();
        assert!(matches!(err, ChannelError::Transport(_)));
        assert!(channel.is_dirty());
        assert_eq!(chunk_sizes(&handle), vec![1300]);
        assert_eq!(channel.buffered_len(), 700);

        handle.heal_writes();
        channel.flush().await.unwrap();
        assert_eq!(handle.written(), data);
        assert!(!channel.is_dirty());
    }

    #[tokio::test]
    async fn read_continues_from_transport_after_staged_input() {
        let (mut channel, handle) = plain_channel();
        handle.push_input(b"ab");
        assert_eq!(channel.peek(2).await.unwrap(), b"ab");
        handle.push_input(b"cd");

        let mut seen = Vec::new();
        let n = channel
            .read(ReadMode::NonBlocking, |data| {
                seen.extend_from_slice(data);
                ReadProgress::more(data.len())
            })
            .await
            .unwrap();
        assert_eq!(n, 4);
        assert_eq!(seen, b"abcd");
        assert_eq!(handle.pending_input(), 0);
    }

    #[tokio::test]
    async fn staged_input_is_returned_when_transport_would_block() {
        let (mut channel, handle) = plain_channel();
        handle.push_input(b"ab");
        channel.peek(2).await.unwrap();

        let n = channel
            .read(ReadMode::NonBlocking, |data| ReadProgress::more(data.len()))
            .await
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(channel.staged_len(), 0);
    }

    #[tokio::test]
    async fn partial_consume_leaves_suffix_for_next_read() {
        let (mut channel, handle) = plain_channel();
        handle.push_input(b"abcdef");

        let mut first = Vec::new();
        let n = channel
            .read(ReadMode::Blocking, |data| {
                first.extend_from_slice(&data[..2]);
                ReadProgress::more(2)
            })
            .await
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(first, b"ab");
        assert_eq!(channel.staged_len(), 4);

        let mut second = Vec::new();
        let n = channel
            .read(ReadMode::NonBlocking, |data| {
                second.extend_from_slice(data);
                ReadProgress::more(data.len())
            })
            .await
            .unwrap();
        assert_eq!(n, 4);
        assert_eq!(second, b"cdef");
    }

    #[tokio::test]
    async fn done_stops_before_later_spans() {
        let (mut channel, handle) = plain_channel();
        handle.push_input(b"one");
        channel.peek(3).await.unwrap();
        handle.push_input(b"two");
        channel.peek(6).await.unwrap();

        let n = channel
            .read(ReadMode::NonBlocking, |data| ReadProgress::done(data.len()))
            .await
            .unwrap();
        assert_eq!(n, 3);
        assert_eq!(channel.staged_len(), 3);
    }

    #[tokio::test]
    async fn nonblocking_read_without_data_would_block() {
        let (mut channel, _handle) = plain_channel();
        let err = channel
            .read(ReadMode::NonBlocking, |data| ReadProgress::more(data.len()))
            .await
            .unwrap_err();
        assert!(matches!(err, ChannelError::WouldBlock));
    }

    #[tokio::test]
    async fn closed_transport_reports_eof_after_staged_data() {
        let (mut channel, handle) = plain_channel();
        handle.push_input(b"last");
        handle.close();

        let n = channel
            .read(ReadMode::Blocking, |data| ReadProgress::more(data.len()))
            .await
            .unwrap();
        assert_eq!(n, 4);

        let err = channel
            .read(ReadMode::Blocking, |data| ReadProgress::more(data.len()))
            .await
            .unwrap_err();
        assert!(matches!(err, ChannelError::Eof));
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let (mut channel, handle) = plain_channel();
        handle.fail_reads(io::ErrorKind::ConnectionReset);
        let err = channel
            .read(ReadMode::Blocking, |data| ReadProgress::more(data.len()))
            .await
            .unwrap_err();
        match err {
            ChannelError::Transport(e) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn peek_does_not_consume() {
        let (mut channel, handle) = plain_channel();
        handle.push_input(b"PRI * ");
        handle.push_input(b"HTTP/2.0");
        handle.close();

        assert_eq!(channel.peek(10).await.unwrap(), b"PRI * HTTP");
        assert_eq!(channel.peek(100).await.unwrap(), b"PRI * HTTP/2.0");

        let mut seen = Vec::new();
        channel
            .read(ReadMode::Blocking, |data| {
                seen.extend_from_slice(data);
                ReadProgress::more(data.len())
            })
            .await
            .unwrap();
        assert_eq!(seen, b"PRI * HTTP/2.0");
    }

    #[tokio::test]
    async fn peek_while_stops_on_rejected_prefix() {
        let (mut channel, handle) = plain_channel();
        handle.push_input(b"GET");

        // Never closed: a rejected prefix must not wait for more input.
        let seen = channel
            .peek_while(24, |seen| b"PRI * HTTP/2.0".starts_with(seen))
            .await
            .unwrap();
        assert_eq!(seen, b"GET");
    }

    #[tokio::test]
    async fn reads_report_busy_states() {
        let (transport, handle) = MemoryTransport::new();
        let tracker = ConnectionTracker::new();
        let mut channel = BufferedChannel::new(
            ConnectionId::new(),
            transport,
            &IoConfig::default(),
            Arc::new(tracker.clone()),
        );

        handle.push_input(b"x");
        channel
            .read(ReadMode::Blocking, |data| ReadProgress::more(data.len()))
            .await
            .unwrap();
        let _ = channel
            .read(ReadMode::NonBlocking, |data| ReadProgress::more(data.len()))
            .await;
        channel.write(b"y").await.unwrap();

        assert_eq!(tracker.transitions(BusyState::KeepAlive), 1);
        assert_eq!(tracker.transitions(BusyState::Read), 1);
        assert_eq!(tracker.transitions(BusyState::Write), 1);
    }

    #[test]
    fn hex_preview_is_bounded() {
        assert_eq!(hex_preview(&[0xab, 0x01]), "ab01");
        assert_eq!(hex_preview(&[0u8; 100]).len(), TRACE_PREVIEW_CHARS);
    }
}
