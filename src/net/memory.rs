//! In-memory transport.
//!
//! Input is scripted through a [`MemoryHandle`]; every `poll_write` call is
//! recorded as its own chunk so callers can observe exactly how output was
//! grouped. Useful for embedding the connection core in simulations and for
//! tests. Outside this crate's own tests it needs the `test-util` feature.

use std::collections::VecDeque;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll, Waker};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

use crate::net::transport::{TlsSession, Transport};

#[derive(Debug, Default)]
struct Inner {
    input: VecDeque<Vec<u8>>,
    closed: bool,
    read_waker: Option<Waker>,
    chunks: Vec<Vec<u8>>,
    flushes: usize,
    handshakes: usize,
    write_error: Option<io::ErrorKind>,
    fail_after: Option<(usize, io::ErrorKind)>,
    read_error: Option<io::ErrorKind>,
}

/// Scripted transport. Construct with [`MemoryTransport::new`].
#[derive(Debug)]
pub struct MemoryTransport {
    inner: Arc<Mutex<Inner>>,
    tls: bool,
    session: Option<TlsSession>,
}

/// Test-side handle to a [`MemoryTransport`].
#[derive(Debug, Clone)]
pub struct MemoryHandle {
    inner: Arc<Mutex<Inner>>,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryTransport {
    /// Plaintext transport with no pending input.
    pub fn new() -> (Self, MemoryHandle) {
        let inner = Arc::new(Mutex::new(Inner::default()));
        let handle = MemoryHandle {
            inner: Arc::clone(&inner),
        };
        (
            Self {
                inner,
                tls: false,
                session: None,
            },
            handle,
        )
    }

    /// Mark the transport as encrypted with the given (possibly unknown)
    /// session parameters.
    pub fn with_tls(mut self, session: Option<TlsSession>) -> Self {
        self.tls = true;
        self.session = session;
        self
    }
}

impl MemoryHandle {
    /// Queue bytes for the reader. Each call becomes one read segment.
    pub fn push_input(&self, data: &[u8]) {
        let mut inner = lock(&self.inner);
        inner.input.push_back(data.to_vec());
        if let Some(waker) = inner.read_waker.take() {
            waker.wake();
        }
    }

    /// Signal end of input once the queued bytes are read.
    pub fn close(&self) {
        let mut inner = lock(&self.inner);
        inner.closed = true;
        if let Some(waker) = inner.read_waker.take() {
            waker.wake();
        }
    }

    /// Make every following read fail with `kind`.
    pub fn fail_reads(&self, kind: io::ErrorKind) {
        lock(&self.inner).read_error = Some(kind);
    }

    /// Make every following write and flush fail with `kind`.
    pub fn fail_writes(&self, kind: io::ErrorKind) {
        lock(&self.inner).write_error = Some(kind);
    }

    /// Accept `writes` more write calls, then fail like [`fail_writes`](Self::fail_writes).
    pub fn fail_writes_after(&self, writes: usize, kind: io::ErrorKind) {
        let mut inner = lock(&self.inner);
        if writes == 0 {
            inner.write_error = Some(kind);
        } else {
            inner.fail_after = Some((writes, kind));
        }
    }

    /// Let writes succeed again.
    pub fn heal_writes(&self) {
        let mut inner = lock(&self.inner);
        inner.write_error = None;
        inner.fail_after = None;
    }

    /// Every write call seen so far, in order.
    pub fn chunks(&self) -> Vec<Vec<u8>> {
        lock(&self.inner).chunks.clone()
    }

    /// Concatenation of every chunk written so far.
    pub fn written(&self) -> Vec<u8> {
        lock(&self.inner).chunks.concat()
    }

    /// Number of successful flushes.
    pub fn flushes(&self) -> usize {
        lock(&self.inner).flushes
    }

    /// Number of handshakes requested.
    pub fn handshakes(&self) -> usize {
        lock(&self.inner).handshakes
    }

    /// Bytes queued but not yet read.
    pub fn pending_input(&self) -> usize {
        lock(&self.inner).input.iter().map(Vec::len).sum()
    }
}

impl AsyncRead for MemoryTransport {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let mut guard = lock(&self.inner);
        let inner = &mut *guard;
        if let Some(kind) = inner.read_error {
            return Poll::Ready(Err(io::Error::from(kind)));
        }

        match inner.input.front_mut() {
            Some(front) => {
                let n = front.len().min(buf.remaining());
                buf.put_slice(&front[..n]);
                front.drain(..n);
                if front.is_empty() {
                    inner.input.pop_front();
                }
                Poll::Ready(Ok(()))
            }
            None if inner.closed => Poll::Ready(Ok(())),
            None => {
                inner.read_waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

impl AsyncWrite for MemoryTransport {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let mut inner = lock(&self.inner);
        if let Some(kind) = inner.write_error {
            return Poll::Ready(Err(io::Error::from(kind)));
        }
        inner.chunks.push(buf.to_vec());
        if let Some((left, kind)) = inner.fail_after {
            if left <= 1 {
                inner.write_error = Some(kind);
                inner.fail_after = None;
            } else {
                inner.fail_after = Some((left - 1, kind));
            }
        }
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let mut inner = lock(&self.inner);
        if let Some(kind) = inner.write_error {
            return Poll::Ready(Err(io::Error::from(kind)));
        }
        inner.flushes += 1;
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

impl Transport for MemoryTransport {
    fn is_tls(&self) -> bool {
        self.tls
    }

    fn tls_session(&self) -> Option<TlsSession> {
        self.session.clone()
    }

    fn handshake(&mut self) -> impl Future<Output = io::Result<()>> + Send {
        let mut inner = lock(&self.inner);
        inner.handshakes += 1;
        let result = match inner.read_error {
            Some(kind) => Err(io::Error::from(kind)),
            None => Ok(()),
        };
        async move { result }
    }
}
