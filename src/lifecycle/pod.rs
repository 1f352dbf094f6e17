//! Pipe of death: tells idle workers to exit.
//!
//! # Responsibilities
//! - One pipe shared by the parent and every worker
//! - Parent writes a byte per worker that should exit
//! - Workers check the pipe without blocking after each accept
//! - A dummy connection to our own listener wakes a worker parked in accept
//!
//! # Data Flow
//! ```text
//! parent: signal()  → write '!' → connect to listener → send OPTIONS → close
//!                                        │
//! worker: accept() returns ◄─────────────┘
//!         check()   → read 1 byte → Die
//! ```
//!
//! # Design Decisions
//! - Both ends are non-blocking; a full pipe reports an error instead of
//!   stalling the parent
//! - Plaintext listeners are preferred for the dummy connection, a TLS port
//!   would see a bare request instead of a handshake

use std::fs::File;
use std::io::{self, Read, Write};
use std::os::fd::{AsFd, BorrowedFd};
use std::time::Duration;

use nix::fcntl::OFlag;
use nix::unistd::pipe2;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::net::listener::ListenEndpoint;
use crate::observability::metrics;

/// Default bound on connecting to our own listener.
pub const DEFAULT_WAKEUP_TIMEOUT: Duration = Duration::from_secs(3);

/// What a worker read from the pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PodSignal {
    /// A byte was waiting: this worker should exit.
    Die,
    /// The write end is gone: the parent exited, do not expect a restart.
    NoRestart,
}

/// Where and how to open the dummy wakeup connection.
#[derive(Debug, Clone)]
pub struct Wakeup {
    endpoints: Vec<ListenEndpoint>,
    description: String,
    timeout: Duration,
}

impl Wakeup {
    pub fn new(endpoints: Vec<ListenEndpoint>, description: impl Into<String>) -> Self {
        Self {
            endpoints,
            description: description.into(),
            timeout: DEFAULT_WAKEUP_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// First plain `http` endpoint, else the first endpoint.
    pub fn target(&self) -> Option<&ListenEndpoint> {
        self.endpoints
            .iter()
            .find(|e| e.protocol.eq_ignore_ascii_case("http"))
            .or_else(|| self.endpoints.first())
    }

    /// The request sent on the dummy connection.
    pub fn request(&self) -> String {
        format!(
            "OPTIONS * HTTP/1.0\r\nUser-Agent: {} (internal dummy connection)\r\n\r\n",
            self.description
        )
    }

    /// Connect to one of our listeners, send a request and close.
    pub async fn connect(&self) -> io::Result<()> {
        let Some(target) = self.target() else {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no listener to wake"));
        };

        let connect = tokio::time::timeout(self.timeout, TcpStream::connect(target.addr)).await;
        let mut stream = match connect {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                tracing::warn!(address = %target.addr, error = %e, "Dummy connection to listener failed");
                metrics::record_wakeup(false);
                return Err(e);
            }
            Err(_) => {
                // Usually nobody is left to accept.
                tracing::debug!(address = %target.addr, timeout_ms = self.timeout.as_millis() as u64, "Dummy connection timed out");
                metrics::record_wakeup(false);
                return Err(io::Error::new(io::ErrorKind::TimedOut, "dummy connection timed out"));
            }
        };

        // The worker only needs accept() to return.
        if let Err(e) = stream.write_all(self.request().as_bytes()).await {
            tracing::debug!(address = %target.addr, error = %e, "Dummy request not sent");
        } else if let Err(e) = stream.shutdown().await {
            tracing::debug!(address = %target.addr, error = %e, "Dummy connection shutdown failed");
        }

        metrics::record_wakeup(true);
        tracing::trace!(address = %target.addr, "Dummy connection sent");
        Ok(())
    }
}

/// The pipe plus the wakeup connection used to unblock accept.
#[derive(Debug)]
pub struct PipeOfDeath {
    read: File,
    write: File,
    wakeup: Wakeup,
}

impl PipeOfDeath {
    pub fn open(wakeup: Wakeup) -> io::Result<Self> {
        let (read, write) = pipe2(OFlag::O_NONBLOCK | OFlag::O_CLOEXEC)?;
        Ok(Self {
            read: File::from(read),
            write: File::from(write),
            wakeup,
        })
    }

    pub fn wakeup(&self) -> &Wakeup {
        &self.wakeup
    }

    /// Read one byte without blocking.
    ///
    /// An empty pipe is reported as `WouldBlock`.
    pub fn check(&self) -> io::Result<PodSignal> {
        check_pipe(&self.read)
    }

    /// Tell one worker to exit and make sure somebody leaves accept() to notice.
    pub async fn signal(&self) -> io::Result<()> {
        if let Err(e) = (&self.write).write_all(b"!") {
            tracing::warn!(error = %e, "Failed to write pipe of death");
        }
        self.wakeup.connect().await
    }

    /// Wake up to `count` workers, one connection at a time, without writing
    /// to the pipe. Stops at the first failure and returns how many succeeded.
    pub async fn wake_all(&self, count: usize) -> usize {
        let mut woken = 0;
        while woken < count {
            if self.wakeup.connect().await.is_err() {
                break;
            }
            woken += 1;
        }
        woken
    }

    /// Read end, for workers polling it next to their listeners.
    pub fn read_fd(&self) -> BorrowedFd<'_> {
        self.read.as_fd()
    }

    pub fn write_fd(&self) -> BorrowedFd<'_> {
        self.write.as_fd()
    }

    /// A second handle on the read end, for a worker sharing this process.
    /// Once every write end is closed the reader sees `NoRestart`.
    pub fn reader(&self) -> io::Result<PodReader> {
        Ok(PodReader {
            read: self.read.try_clone()?,
        })
    }

    /// Keep only the read end. A forked worker calls this on its inherited
    /// copy, so the parent's write end is the last one open.
    pub fn into_reader(self) -> PodReader {
        let Self { read, write, .. } = self;
        drop(write);
        PodReader { read }
    }
}

/// A worker's end of the pipe.
#[derive(Debug)]
pub struct PodReader {
    read: File,
}

impl PodReader {
    pub fn check(&self) -> io::Result<PodSignal> {
        check_pipe(&self.read)
    }

    pub fn fd(&self) -> BorrowedFd<'_> {
        self.read.as_fd()
    }
}

fn check_pipe(mut read: &File) -> io::Result<PodSignal> {
    let mut byte = [0u8; 1];
    match read.read(&mut byte)? {
        0 => Ok(PodSignal::NoRestart),
        _ => Ok(PodSignal::Die),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::os::fd::AsRawFd;
    use tokio::io::AsyncReadExt;

    fn endpoint(addr: &str, protocol: &str) -> ListenEndpoint {
        ListenEndpoint {
            addr: addr.parse::<SocketAddr>().unwrap(),
            protocol: protocol.to_string(),
        }
    }

    #[test]
    fn empty_pipe_would_block() {
        let pod = PipeOfDeath::open(Wakeup::new(Vec::new(), "test")).unwrap();
        let err = pod.check().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WouldBlock);
    }

    #[test]
    fn one_byte_means_die() {
        let pod = PipeOfDeath::open(Wakeup::new(Vec::new(), "test")).unwrap();
        (&pod.write).write_all(b"!!").unwrap();
        assert_eq!(pod.check().unwrap(), PodSignal::Die);
        assert_eq!(pod.check().unwrap(), PodSignal::Die);
        assert!(pod.check().is_err());
        assert_ne!(pod.read_fd().as_raw_fd(), pod.write_fd().as_raw_fd());
    }

    #[test]
    fn closed_write_end_means_no_restart() {
        let pod = PipeOfDeath::open(Wakeup::new(Vec::new(), "test")).unwrap();
        (&pod.write).write_all(b"!").unwrap();
        let reader = pod.reader().unwrap();
        drop(pod);
        assert_eq!(reader.check().unwrap(), PodSignal::Die);
        assert_eq!(reader.check().unwrap(), PodSignal::NoRestart);
    }

    #[test]
    fn inherited_copy_releases_its_write_end() {
        let parent = PipeOfDeath::open(Wakeup::new(Vec::new(), "test")).unwrap();
        // What fork hands the worker: duplicates of both ends.
        let inherited = PipeOfDeath {
            read: parent.read.try_clone().unwrap(),
            write: parent.write.try_clone().unwrap(),
            wakeup: parent.wakeup.clone(),
        };

        let reader = inherited.into_reader();
        let err = reader.check().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WouldBlock);

        drop(parent);
        assert_eq!(reader.check().unwrap(), PodSignal::NoRestart);
    }

    #[test]
    fn plain_http_listener_is_preferred() {
        let wakeup = Wakeup::new(
            vec![
                endpoint("127.0.0.1:8443", "https"),
                endpoint("127.0.0.1:8080", "HTTP"),
            ],
            "h2mpm",
        );
        assert_eq!(wakeup.target().unwrap().addr.port(), 8080);

        let only_tls = Wakeup::new(vec![endpoint("127.0.0.1:8443", "https")], "h2mpm");
        assert_eq!(only_tls.target().unwrap().addr.port(), 8443);

        assert!(Wakeup::new(Vec::new(), "h2mpm").target().is_none());
    }

    #[test]
    fn dummy_request_names_the_server() {
        let wakeup = Wakeup::new(Vec::new(), "h2mpm/0.1");
        assert_eq!(
            wakeup.request(),
            "OPTIONS * HTTP/1.0\r\nUser-Agent: h2mpm/0.1 (internal dummy connection)\r\n\r\n"
        );
    }

    #[tokio::test]
    async fn signal_writes_byte_and_connects() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let pod = PipeOfDeath::open(Wakeup::new(
            vec![endpoint(&addr.to_string(), "http")],
            "h2mpm",
        ))
        .unwrap();

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = String::new();
            stream.read_to_string(&mut request).await.unwrap();
            request
        });

        pod.signal().await.unwrap();
        assert_eq!(pod.check().unwrap(), PodSignal::Die);
        assert!(server.await.unwrap().starts_with("OPTIONS * HTTP/1.0\r\n"));
    }

    #[tokio::test]
    async fn wake_all_stops_at_first_failure() {
        // Bind then drop to get a port nobody listens on.
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let pod = PipeOfDeath::open(Wakeup::new(
            vec![endpoint(&addr.to_string(), "http")],
            "h2mpm",
        ))
        .unwrap();

        assert_eq!(pod.wake_all(5).await, 0);
        // wake_all never touches the pipe.
        assert!(pod.check().is_err());
    }

    #[tokio::test]
    async fn signal_without_listeners_still_writes() {
        let pod = PipeOfDeath::open(Wakeup::new(Vec::new(), "h2mpm")).unwrap();
        assert!(pod.signal().await.is_err());
        assert_eq!(pod.check().unwrap(), PodSignal::Die);
    }
}
