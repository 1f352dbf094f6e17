//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::process::{Child, Command};
use std::sync::Arc;
use std::time::Duration;

use h2mpm::config::{ListenerConfig, ServerConfig};
use h2mpm::lifecycle::pod::{PipeOfDeath, Wakeup};
use h2mpm::net::listener::BoundListener;
use h2mpm::server::worker::{serve, StopReason, WorkerError, WorkerShared};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

/// A worker serving one plaintext listener inside the test runtime.
pub struct TestWorker {
    pub addr: SocketAddr,
    pub pod: PipeOfDeath,
    pub shared: Arc<WorkerShared>,
    pub handle: JoinHandle<Result<StopReason, WorkerError>>,
}

/// Bind 127.0.0.1:0 and run a worker on it.
pub fn start_worker(config: &ServerConfig) -> TestWorker {
    let listener_config = ListenerConfig {
        bind_address: "127.0.0.1:0".to_string(),
        ..ListenerConfig::default()
    };
    let bound = BoundListener::bind(&listener_config).unwrap();
    let addr = bound.endpoint().addr;

    let wakeup = Wakeup::new(vec![bound.endpoint().clone()], "h2mpm-test")
        .with_timeout(Duration::from_secs(1));
    let pod = PipeOfDeath::open(wakeup).unwrap();
    let reader = pod.reader().unwrap();

    let shared = Arc::new(WorkerShared::from_config(config));
    let handle = tokio::spawn(serve(
        vec![bound],
        reader,
        Arc::clone(&shared),
        Duration::from_secs(2),
    ));

    TestWorker {
        addr,
        pod,
        shared,
        handle,
    }
}

/// Send `request`, half-close, and collect everything the server sends back.
pub async fn exchange(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();
    let mut response = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
        .await
        .expect("server did not close the connection")
        .unwrap();
    response
}

/// A child process that stays alive until signalled.
pub fn spawn_sleeper() -> Child {
    Command::new("sleep").arg("30").spawn().unwrap()
}

/// A child process that exits right away with `code`.
pub fn spawn_exiting(code: i32) -> Child {
    Command::new("sh")
        .arg("-c")
        .arg(format!("exit {code}"))
        .spawn()
        .unwrap()
}
