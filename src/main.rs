//! h2mpm: prefork HTTP server core with HTTP/2 negotiation.
//!
//! # Architecture Overview
//!
//! ```text
//!   parent (supervisor)                         workers (forked)
//!  ┌────────────────────────┐   pipe of death  ┌──────────────────────────────┐
//!  │ bind listeners         │ ───────────────→ │ accept                       │
//!  │ fork workers           │   dummy conn     │   → BufferedChannel          │
//!  │ relieve every interval │ ───────────────→ │   → ProtocolSniffer          │
//!  │ reclaim on shutdown    │                  │       ├ h2/h2c → engine      │
//!  │   TERM 3s/5s/7s        │   SIGTERM/KILL   │       └ HTTP/1 fallback      │
//!  │   KILL 9s, give up 10s │ ───────────────→ │   → check pod, drain on Die  │
//!  └────────────────────────┘                  └──────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use h2mpm::config::loader::load_config;
use h2mpm::config::ServerConfig;
use h2mpm::h2::SecurityPolicy;
use h2mpm::net::TlsSession;
use h2mpm::observability::logging::init_logging;
use h2mpm::server::run_server;
use h2mpm::server::supervisor::exit_code;

#[derive(Parser)]
#[command(name = "h2mpm")]
#[command(about = "Prefork HTTP server with HTTP/2 negotiation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fork the workers and serve until stopped
    Serve {
        /// TOML configuration file; defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Check TLS parameters against the RFC 7540 requirements
    CheckTls {
        /// Protocol version, e.g. TLSv1.2
        #[arg(short, long)]
        protocol: Option<String>,

        /// Cipher suite name, OpenSSL or IANA notation
        #[arg(short, long)]
        cipher: Option<String>,

        /// Treat unknown parameters as failures
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config),
        Commands::CheckTls {
            protocol,
            cipher,
            strict,
        } => Ok(check_tls(protocol, cipher, strict)),
    }
}

fn serve(path: Option<PathBuf>) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = match &path {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    init_logging(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?path,
        workers = config.server.workers,
        listeners = config.listeners.len(),
        h2_direct = config.h2.direct,
        "h2mpm starting"
    );

    let cause = run_server(config)?;

    tracing::info!(?cause, "Shutdown complete");
    Ok(ExitCode::from(exit_code(cause)))
}

fn check_tls(protocol: Option<String>, cipher: Option<String>, strict: bool) -> ExitCode {
    let policy = SecurityPolicy::rfc7540(true);
    let session = TlsSession {
        protocol_version: protocol,
        cipher,
        alpn: None,
    };

    match policy.check(true, Some(&session), strict) {
        Ok(()) => {
            println!("compliant");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            println!("not compliant: {failure}");
            ExitCode::FAILURE
        }
    }
}
