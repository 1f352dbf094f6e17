//! Metrics collection and exposition.
//!
//! # Metrics
//! - `h2mpm_sniff_total` (counter): protocol decisions by outcome
//! - `h2mpm_connections_total` (counter): accepted connections by listener protocol
//! - `h2mpm_children_reaped_total` (counter): reaped workers by exit class
//! - `h2mpm_signals_sent_total` (counter): escalation signals by action
//! - `h2mpm_wakeups_total` (counter): dummy wakeup connections by result

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter. Must run inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics exporter"),
    }
}

/// Count one sniffing decision.
pub fn record_sniff(outcome: &'static str) {
    metrics::counter!("h2mpm_sniff_total", "outcome" => outcome).increment(1);
}

/// Count one accepted connection.
pub fn record_connection(protocol: &str) {
    metrics::counter!("h2mpm_connections_total", "protocol" => protocol.to_string()).increment(1);
}

/// Count one reaped child process.
pub fn record_child_reaped(class: &'static str) {
    metrics::counter!("h2mpm_children_reaped_total", "class" => class).increment(1);
}

/// Count one signal sent during reclamation.
pub fn record_signal(action: &'static str) {
    metrics::counter!("h2mpm_signals_sent_total", "action" => action).increment(1);
}

/// Count one dummy wakeup connection attempt.
pub fn record_wakeup(success: bool) {
    let result = if success { "ok" } else { "failed" };
    metrics::counter!("h2mpm_wakeups_total", "result" => result).increment(1);
}
