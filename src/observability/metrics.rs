//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_resolutions_total` (counter): resolutions by outcome
//!   (`matched`, `not_found`, `redirect_loop`)
//! - `router_redirects_total` (counter): redirect hops followed
//! - `router_fallback_total` (counter): paths caught by the wildcard
//! - `router_table_swaps_total` (counter): hot reloads applied
//!
//! # Design Decisions
//! - Counters go through the `metrics` facade and cost one atomic
//!   increment; without an installed exporter they are no-ops
//! - The Prometheus endpoint is only served in watch mode

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub fn record_resolution(outcome: &'static str) {
    counter!("router_resolutions_total", "outcome" => outcome).increment(1);
}

pub fn record_redirect() {
    counter!("router_redirects_total").increment(1);
}

pub fn record_fallback() {
    counter!("router_fallback_total").increment(1);
}

pub fn record_table_swap() {
    counter!("router_table_swaps_total").increment(1);
}

/// Install the Prometheus exporter on the given address.
///
/// Requires a running tokio runtime; called from watch mode only.
pub fn install_exporter(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}
