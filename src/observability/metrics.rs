//! Metrics for `gtc-peer`.
//!
//! Counters go through the `metrics` facade and are no-ops until a
//! recorder is installed with [`init_metrics`]. Every label value comes
//! from a fixed set of `&'static str` labels defined in this crate, so
//! cardinality is bounded by construction.

use std::sync::OnceLock;

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::error::GtcPeerError;

/// Handle to the installed Prometheus recorder.
static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the global Prometheus recorder and returns a handle for
/// rendering the exposition text.
///
/// Repeated calls return the handle from the first installation.
///
/// # Errors
///
/// Returns `GtcPeerError::Io` if another recorder is already installed.
pub fn init_metrics() -> Result<PrometheusHandle, GtcPeerError> {
    if let Some(handle) = HANDLE.get() {
        tracing::debug!("metrics already initialized, skipping");
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| GtcPeerError::Io(std::io::Error::other(e.to_string())))?;

    describe_metrics();
    Ok(HANDLE.get_or_init(|| handle).clone())
}

fn describe_metrics() {
    describe_counter!(
        "gtc_requests_total",
        "GTC requests processed, by classification"
    );
    describe_counter!(
        "gtc_responses_total",
        "GTC responses built, by framing (plain, tunnel, empty)"
    );
    describe_counter!(
        "gtc_prompts_total",
        "User prompts issued instead of a response"
    );
    describe_counter!(
        "gtc_settings_lines_total",
        "Settings lines seen, by result (applied, rejected, unrecognized)"
    );
}

/// Records a classified request.
pub fn record_request(kind: &'static str) {
    counter!("gtc_requests_total", "kind" => kind).increment(1);
}

/// Records a built response.
pub fn record_response(framing: &'static str) {
    counter!("gtc_responses_total", "framing" => framing).increment(1);
}

/// Records a user prompt.
pub fn record_prompt(command: &'static str) {
    counter!("gtc_prompts_total", "command" => command).increment(1);
}

/// Records one settings line.
pub fn record_settings_line(result: &'static str) {
    counter!("gtc_settings_lines_total", "result" => result).increment(1);
}
