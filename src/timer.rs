use std::time::Instant;

use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::BenchError;
use crate::gateway::Gateway;

/// Latency of one GET. `request` is 1-based and contiguous in completion order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(rename = "Request Number")]
    pub request: usize,
    #[serde(rename = "Response Time (ms)")]
    pub elapsed_ms: f64,
}

/// Issues `count` sequential GETs to `url` and times each one.
///
/// Any failed request aborts the loop; measurements collected so far are dropped.
/// A non-success status still counts as a completed request.
pub fn measure<G: Gateway>(
    gateway: &mut G,
    url: &str,
    count: usize,
    progress: &ProgressBar,
) -> Result<Vec<Measurement>, BenchError> {
    let mut measurements = Vec::new();

    for request in 1..=count {
        let start = Instant::now();
        let fetched = gateway.get(url);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let fetched = match fetched {
            Ok(fetched) => fetched,
            Err(source) => {
                error!(
                    request,
                    completed = measurements.len(),
                    "request failed after {elapsed_ms:.2} ms: {source}"
                );
                return Err(BenchError::Network {
                    request,
                    url: url.to_string(),
                    source,
                });
            }
        };

        if !fetched.is_success() {
            warn!(request, status = fetched.status, "non-success status");
        }
        debug!(
            request,
            status = fetched.status,
            bytes = fetched.bytes,
            elapsed_ms,
            "request completed"
        );

        let measurement = Measurement {
            request,
            elapsed_ms,
        };
        progress.suspend(|| println!("{}", progress_line(&measurement)));
        progress.inc(1);
        measurements.push(measurement);
    }

    Ok(measurements)
}

/// Human-readable line printed after each request.
pub fn progress_line(m: &Measurement) -> String {
    format!("Request {}: {:.2} ms", m.request, m.elapsed_ms)
}
