// # gateway-bench: latency benchmark for a single gateway endpoint
//
// Issues sequential HTTP GETs against `{gateway}/{transaction id}`, times each
// request, and writes the series to a CSV file and a dark-themed chart.
//
// The HTTP side is behind the `reqwest` feature and PNG rasterisation behind
// `resvg`; both are on by default.

use indicatif::ProgressBar;
use tracing::info;

#[cfg(feature = "reqwest")]
pub mod client;

/// Benchmark configuration and its TOML loader.
pub mod config;

/// Error types shared by every stage of a run.
pub mod error;

/// The endpoint abstraction, with the remote HTTP implementation.
pub mod gateway;

/// Sequential request timing.
pub mod timer;

/// CSV output of measurements.
pub mod report;

/// Utilities for generating the SVG response-time chart.
pub mod svg;

/// Saving and displaying the chart.
pub mod plot;

pub use config::BenchConfig;
pub use error::BenchError;
pub use gateway::{Fetched, Gateway};
pub use timer::Measurement;

#[cfg(feature = "reqwest")]
pub use gateway::HttpGateway;

/// Runs the whole benchmark: time the requests, then write the CSV and the chart.
///
/// Output files are only touched once every request has completed and the chart
/// has been rendered, so a failed run never leaves a partial CSV or chart behind.
pub fn run<G: Gateway>(
    config: &BenchConfig,
    gateway: &mut G,
    progress: &ProgressBar,
) -> Result<Vec<Measurement>, BenchError> {
    config.validate()?;
    let url = config.target_url();
    info!(%url, requests = config.request_count, "starting benchmark");

    let measured = timer::measure(gateway, &url, config.request_count, progress);
    progress.finish_and_clear();
    let measurements = measured?;

    let chart = plot::encode_chart(&measurements, &config.image_path)?;

    report::write_csv(&measurements, &config.csv_path)?;
    info!(path = %config.csv_path.display(), rows = measurements.len(), "results saved");

    plot::write_chart(&chart, &config.image_path)?;
    if config.interactive_display {
        plot::show(&config.image_path);
    }

    Ok(measurements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::tests::ScriptedGateway;
    use std::fs;
    use std::path::Path;
    use std::time::Duration;

    fn config_in(dir: &Path, count: usize) -> BenchConfig {
        BenchConfig {
            gateway_url: "http://gateway.test/".to_string(),
            transaction_id: "0xabc".to_string(),
            request_count: count,
            csv_path: dir.join("media").join("run.csv"),
            image_path: dir.join("media").join("run.svg"),
            interactive_display: false,
        }
    }

    #[test]
    fn writes_both_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), 5);
        let mut gateway = ScriptedGateway::ok();

        let measurements = run(&config, &mut gateway, &ProgressBar::hidden()).unwrap();

        assert_eq!(measurements.len(), 5);
        assert!(gateway.urls.iter().all(|u| u == "http://gateway.test/0xabc"));
        assert_eq!(report::read_csv(&config.csv_path).unwrap(), measurements);
        assert!(fs::read_to_string(&config.image_path).unwrap().contains("<svg"));
    }

    #[test]
    fn zero_requests_still_write_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), 0);
        let mut gateway = ScriptedGateway::ok();

        let measurements = run(&config, &mut gateway, &ProgressBar::hidden()).unwrap();

        assert!(measurements.is_empty());
        assert_eq!(gateway.calls, 0);
        assert_eq!(
            fs::read_to_string(&config.csv_path).unwrap(),
            "Request Number,Response Time (ms)\n"
        );
        assert!(config.image_path.exists());
    }

    #[test]
    fn failure_on_third_request_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), 5);
        let mut gateway = ScriptedGateway {
            fail_on: vec![3],
            ..ScriptedGateway::ok()
        };

        let err = run(&config, &mut gateway, &ProgressBar::hidden()).unwrap_err();

        assert!(matches!(err, BenchError::Network { request: 3, .. }));
        assert!(!config.csv_path.exists());
        assert!(!config.image_path.exists());
    }

    #[test]
    fn failure_leaves_previous_outputs_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), 5);
        run(&config, &mut ScriptedGateway::ok(), &ProgressBar::hidden()).unwrap();
        let csv_before = fs::read_to_string(&config.csv_path).unwrap();
        let chart_before = fs::read_to_string(&config.image_path).unwrap();

        let mut failing = ScriptedGateway {
            fail_on: vec![3],
            delay: Duration::from_millis(1),
            ..ScriptedGateway::ok()
        };
        assert!(run(&config, &mut failing, &ProgressBar::hidden()).is_err());

        assert_eq!(fs::read_to_string(&config.csv_path).unwrap(), csv_before);
        assert_eq!(fs::read_to_string(&config.image_path).unwrap(), chart_before);
    }

    #[test]
    fn progress_bar_is_cleared_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), 5);
        let progress = ProgressBar::hidden();
        let mut failing = ScriptedGateway {
            fail_on: vec![2],
            ..ScriptedGateway::ok()
        };

        assert!(run(&config, &mut failing, &progress).is_err());
        assert!(progress.is_finished());
    }

    #[cfg(not(feature = "resvg"))]
    #[test]
    fn chart_render_failure_writes_no_csv() {
        let dir = tempfile::tempdir().unwrap();
        let config = BenchConfig {
            image_path: dir.path().join("media").join("run.png"),
            ..config_in(dir.path(), 2)
        };

        let err = run(&config, &mut ScriptedGateway::ok(), &ProgressBar::hidden()).unwrap_err();
        assert!(matches!(err, BenchError::Render(_)));
        assert!(!config.csv_path.exists());
    }

    #[test]
    fn invalid_config_is_rejected_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let config = BenchConfig {
            gateway_url: "ftp://gateway.test".to_string(),
            ..config_in(dir.path(), 3)
        };
        let mut gateway = ScriptedGateway::ok();

        let err = run(&config, &mut gateway, &ProgressBar::hidden()).unwrap_err();
        assert!(matches!(err, BenchError::Config(_)));
        assert_eq!(gateway.calls, 0);
    }

    #[cfg(all(feature = "reqwest", feature = "resvg"))]
    #[test]
    fn end_to_end_against_mock_gateway() {
        use httpmock::{Method::GET, MockServer};

        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/0xe2e");
            then.status(200)
                .body("x".repeat(1024))
                .delay(Duration::from_millis(10));
        });

        let dir = tempfile::tempdir().unwrap();
        let config = BenchConfig {
            gateway_url: server.base_url(),
            transaction_id: "0xe2e".to_string(),
            request_count: 5,
            csv_path: dir.path().join("media").join("1kb.csv"),
            image_path: dir.path().join("media").join("1kb.png"),
            interactive_display: false,
        };

        run(&config, &mut HttpGateway, &ProgressBar::hidden()).unwrap();

        mock.assert_hits(5);
        let raw = fs::read_to_string(&config.csv_path).unwrap();
        assert_eq!(raw.lines().count(), 6);
        let rows = report::read_csv(&config.csv_path).unwrap();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.request, i + 1);
            assert!(
                row.elapsed_ms >= 10.0 && row.elapsed_ms < 2_000.0,
                "request {} took {} ms",
                row.request,
                row.elapsed_ms
            );
        }
        let png = fs::read(&config.image_path).unwrap();
        assert!(png.starts_with(b"\x89PNG"));
    }
}
