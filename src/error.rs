use std::path::PathBuf;

use thiserror::Error;

/// Error returned by a [`crate::gateway::Gateway`] when a GET cannot complete.
pub type FetchError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure kinds of a benchmark run. None of them are recovered locally.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("request {request} to {url} failed")]
    Network {
        request: usize,
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render chart: {0}")]
    Render(String),
}

impl BenchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: impl Into<std::io::Error>) -> Self {
        BenchError::Io {
            path: path.into(),
            source: source.into(),
        }
    }
}
