//! Benchmark configuration, loaded from an optional TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BenchError;

pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.wvm.dev";
pub const DEFAULT_TRANSACTION_ID: &str =
    "0xe14258b89ff9de351f046ada91e6aeb47842a6860dc1f79197e918334866eb87";
pub const DEFAULT_REQUEST_COUNT: usize = 50;

/// Everything a run needs. Keys missing from a config file keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Base endpoint, e.g. `https://gateway.wvm.dev`.
    pub gateway_url: String,
    /// Path segment appended to the gateway URL.
    pub transaction_id: String,
    /// Number of sequential GETs.
    pub request_count: usize,
    pub csv_path: PathBuf,
    /// `.svg` writes the vector chart, anything else a PNG.
    pub image_path: PathBuf,
    /// Open the rendered chart in the platform image viewer.
    pub interactive_display: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            transaction_id: DEFAULT_TRANSACTION_ID.to_string(),
            request_count: DEFAULT_REQUEST_COUNT,
            csv_path: PathBuf::from("media/1kb.csv"),
            image_path: PathBuf::from("media/1kb.png"),
            interactive_display: true,
        }
    }
}

impl BenchConfig {
    /// Reads and validates a TOML config file.
    pub fn load(path: &Path) -> Result<Self, BenchError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            BenchError::Config(format!("failed to read `{}`: {e}", path.display()))
        })?;
        let config: BenchConfig = toml::from_str(&raw).map_err(|e| {
            BenchError::Config(format!("failed to parse `{}`: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        let url = self.gateway_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(BenchError::Config(format!(
                "gateway_url must start with http:// or https://, got `{}`",
                self.gateway_url
            )));
        }
        if self.csv_path.as_os_str().is_empty() {
            return Err(BenchError::Config("csv_path cannot be empty".to_string()));
        }
        if self.image_path.as_os_str().is_empty() {
            return Err(BenchError::Config("image_path cannot be empty".to_string()));
        }
        Ok(())
    }

    /// `{gateway_url}/{transaction_id}` without doubling the separator.
    pub fn target_url(&self) -> String {
        format!(
            "{}/{}",
            self.gateway_url.trim().trim_end_matches('/'),
            self.transaction_id.trim().trim_start_matches('/')
        )
    }

    pub fn to_toml(&self) -> Result<String, BenchError> {
        toml::to_string_pretty(self)
            .map_err(|e| BenchError::Config(format!("failed to serialize config: {e}")))
    }
}
