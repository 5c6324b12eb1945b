use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::TopperAssets;
use crate::errors::ConfigError;
use crate::gateway::SubmitOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub schema_version: String,
    /// Backend generation endpoint receiving the multipart payload.
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
    /// Artifacts land under `<output_root>/.icecraft/runs/<run id>`.
    pub output_root: String,
    pub topper_assets: TopperAssets,
    pub submit: SubmitOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: "2026-10-01".into(),
            endpoint: Some("http://localhost:8000/api/generate".into()),
            timeout_secs: 120,
            output_root: ".".into(),
            topper_assets: TopperAssets::default(),
            submit: SubmitOptions::default(),
        }
    }
}

impl Config {
    /// Read a TOML config. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}
