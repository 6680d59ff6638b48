use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, preview::DEFAULT_TERMINAL_WIDTH, saver::DEFAULT_NAME};

/// Defaults for a viewing session; command-line flags take precedence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub rows: usize,
    pub cols: usize,
    pub output_dir: PathBuf,
    pub format: String,
    pub default_name: String,
    pub preview_width: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 5,
            output_dir: PathBuf::from("output"),
            format: "png".to_string(),
            default_name: DEFAULT_NAME.to_string(),
            preview_width: DEFAULT_TERMINAL_WIDTH,
        }
    }
}

/// Load a JSON configuration from disk, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<ViewerConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(ViewerConfig::default());
    };

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
