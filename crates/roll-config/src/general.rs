//! General pipeline configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_games_dir() -> PathBuf {
    PathBuf::from("games")
}

fn default_processed_dir() -> PathBuf {
    PathBuf::from("processed")
}

const fn default_parallel() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory holding one sub-directory per release with its credits file.
    #[serde(default = "default_games_dir")]
    pub games_dir: PathBuf,

    /// Directory parsed credits, the timeline, and statistics are written to.
    #[serde(default = "default_processed_dir")]
    pub processed_dir: PathBuf,

    /// Directory of hand-entered `<release>_credits.json` sets. Empty disables it.
    #[serde(default)]
    pub legacy_dir: PathBuf,

    /// Parse documents on the rayon thread pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl GeneralConfig {
    /// Legacy directory, if one is configured.
    #[must_use]
    pub fn legacy_dir(&self) -> Option<&std::path::Path> {
        if self.legacy_dir.as_os_str().is_empty() {
            None
        } else {
            Some(&self.legacy_dir)
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            games_dir: default_games_dir(),
            processed_dir: default_processed_dir(),
            legacy_dir: PathBuf::new(),
            parallel: default_parallel(),
        }
    }
}
