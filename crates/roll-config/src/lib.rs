//! # roll-config
//!
//! Layered configuration loading for Rollcall using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ROLLCALL_*` prefix, `__` as separator)
//! 2. An explicit config file (`rollcall --config <path>`)
//! 3. Project-level `.rollcall/config.toml`
//! 4. User-level `~/.config/rollcall/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ROLLCALL_GENERAL__GAMES_DIR` -> `general.games_dir`,
//! `ROLLCALL_GENERAL__PARALLEL` -> `general.parallel`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use roll_config::RollConfig;
//!
//! let config = RollConfig::load_with_dotenv(None).expect("config");
//! config.validate().expect("valid config");
//! let catalog = config.catalog().expect("catalog");
//! println!("{} releases configured", catalog.len());
//! ```

mod error;
mod general;
mod statistics;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use statistics::StatisticsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use roll_core::{DialectProfiles, InclusionPolicy, ReleaseCatalog, ReleaseMetadata, clean_name};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RollConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub policy: InclusionPolicy,
    #[serde(default)]
    pub releases: Vec<ReleaseMetadata>,
    #[serde(default)]
    pub dialects: DialectProfiles,
    #[serde(default)]
    pub statistics: StatisticsConfig,
}

impl RollConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    /// Returns [`ConfigError::Figment`] if a source cannot be read or merged.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(explicit).extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    /// Returns [`ConfigError::Figment`] if a source cannot be read or merged.
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".rollcall/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit --config file; a missing file is an error, not a skip
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("ROLLCALL_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rollcall").join("config.toml"))
    }

    /// Check cross-field invariants the parsers rely on.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some((label, first, second)) = self.policy.overlapping_labels().into_iter().next() {
            return Err(ConfigError::InvalidValue {
                field: "policy".into(),
                reason: format!("'{label}' is listed in both {first} and {second}"),
            });
        }

        for (alias, canonical) in &self.policy.aliases {
            if self.policy.aliases.contains_key(canonical) {
                return Err(ConfigError::InvalidValue {
                    field: format!("policy.aliases.{alias}"),
                    reason: format!("target '{canonical}' is itself an alias"),
                });
            }
            if clean_name(canonical) != *canonical {
                return Err(ConfigError::InvalidValue {
                    field: format!("policy.aliases.{alias}"),
                    reason: format!("target '{canonical}' is not a clean name"),
                });
            }
        }

        self.catalog()?;

        for release in self.dialects.size_coded.keys() {
            if self.dialects.style_coded.contains_key(release) {
                return Err(ConfigError::InvalidValue {
                    field: format!("dialects.{release}"),
                    reason: "release has both size_coded and style_coded profiles".into(),
                });
            }
        }

        Ok(())
    }

    /// Chronological catalog built from `[[releases]]`.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for duplicate ids, indices, or
    /// terminal entries.
    pub fn catalog(&self) -> Result<ReleaseCatalog, ConfigError> {
        ReleaseCatalog::new(self.releases.clone()).map_err(|error| ConfigError::InvalidValue {
            field: "releases".into(),
            reason: error.to_string(),
        })
    }
}
