use anyhow::Context;
use roll_config::RollConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, layer every configuration source, and validate the result.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<RollConfig> {
    let config = RollConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load rollcall configuration")?;
    config
        .validate()
        .context("rollcall configuration is invalid")?;

    tracing::debug!(
        releases = config.releases.len(),
        games_dir = %config.general.games_dir.display(),
        "configuration loaded"
    );
    Ok(config)
}
