use anyhow::Context;
use chrono::{DateTime, Utc};
use roll_config::RollConfig;
use roll_timeline::{Statistics, generate};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::{display_path, open_store, release_groups};
use crate::output::output;

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub generated_at: DateTime<Utc>,
    pub files: Vec<String>,
    pub statistics: Statistics,
}

/// Handle `rollcall stats`.
pub fn handle(config: &RollConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = execute(config)?;
    output(&response, flags.format)
}

/// Reduce the stored timeline to the statistics files.
pub fn execute(config: &RollConfig) -> anyhow::Result<StatsResponse> {
    let store = open_store(config)?;
    let catalog = config.catalog()?;
    let timeline = store
        .load_timeline()
        .context("failed to load the contributor timeline; run `rollcall aggregate` first")?;

    let releases_evaluated = timeline.release_ids().len();
    let report = generate(&timeline, &catalog, &release_groups(config), releases_evaluated)
        .context("failed to generate statistics")?;
    let files = store.write_report(&report)?;

    Ok(StatsResponse {
        generated_at: Utc::now(),
        files: files.iter().map(|path| display_path(path)).collect(),
        statistics: report.statistics,
    })
}
