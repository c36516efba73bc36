use anyhow::Context;
use roll_config::RollConfig;
use roll_timeline::aggregate;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::{display_path, open_store};
use crate::output::output;

#[derive(Debug, Clone, Serialize)]
pub struct AggregateResponse {
    pub documents: usize,
    pub releases: usize,
    pub contributors: usize,
    pub output: String,
}

/// Handle `rollcall aggregate`.
pub fn handle(config: &RollConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = execute(config)?;
    output(&response, flags.format)
}

/// Load every processed credits record and write the contributor timeline.
pub fn execute(config: &RollConfig) -> anyhow::Result<AggregateResponse> {
    let store = open_store(config)?;
    let catalog = config.catalog()?;

    let documents = store
        .load_credits()
        .context("failed to load processed credits")?;
    anyhow::ensure!(
        !documents.is_empty(),
        "no processed credits in {}; run `rollcall process` first",
        store.root().display()
    );

    let timeline = aggregate(&documents, &catalog);
    let path = store.write_timeline(&timeline)?;

    Ok(AggregateResponse {
        documents: documents.len(),
        releases: timeline.release_ids().len(),
        contributors: timeline.len(),
        output: display_path(&path),
    })
}
