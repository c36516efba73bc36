use anyhow::Context;
use roll_config::RollConfig;
use roll_core::CreditsDocument;
use roll_parser::{CreditsEngine, CreditsSource};
use serde::Serialize;

use crate::cli::{GlobalFlags, ParseArgs};
use crate::output::output;

#[derive(Debug, Clone, Serialize)]
pub struct ParseResponse {
    pub release: String,
    pub format: String,
    pub documents: Vec<CreditsDocument>,
}

/// Handle `rollcall parse <path>`.
pub fn handle(args: &ParseArgs, config: &RollConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let release = match &args.release {
        Some(release) => release.clone(),
        None => args
            .path
            .parent()
            .and_then(std::path::Path::file_name)
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .context("cannot infer the release id from the path; pass --release")?,
    };

    let source = CreditsSource::read(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let engine = CreditsEngine::new(&config.policy, &config.dialects);
    let format = engine.format_of(&release, &source);
    let documents = engine
        .parse(&release, &source)
        .with_context(|| format!("failed to parse {} as {format}", args.path.display()))?;

    output(
        &ParseResponse {
            release,
            format: format.to_string(),
            documents,
        },
        flags.format,
    )
}
