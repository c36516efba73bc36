use std::collections::BTreeSet;
use anyhow::Context;
use rayon::prelude::*;
use roll_config::RollConfig;
use roll_core::CreditsDocument;
use roll_parser::{CreditsEngine, CreditsSource, ParserError};
use roll_timeline::{ProcessedStore, load_legacy};
use serde::Serialize;
use tracing::{error, info};

use crate::cli::GlobalFlags;
use crate::commands::shared::{display_path, open_store};
use crate::discover::{DiscoveredSource, discover_sources};
use crate::output::output;
use crate::progress::Progress;

/// One written credits record.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedRelease {
    pub release: String,
    pub source: String,
    pub roles: usize,
    pub contributors: usize,
    pub output: String,
}

/// A credits file that could not be parsed.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessFailure {
    pub release: String,
    pub source: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessSummary {
    pub legacy: Vec<String>,
    pub processed: Vec<ProcessedRelease>,
    pub failures: Vec<ProcessFailure>,
}

/// Handle `rollcall process`.
pub fn handle(config: &RollConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let summary = execute(config)?;
    output(&summary, flags.format)?;
    summary.ensure_no_failures()
}

impl ProcessSummary {
    /// Fail once the summary is reported if any document failed.
    pub fn ensure_no_failures(&self) -> anyhow::Result<()> {
        if self.failures.is_empty() {
            return Ok(());
        }
        let releases: Vec<&str> = self.failures.iter().map(|f| f.release.as_str()).collect();
        anyhow::bail!(
            "{} credits document(s) failed to parse: {}",
            self.failures.len(),
            releases.join(", ")
        )
    }
}

/// Persist legacy credit sets, then parse and persist every discovered
/// credits file. Per-file failures are collected, not propagated.
pub fn execute(config: &RollConfig) -> anyhow::Result<ProcessSummary> {
    let store = open_store(config)?;

    let mut legacy = Vec::new();
    if let Some(dir) = config.general.legacy_dir() {
        let documents = load_legacy(dir, &config.policy)
            .with_context(|| format!("failed to load legacy credits from {}", dir.display()))?;
        for document in &documents {
            store.write_credits(document)?;
            legacy.push(document.release.clone());
        }
        info!(count = legacy.len(), "persisted legacy credit sets");
    }

    let supplied: BTreeSet<&str> = legacy.iter().map(String::as_str).collect();
    let sources: Vec<DiscoveredSource> = discover_sources(&config.general.games_dir)?
        .into_iter()
        .filter(|source| !supplied.contains(source.release.as_str()))
        .collect();

    let engine = CreditsEngine::new(&config.policy, &config.dialects);
    let progress = Progress::bar(sources.len() as u64, "parsing credits");
    let parse = |source: &DiscoveredSource| {
        let result = CreditsSource::read(&source.path)
            .and_then(|credits| engine.parse(&source.release, &credits));
        progress.inc(1);
        result
    };
    let results: Vec<Result<Vec<CreditsDocument>, ParserError>> = if config.general.parallel {
        sources.par_iter().map(parse).collect()
    } else {
        sources.iter().map(parse).collect()
    };

    let mut processed = Vec::new();
    let mut failures = Vec::new();
    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(documents) => {
                for document in documents {
                    processed.push(persist(&store, source, &document)?);
                }
            }
            Err(err) => {
                error!(
                    release = %source.release,
                    path = %source.path.display(),
                    error = %err,
                    "failed to parse credits"
                );
                failures.push(ProcessFailure {
                    release: source.release.clone(),
                    source: display_path(&source.path),
                    error: err.to_string(),
                });
            }
        }
    }

    if failures.is_empty() {
        progress.finish_ok("credits parsed");
    } else {
        progress.finish_err(&format!("{} credits file(s) failed", failures.len()));
    }

    Ok(ProcessSummary {
        legacy,
        processed,
        failures,
    })
}

fn persist(
    store: &ProcessedStore,
    source: &DiscoveredSource,
    document: &CreditsDocument,
) -> anyhow::Result<ProcessedRelease> {
    let path = store.write_credits(document)?;
    info!(
        release = %document.release,
        roles = document.role_count(),
        contributors = document.contributor_count(),
        "processed credits"
    );
    Ok(ProcessedRelease {
        release: document.release.clone(),
        source: display_path(&source.path),
        roles: document.role_count(),
        contributors: document.contributor_count(),
        output: display_path(&path),
    })
}
