use roll_config::RollConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::aggregate::{self, AggregateResponse};
use crate::commands::process::{self, ProcessSummary};
use crate::commands::stats::{self, StatsResponse};
use crate::output::output;

#[derive(Debug, Clone, Serialize)]
pub struct RunResponse {
    pub process: ProcessSummary,
    pub aggregate: AggregateResponse,
    pub stats: StatsResponse,
}

/// Handle `rollcall run`.
pub fn handle(config: &RollConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = execute(config)?;
    output(&response, flags.format)?;
    response.process.ensure_no_failures()
}

/// The whole pipeline. Documents that fail to parse are left out of the
/// timeline; the failure is still reported.
pub fn execute(config: &RollConfig) -> anyhow::Result<RunResponse> {
    let process = process::execute(config)?;
    let aggregate = aggregate::execute(config)?;
    let stats = stats::execute(config)?;
    Ok(RunResponse {
        process,
        aggregate,
        stats,
    })
}
