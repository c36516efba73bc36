use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Discover and parse every credits file, writing one record per release.
    Process,
    /// Merge processed credits into the contributor timeline.
    Aggregate,
    /// Derive statistics from the contributor timeline.
    Stats,
    /// Process, aggregate, and derive statistics in one go.
    Run,
    /// Parse a single credits file and print the result.
    Parse(ParseArgs),
    /// Print the JSON Schema of a persisted record.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ParseArgs {
    /// Path to a `credits.txt` or `credits.xml` file.
    pub path: PathBuf,

    /// Release id (defaults to the parent directory name).
    #[arg(short, long)]
    pub release: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Record type to describe.
    #[arg(value_enum)]
    pub kind: SchemaKind,
}

/// Persisted record types with a published schema.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaKind {
    /// `<release>_credits.json`
    Credits,
    /// `developer_contributions.json`
    Timeline,
    /// `statistics.json`
    Statistics,
    /// `transition_buckets.json`
    Transitions,
}
