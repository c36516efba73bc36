//! Timeline error types for roll-timeline.

use std::path::PathBuf;

/// Errors from aggregation, statistics, and the processed store.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("Release '{0}' is not in the release catalog")]
    UnknownRelease(String),

    #[error("Invalid release grouping: {0}")]
    InvalidGrouping(String),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
