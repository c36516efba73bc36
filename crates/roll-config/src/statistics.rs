//! Release groupings used by the statistics reductions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatisticsConfig {
    /// Early releases whose contributors count as "old timers".
    #[serde(default)]
    pub legacy_releases: Vec<String>,

    /// Releases whose contributors count as recent.
    #[serde(default)]
    pub recent_releases: Vec<String>,

    /// Releases compared in the membership overlap breakdown, in display order.
    #[serde(default)]
    pub overlap_releases: Vec<String>,

    /// Releases left out of attrition rates (too recent to judge, or the
    /// terminal node).
    #[serde(default)]
    pub attrition_excluded: Vec<String>,
}
