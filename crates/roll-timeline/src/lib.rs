//! # roll-timeline
//!
//! Everything downstream of parsing for Rollcall:
//! - [`aggregate`] merges per-release credits into the contributor timeline
//! - [`stats`] reduces the timeline to counts, attrition, overlaps and flows
//! - [`store`] persists credits records, the timeline, and statistics as JSON

pub mod aggregate;
pub mod error;
pub mod stats;
pub mod store;

pub use aggregate::aggregate;
pub use error::TimelineError;
pub use stats::{
    AttritionEntry, ContributionBucket, FlowDiagram, FlowLink, FlowNode, LegacyOverlap,
    OverlapRegion, ReleaseGroups, Statistics, StatisticsReport, Transition, generate,
};
pub use store::{ProcessedStore, load_legacy};
