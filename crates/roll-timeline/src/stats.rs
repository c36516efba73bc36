//! Statistics derived from the contributor timeline.
//!
//! Every reduction here is a pure function of the timeline and the release
//! catalog. Releases named by a timeline or a grouping must be catalogued;
//! the unknown id is reported otherwise.

use std::collections::{BTreeMap, BTreeSet};

use roll_core::{ContributionTimeline, ReleaseCatalog, ReleaseMetadata};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::TimelineError;

/// Upper bound on releases compared in [`release_overlap`].
pub const MAX_OVERLAP_RELEASES: usize = 8;

/// Release groups the reductions are parameterized over.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseGroups<'a> {
    /// Early releases whose contributors count as old timers.
    pub legacy: &'a [String],
    /// Releases whose contributors count as recent.
    pub recent: &'a [String],
    /// Releases compared region by region, in display order.
    pub overlap: &'a [String],
    /// Releases whose attrition rate is not computed.
    pub attrition_excluded: &'a [String],
}

// ---------------------------------------------------------------------------
// Contribution counts
// ---------------------------------------------------------------------------

/// Contributors credited on exactly `releases` releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContributionBucket {
    pub releases: usize,
    pub count: usize,
    pub contributors: Vec<String>,
}

/// One bucket per release count from `releases_evaluated` down to 1.
///
/// `releases_evaluated` is raised to the largest count seen so no contributor
/// falls outside a bucket. Contributors with no releases are not counted.
#[must_use]
pub fn contribution_counts(
    timeline: &ContributionTimeline,
    releases_evaluated: usize,
) -> Vec<ContributionBucket> {
    let largest = timeline
        .iter()
        .map(|(_, releases)| releases.len())
        .max()
        .unwrap_or_default();

    let mut buckets: Vec<ContributionBucket> = (1..=releases_evaluated.max(largest))
        .rev()
        .map(|releases| ContributionBucket {
            releases,
            count: 0,
            contributors: Vec::new(),
        })
        .collect();
    let top = buckets.len();

    for (contributor, releases) in timeline.iter() {
        let Some(bucket) = top
            .checked_sub(releases.len())
            .and_then(|index| buckets.get_mut(index))
        else {
            debug!(%contributor, "contributor has no releases, not counted");
            continue;
        };
        bucket.count += 1;
        bucket.contributors.push(contributor.clone());
    }
    buckets
}

// ---------------------------------------------------------------------------
// Attrition
// ---------------------------------------------------------------------------

/// How many contributors a release had and for how many it was their last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AttritionEntry {
    pub release: String,
    pub total: usize,
    #[serde(rename = "final")]
    pub final_count: usize,
    /// `final / total` as a percentage; absent for excluded or empty releases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

/// Per-release attrition over every catalogued release, in catalog order.
///
/// # Errors
/// Returns [`TimelineError::UnknownRelease`] if the timeline names a release
/// the catalog does not know.
pub fn attrition(
    timeline: &ContributionTimeline,
    catalog: &ReleaseCatalog,
    excluded: &[String],
) -> Result<Vec<AttritionEntry>, TimelineError> {
    let mut totals: BTreeMap<&str, (usize, usize)> = BTreeMap::new();

    for (_, releases) in timeline.iter() {
        for release in releases.keys() {
            require(catalog, release)?;
            totals.entry(release.as_str()).or_default().0 += 1;
        }
        if let Some(last) = releases.keys().next_back() {
            totals.entry(last.as_str()).or_default().1 += 1;
        }
    }

    Ok(catalog
        .iter()
        .map(|release| {
            let (total, final_count) = totals
                .get(release.id.as_str())
                .copied()
                .unwrap_or_default();
            let rate = (total > 0 && !excluded.contains(&release.id))
                .then(|| percentage(final_count, total));
            AttritionEntry {
                release: release.id.clone(),
                total,
                final_count,
                rate,
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Legacy / recent overlap
// ---------------------------------------------------------------------------

/// Recent contributors, and how many of them also worked on legacy releases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LegacyOverlap {
    pub recent_contributors: usize,
    pub remaining_old_timers: usize,
    /// Old timers as a percentage of recent contributors, rounded to 2 places.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

#[must_use]
pub fn legacy_overlap(
    timeline: &ContributionTimeline,
    groups: &ReleaseGroups<'_>,
) -> LegacyOverlap {
    let mut recent_contributors = 0;
    let mut remaining_old_timers = 0;

    for (_, releases) in timeline.iter() {
        let recent = releases.keys().any(|r| groups.recent.contains(r));
        if !recent {
            continue;
        }
        recent_contributors += 1;
        if releases.keys().any(|r| groups.legacy.contains(r)) {
            remaining_old_timers += 1;
        }
    }

    let percentage = (recent_contributors > 0).then(|| {
        (percentage(remaining_old_timers, recent_contributors) * 100.0).round() / 100.0
    });
    LegacyOverlap {
        recent_contributors,
        remaining_old_timers,
        percentage,
    }
}

// ---------------------------------------------------------------------------
// Release-set overlap
// ---------------------------------------------------------------------------

/// Contributors credited on exactly this combination of compared releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OverlapRegion {
    pub releases: Vec<String>,
    pub count: usize,
}

/// Count contributors per non-empty membership combination of `releases`.
///
/// Regions are ordered by membership bitmask with the first release as the
/// lowest bit, i.e. `A`, `B`, `AB`, `C`, `AC`, `BC`, `ABC` for three releases.
///
/// # Errors
/// Returns [`TimelineError::UnknownRelease`] for an uncatalogued release and
/// [`TimelineError::InvalidGrouping`] for duplicates or more than
/// [`MAX_OVERLAP_RELEASES`] releases.
pub fn release_overlap(
    timeline: &ContributionTimeline,
    catalog: &ReleaseCatalog,
    releases: &[String],
) -> Result<Vec<OverlapRegion>, TimelineError> {
    if releases.len() > MAX_OVERLAP_RELEASES {
        return Err(TimelineError::InvalidGrouping(format!(
            "at most {MAX_OVERLAP_RELEASES} overlap releases are supported, got {}",
            releases.len()
        )));
    }
    let mut seen = BTreeSet::new();
    for release in releases {
        require(catalog, release)?;
        if !seen.insert(release) {
            return Err(TimelineError::InvalidGrouping(format!(
                "overlap release '{release}' is listed twice"
            )));
        }
    }

    let mut counts = vec![0usize; 1 << releases.len()];
    for (_, credited) in timeline.iter() {
        let mask = releases
            .iter()
            .enumerate()
            .filter(|(_, release)| credited.contains_key(release.as_str()))
            .fold(0usize, |mask, (bit, _)| mask | (1 << bit));
        counts[mask] += 1;
    }

    Ok((1..counts.len())
        .map(|mask| OverlapRegion {
            releases: releases
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, release)| release.clone())
                .collect(),
            count: counts[mask],
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Contributors moving from one release to the next one they were credited on.
///
/// `target` is `None` for the "no next release" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Transition {
    pub source: u32,
    pub target: Option<u32>,
    pub count: usize,
}

/// Count consecutive release pairs per contributor, plus a final pair from
/// each contributor's last release to the sentinel. Sorted by pair, with the
/// sentinel before any real target.
///
/// # Errors
/// Returns [`TimelineError::UnknownRelease`] if the timeline names a release
/// the catalog does not know.
pub fn transitions(
    timeline: &ContributionTimeline,
    catalog: &ReleaseCatalog,
) -> Result<Vec<Transition>, TimelineError> {
    let mut buckets: BTreeMap<(u32, Option<u32>), usize> = BTreeMap::new();

    for (_, releases) in timeline.iter() {
        let mut previous: Option<u32> = None;
        for release in releases.keys() {
            let current = require(catalog, release)?.index;
            if let Some(source) = previous {
                *buckets.entry((source, Some(current))).or_default() += 1;
            }
            previous = Some(current);
        }
        if let Some(last) = previous {
            *buckets.entry((last, None)).or_default() += 1;
        }
    }

    debug!(pairs = buckets.len(), "counted release transitions");
    Ok(buckets
        .into_iter()
        .map(|((source, target), count)| Transition {
            source,
            target,
            count,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Flow diagram
// ---------------------------------------------------------------------------

/// One release node of the flow diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FlowNode {
    pub release: String,
    pub label: String,
    pub color: String,
    pub x: f64,
    pub y: f64,
}

/// A weighted link between two node positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FlowLink {
    pub source: usize,
    pub target: usize,
    pub value: usize,
    /// Color of the source node.
    pub color: String,
}

/// Node and link lists for a flow (Sankey) chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FlowDiagram {
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowLink>,
}

impl FlowDiagram {
    /// Lay out `transitions` over the catalog.
    ///
    /// Node positions follow catalog order. Links ending at the sentinel
    /// point at the terminal release.
    ///
    /// # Errors
    /// Returns [`TimelineError::UnknownRelease`] for a transition index not in
    /// the catalog and [`TimelineError::InvalidGrouping`] if a sentinel link
    /// exists but no terminal release is configured.
    pub fn build(
        transitions: &[Transition],
        catalog: &ReleaseCatalog,
    ) -> Result<Self, TimelineError> {
        let releases: Vec<&ReleaseMetadata> = catalog.iter().collect();
        let position = |index: u32| {
            releases
                .iter()
                .position(|release| release.index == index)
                .ok_or_else(|| TimelineError::UnknownRelease(format!("#{index}")))
        };

        let links = transitions
            .iter()
            .map(|transition| {
                let source = position(transition.source)?;
                let target = match transition.target {
                    Some(index) => position(index)?,
                    None => {
                        let terminal = catalog.terminal().ok_or_else(|| {
                            TimelineError::InvalidGrouping(
                                "no terminal release configured for the flow diagram".into(),
                            )
                        })?;
                        position(terminal.index)?
                    }
                };
                Ok(FlowLink {
                    source,
                    target,
                    value: transition.count,
                    color: releases[source].color.clone(),
                })
            })
            .collect::<Result<Vec<_>, TimelineError>>()?;

        let nodes = releases
            .iter()
            .map(|release| FlowNode {
                release: release.id.clone(),
                label: release.label.clone(),
                color: release.color.clone(),
                x: release.x,
                y: release.y,
            })
            .collect();

        Ok(Self { nodes, links })
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// The `statistics.json` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Statistics {
    pub releases_evaluated: usize,
    pub contributors: usize,
    pub attrition: Vec<AttritionEntry>,
    pub legacy_overlap: LegacyOverlap,
    pub release_overlap: Vec<OverlapRegion>,
}

/// Every reduction over one timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsReport {
    pub contribution_counts: Vec<ContributionBucket>,
    pub transitions: Vec<Transition>,
    pub flow_diagram: FlowDiagram,
    pub statistics: Statistics,
}

/// Run every reduction.
///
/// # Errors
/// Propagates the first error from [`attrition`], [`release_overlap`],
/// [`transitions`], or [`FlowDiagram::build`].
pub fn generate(
    timeline: &ContributionTimeline,
    catalog: &ReleaseCatalog,
    groups: &ReleaseGroups<'_>,
    releases_evaluated: usize,
) -> Result<StatisticsReport, TimelineError> {
    let transitions = transitions(timeline, catalog)?;
    let flow_diagram = FlowDiagram::build(&transitions, catalog)?;
    let statistics = Statistics {
        releases_evaluated,
        contributors: timeline.len(),
        attrition: attrition(timeline, catalog, groups.attrition_excluded)?,
        legacy_overlap: legacy_overlap(timeline, groups),
        release_overlap: release_overlap(timeline, catalog, groups.overlap)?,
    };

    info!(
        contributors = statistics.contributors,
        recent = statistics.legacy_overlap.recent_contributors,
        old_timers = statistics.legacy_overlap.remaining_old_timers,
        "generated statistics"
    );
    Ok(StatisticsReport {
        contribution_counts: contribution_counts(timeline, releases_evaluated),
        transitions,
        flow_diagram,
        statistics,
    })
}

fn require<'c>(
    catalog: &'c ReleaseCatalog,
    release: &str,
) -> Result<&'c ReleaseMetadata, TimelineError> {
    catalog
        .get(release)
        .ok_or_else(|| TimelineError::UnknownRelease(release.to_string()))
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64 * 100.0
}
