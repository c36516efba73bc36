//! Cross-document aggregation into the contributor timeline.

use roll_core::{ContributionTimeline, CreditsDocument, ReleaseCatalog};
use tracing::{debug, info};

/// Merge per-release credits into one contributor timeline.
///
/// Documents are visited in chronological order (catalog index, then release
/// id for releases the catalog does not know), so each contributor's releases
/// come out chronological. Documents sharing a release id merge into the same
/// entry in the order given.
#[must_use]
pub fn aggregate(documents: &[CreditsDocument], catalog: &ReleaseCatalog) -> ContributionTimeline {
    let mut ordered: Vec<&CreditsDocument> = documents.iter().collect();
    ordered.sort_by(|a, b| {
        catalog
            .chronological_key(&a.release)
            .cmp(&catalog.chronological_key(&b.release))
    });

    let mut timeline = ContributionTimeline::new();
    for document in ordered {
        if catalog.get(&document.release).is_none() {
            debug!(release = %document.release, "release not in catalog, ordered after known releases");
        }
        for (role, contributors) in &document.roles {
            for contributor in contributors {
                timeline.record(contributor, &document.release, role);
            }
        }
    }

    info!(
        documents = documents.len(),
        contributors = timeline.len(),
        "aggregated contribution timeline"
    );
    timeline
}
