use anyhow::Context;
use roll_config::RollConfig;
use roll_timeline::{ProcessedStore, ReleaseGroups};

/// Open the processed-record directory named in `[general]`.
pub fn open_store(config: &RollConfig) -> anyhow::Result<ProcessedStore> {
    ProcessedStore::open(&config.general.processed_dir).with_context(|| {
        format!(
            "failed to open processed directory {}",
            config.general.processed_dir.display()
        )
    })
}

/// Statistics groups borrowed from `[statistics]`.
pub fn release_groups(config: &RollConfig) -> ReleaseGroups<'_> {
    ReleaseGroups {
        legacy: &config.statistics.legacy_releases,
        recent: &config.statistics.recent_releases,
        overlap: &config.statistics.overlap_releases,
        attrition_excluded: &config.statistics.attrition_excluded,
    }
}

/// Path as shown in command responses.
pub fn display_path(path: &std::path::Path) -> String {
    path.display().to_string()
}
