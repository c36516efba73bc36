//! JSON persistence of processed records.
//!
//! One directory holds every artifact: `<release>_credits.json` per parsed
//! document, the timeline, and the statistics files. Records are written with
//! four-space indentation as UTF-8.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use roll_core::{ContributionTimeline, CreditsDocument, InclusionPolicy, RoleMap};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::error::TimelineError;
use crate::stats::StatisticsReport;

/// Suffix of a persisted per-release credits record.
pub const CREDITS_SUFFIX: &str = "_credits.json";

pub const TIMELINE_FILE: &str = "developer_contributions.json";
pub const CONTRIBUTION_COUNTS_FILE: &str = "contribution_counts.json";
pub const TRANSITIONS_FILE: &str = "transition_buckets.json";
pub const STATISTICS_FILE: &str = "statistics.json";
pub const FLOW_DIAGRAM_FILE: &str = "flow_diagram.json";

/// Reads and writes processed records under one directory.
#[derive(Debug, Clone)]
pub struct ProcessedStore {
    root: PathBuf,
}

impl ProcessedStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns [`TimelineError::Io`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, TimelineError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| TimelineError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the credits record for `release`.
    #[must_use]
    pub fn credits_path(&self, release: &str) -> PathBuf {
        self.root.join(format!("{release}{CREDITS_SUFFIX}"))
    }

    /// Persist a document's role map as `<release>_credits.json`.
    ///
    /// # Errors
    /// Returns [`TimelineError::Io`] or [`TimelineError::Json`] on write failure.
    pub fn write_credits(&self, document: &CreditsDocument) -> Result<PathBuf, TimelineError> {
        let path = self.credits_path(&document.release);
        write_json(&path, &document.roles)?;
        debug!(release = %document.release, path = %path.display(), "wrote credits record");
        Ok(path)
    }

    /// Load one persisted credits record.
    ///
    /// # Errors
    /// Returns [`TimelineError::Io`] if the record is missing or unreadable and
    /// [`TimelineError::Json`] if it is not a role map.
    pub fn load_release(&self, release: &str) -> Result<CreditsDocument, TimelineError> {
        let roles: RoleMap = read_json(&self.credits_path(release))?;
        Ok(CreditsDocument::from_role_map(release, roles))
    }

    /// Load every `*_credits.json` record in the store, sorted by release id.
    ///
    /// # Errors
    /// Returns the first read or decode failure.
    pub fn load_credits(&self) -> Result<Vec<CreditsDocument>, TimelineError> {
        credit_records(&self.root)?
            .into_iter()
            .map(|(release, path)| {
                let roles: RoleMap = read_json(&path)?;
                Ok(CreditsDocument::from_role_map(release, roles))
            })
            .collect()
    }

    /// # Errors
    /// Returns [`TimelineError::Io`] or [`TimelineError::Json`] on write failure.
    pub fn write_timeline(&self, timeline: &ContributionTimeline) -> Result<PathBuf, TimelineError> {
        let path = self.root.join(TIMELINE_FILE);
        write_json(&path, timeline)?;
        Ok(path)
    }

    /// # Errors
    /// Returns [`TimelineError::Io`] or [`TimelineError::Json`] on read failure.
    pub fn load_timeline(&self) -> Result<ContributionTimeline, TimelineError> {
        read_json(&self.root.join(TIMELINE_FILE))
    }

    /// Write the four statistics files, returning their paths.
    ///
    /// # Errors
    /// Returns the first write failure.
    pub fn write_report(&self, report: &StatisticsReport) -> Result<Vec<PathBuf>, TimelineError> {
        let files = [
            (
                CONTRIBUTION_COUNTS_FILE,
                serde_json::to_value(&report.contribution_counts),
            ),
            (TRANSITIONS_FILE, serde_json::to_value(&report.transitions)),
            (STATISTICS_FILE, serde_json::to_value(&report.statistics)),
            (FLOW_DIAGRAM_FILE, serde_json::to_value(&report.flow_diagram)),
        ];

        files
            .into_iter()
            .map(|(name, value)| {
                let path = self.root.join(name);
                let value = value.map_err(|source| TimelineError::Json {
                    path: path.clone(),
                    source,
                })?;
                write_json(&path, &value)?;
                Ok(path)
            })
            .collect()
    }
}

/// Load hand-entered credit sets from `<dir>/<release>_credits.json`.
///
/// Excluded roles are dropped; names are taken as already canonical.
///
/// # Errors
/// Returns the first read or decode failure.
pub fn load_legacy(
    dir: &Path,
    policy: &InclusionPolicy,
) -> Result<Vec<CreditsDocument>, TimelineError> {
    credit_records(dir)?
        .into_iter()
        .map(|(release, path)| {
            let roles: RoleMap = read_json(&path)?;
            debug!(%release, "loaded legacy credits");
            Ok(CreditsDocument::from_hand_entered(release, roles, policy))
        })
        .collect()
}

/// `(release, path)` for each credits record directly under `dir`, sorted.
fn credit_records(dir: &Path) -> Result<Vec<(String, PathBuf)>, TimelineError> {
    let io_error = |source| TimelineError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut records = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let Some(release) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(CREDITS_SUFFIX))
            .filter(|release| !release.is_empty())
            .map(str::to_string)
        else {
            continue;
        };
        if path.is_file() {
            records.push((release, path));
        }
    }
    records.sort();
    Ok(records)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), TimelineError> {
    let io_error = |source| TimelineError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .map_err(|source| TimelineError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    writer.write_all(b"\n").map_err(io_error)?;
    writer.flush().map_err(io_error)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, TimelineError> {
    let file = File::open(path).map_err(|source| TimelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| TimelineError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use roll_core::CreditsBuilder;

    fn document() -> CreditsDocument {
        let mut builder = CreditsBuilder::new("2004_rome");
        builder.add("Programming", "Bob Jones");
        builder.add("Programming", "Alice Smith");
        builder.add("Art", "Eve Adams");
        builder.finish()
    }

    #[test]
    fn credits_record_is_a_four_space_role_map() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProcessedStore::open(dir.path()).expect("store");

        let path = store.write_credits(&document()).expect("write");
        assert_eq!(path, dir.path().join("2004_rome_credits.json"));

        let text = fs::read_to_string(&path).expect("read back");
        assert!(text.starts_with("{\n    \"Programming\": [\n        \"Alice Smith\""));
        assert_eq!(store.load_release("2004_rome").expect("load"), document());
    }

    #[test]
    fn load_credits_skips_other_files_and_sorts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProcessedStore::open(dir.path()).expect("store");

        let mut later = document();
        later.release = "2009_empire".into();
        store.write_credits(&later).expect("write");
        store.write_credits(&document()).expect("write");
        store
            .write_timeline(&ContributionTimeline::new())
            .expect("timeline");

        let releases: Vec<String> = store
            .load_credits()
            .expect("load")
            .into_iter()
            .map(|doc| doc.release)
            .collect();
        assert_eq!(releases, vec!["2004_rome", "2009_empire"]);
    }

    #[test]
    fn legacy_sets_drop_excluded_roles() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("2000_shogun_credits.json"),
            r#"{"Special Thanks": ["Someone"], "Programming": ["Zed", "Amy"]}"#,
        )
        .expect("write legacy");
        let policy = InclusionPolicy {
            excluded_roles: ["Special Thanks".to_string()].into(),
            ..InclusionPolicy::default()
        };

        let docs = load_legacy(dir.path(), &policy).expect("legacy");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].release, "2000_shogun");
        assert_eq!(
            docs[0].contributors("Programming"),
            Some(&["Amy".to_string(), "Zed".to_string()][..])
        );
        assert_eq!(docs[0].role_count(), 1);
    }

    #[test]
    fn malformed_record_names_its_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProcessedStore::open(dir.path()).expect("store");
        fs::write(store.credits_path("broken"), "[1, 2]").expect("write");

        match store.load_credits() {
            Err(TimelineError::Json { path, .. }) => {
                assert_eq!(path, store.credits_path("broken"));
            }
            other => panic!("expected Json error, got {other:?}"),
        }
    }

    #[test]
    fn missing_timeline_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProcessedStore::open(dir.path().join("nested")).expect("store");
        assert!(matches!(
            store.load_timeline(),
            Err(TimelineError::Io { .. })
        ));
    }
}
