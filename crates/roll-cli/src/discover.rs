//! Credits file discovery under the games directory.
//!
//! Layout is `<games_dir>/<release>/credits.txt` or `credits.xml`. Every file
//! is visited, hidden or ignored, so release folders never need a `.gitignore`
//! exemption.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use ignore::WalkBuilder;
use tracing::{debug, warn};

const CREDITS_FILES: [&str; 2] = ["credits.txt", "credits.xml"];

/// One credits file and the release it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredSource {
    pub release: String,
    pub path: PathBuf,
}

/// Find every release's credits file, sorted by release id.
///
/// A release with both a plain-text and a markup file keeps the markup one.
pub fn discover_sources(games_dir: &Path) -> anyhow::Result<Vec<DiscoveredSource>> {
    anyhow::ensure!(
        games_dir.is_dir(),
        "games directory '{}' does not exist",
        games_dir.display()
    );

    let mut builder = WalkBuilder::new(games_dir);
    builder.standard_filters(false);
    builder.hidden(false);
    builder.max_depth(Some(2));

    let mut paths = Vec::new();
    for entry in builder.build() {
        let entry = entry.with_context(|| format!("failed to walk {}", games_dir.display()))?;
        if entry.depth() != 2 || !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let is_credits = entry
            .file_name()
            .to_str()
            .is_some_and(|name| CREDITS_FILES.iter().any(|c| name.eq_ignore_ascii_case(c)));
        if is_credits {
            paths.push(entry.into_path());
        }
    }
    paths.sort();

    let mut by_release: BTreeMap<String, PathBuf> = BTreeMap::new();
    for path in paths {
        let Some(release) = path
            .parent()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
            .map(str::to_string)
        else {
            continue;
        };
        debug!(%release, path = %path.display(), "discovered credits");
        if let Some(existing) = by_release.get(&release) {
            let (kept, skipped) = if is_markup(&path) {
                (path, existing.clone())
            } else {
                (existing.clone(), path)
            };
            warn!(
                %release,
                kept = %kept.display(),
                skipped = %skipped.display(),
                "release has two credits files, using the markup one"
            );
            by_release.insert(release, kept);
        } else {
            by_release.insert(release, path);
        }
    }

    Ok(by_release
        .into_iter()
        .map(|(release, path)| DiscoveredSource { release, path })
        .collect())
}

fn is_markup(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}
