//! Icon lookup in the bundled icon tree.
//!
//! Rendered SVGs reference icons by bare file name, so lookup walks the whole
//! tree under the icon root. Entries are visited in file-name order, which
//! makes the winner deterministic if a name appears twice.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::cfn::ResourceRegistry;

/// Find `filename` anywhere under `root`.
///
/// Returns `None` for names that could escape the tree (separators, `..`)
/// and when nothing under `root` matches.
pub async fn find_icon(root: &Path, filename: &str) -> Option<PathBuf> {
    if !is_plain_file_name(filename) {
        return None;
    }
    let root = root.to_path_buf();
    let filename = filename.to_owned();
    tokio::task::spawn_blocking(move || search(&root, &filename))
        .await
        .ok()
        .flatten()
}

/// Registry icons (as `category/file`) that are not present under `root`.
#[must_use]
pub fn missing_icons(root: &Path, registry: &ResourceRegistry) -> Vec<String> {
    let mut missing: Vec<String> = registry
        .kinds()
        .map(|kind| kind.icon_path())
        .filter(|icon| !root.join(icon).is_file())
        .collect();
    missing.sort();
    missing.dedup();
    missing
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && !name.contains("..") && !name.contains(['/', '\\', '\0'])
}

fn search(root: &Path, filename: &str) -> Option<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(root = %root.display(), error = %e, "icon tree entry unreadable");
                None
            }
        })
        .find(|entry| entry.file_type().is_file() && entry.file_name() == filename)
        .map(walkdir::DirEntry::into_path)
}

#[cfg(test)]
#[path = "icons_test.rs"]
mod tests;
