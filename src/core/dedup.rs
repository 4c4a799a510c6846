//! Case-insensitive path deduplication and the collection of known demos.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::classify::absolute;
use crate::parser::DemoInfo;

/// Normalized identity of a demo path: canonicalized where possible (falling
/// back to the lexically absolute form for paths that no longer exist), then
/// lowercased for case-insensitive comparison.
pub fn path_key(path: &Path) -> String {
    let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| absolute(path));
    resolved.to_string_lossy().to_lowercase()
}

/// Keeps only candidates not already known, and drops repeats within the
/// batch itself. Pure with respect to `known`; candidate order is preserved.
pub fn filter_new(candidates: Vec<PathBuf>, known: &DemoCollection) -> Vec<PathBuf> {
    let mut seen_in_batch = HashSet::new();
    candidates
        .into_iter()
        .filter(|path| {
            let key = path_key(path);
            !known.contains_key(&key) && seen_in_batch.insert(key)
        })
        .collect()
}

/// Demos already ingested during this session.
///
/// Owned and mutated by the interactive context only; the worker reports
/// results over the event bridge and never touches this collection. A
/// normalized-key index keeps membership checks O(1).
#[derive(Debug, Default)]
pub struct DemoCollection {
    demos: Vec<DemoInfo>,
    keys: HashSet<String>,
}

impl DemoCollection {
    pub fn contains(&self, path: &Path) -> bool {
        self.contains_key(&path_key(path))
    }

    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Appends a parsed demo. Returns `false` (and keeps the collection
    /// unchanged) if a demo with the same normalized path is already present.
    pub fn add(&mut self, info: DemoInfo) -> bool {
        let key = path_key(&info.file_path);
        if !self.keys.insert(key) {
            tracing::warn!(path = %info.file_path.display(), "dropping duplicate demo");
            return false;
        }
        self.demos.push(info);
        true
    }

    /// Removes a demo by list position, e.g. from a user-initiated delete.
    pub fn remove_at(&mut self, index: usize) -> Option<DemoInfo> {
        if index >= self.demos.len() {
            return None;
        }
        let info = self.demos.remove(index);
        self.keys.remove(&path_key(&info.file_path));
        Some(info)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DemoInfo> {
        self.demos.iter()
    }

    pub fn get(&self, index: usize) -> Option<&DemoInfo> {
        self.demos.get(index)
    }

    pub fn len(&self) -> usize {
        self.demos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Protocol;
    use proptest::prelude::*;

    fn info(path: &str) -> DemoInfo {
        DemoInfo {
            file_path: PathBuf::from(path),
            protocol: Protocol::from_path(Path::new(path)),
        }
    }

    #[test]
    fn known_paths_are_filtered_case_insensitively() {
        let mut known = DemoCollection::default();
        known.add(info("/demos/Match.dm_68"));

        let candidates = vec![
            PathBuf::from("/demos/MATCH.DM_68"),
            PathBuf::from("/demos/other.dm_68"),
        ];
        let fresh = filter_new(candidates, &known);
        assert_eq!(fresh, vec![PathBuf::from("/demos/other.dm_68")]);
    }

    #[test]
    fn in_batch_repeats_are_dropped() {
        let known = DemoCollection::default();
        let candidates = vec![
            PathBuf::from("/demos/a.dm_68"),
            PathBuf::from("/demos/A.dm_68"),
            PathBuf::from("/demos/b.dm_68"),
        ];
        let fresh = filter_new(candidates, &known);
        assert_eq!(fresh.len(), 2);
    }

    #[test]
    fn add_rejects_duplicate_demos() {
        let mut collection = DemoCollection::default();
        assert!(collection.add(info("/demos/final.dm_90")));
        assert!(!collection.add(info("/demos/FINAL.dm_90")));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn remove_at_frees_the_path_for_reingestion() {
        let mut collection = DemoCollection::default();
        collection.add(info("/demos/a.dm_68"));
        collection.add(info("/demos/b.dm_73"));

        let removed = collection.remove_at(0).unwrap();
        assert_eq!(removed.file_path, PathBuf::from("/demos/a.dm_68"));
        assert_eq!(collection.len(), 1);
        assert!(!collection.contains(Path::new("/demos/a.dm_68")));
        assert!(collection.add(info("/demos/a.dm_68")));

        assert!(collection.remove_at(5).is_none());
    }

    proptest! {
        /// No two entries may ever share a normalized key, regardless of the
        /// casing games played by the inputs.
        #[test]
        fn collection_never_holds_case_colliding_paths(
            names in proptest::collection::vec("[a-zA-Z]{1,8}", 1..12)
        ) {
            let mut collection = DemoCollection::default();
            for name in &names {
                collection.add(info(&format!("/demos/{}.dm_68", name)));
            }

            let mut keys = HashSet::new();
            for demo in collection.iter() {
                prop_assert!(keys.insert(path_key(&demo.file_path)));
            }
        }
    }
}
