//! Expansion of dropped folders into concrete demo file lists.

use std::path::PathBuf;
use walkdir::WalkDir;

use super::classify::{absolute, PathClassifier};

/// Answer to the "scan folders recursively?" question.
///
/// The prompt itself belongs to the interactive surface; the core only
/// consumes the decision. `Cancel` aborts the entire ingestion call,
/// including any plain files collected alongside the folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionChoice {
    Recursive,
    TopLevelOnly,
    Cancel,
}

/// Enumerates demo files under dropped folders.
pub struct FolderExpander<'a> {
    classifier: &'a PathClassifier,
}

impl<'a> FolderExpander<'a> {
    pub fn new(classifier: &'a PathClassifier) -> Self {
        Self { classifier }
    }

    /// Returns an unordered flat list of absolute demo paths under the given
    /// folders. Unreadable entries are silently skipped.
    pub fn expand(&self, folders: &[PathBuf], recursive: bool) -> Vec<PathBuf> {
        let mut demos = Vec::new();
        for folder in folders {
            let mut walker = WalkDir::new(folder).follow_links(false);
            if !recursive {
                walker = walker.max_depth(1);
            }
            for entry in walker.into_iter().filter_map(Result::ok) {
                if entry.file_type().is_file() && self.classifier.is_demo_path(entry.path()) {
                    demos.push(absolute(entry.path()));
                }
            }
        }
        demos
    }
}
