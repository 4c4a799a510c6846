//! Classification of raw user inputs into demo files, folders and noise.

use std::path::{Path, PathBuf};

/// What a single raw input turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathKind {
    /// An existing file with a supported demo extension, as an absolute path.
    Demo(PathBuf),
    /// An existing directory, as an absolute path.
    Folder(PathBuf),
    /// Anything else: missing paths, unsupported extensions, unreadable input.
    Ignored,
}

/// Resolves shortcut indirections and filters inputs by the supported
/// demo-extension set.
pub struct PathClassifier {
    extensions: Vec<String>,
}

impl PathClassifier {
    /// Extensions are normalized to lowercase without the leading dot, so
    /// both `"dm_68"` and `".DM_68"` configure the same filter.
    pub fn new(demo_extensions: &[String]) -> Self {
        let extensions = demo_extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect();
        Self { extensions }
    }

    pub fn is_demo_path(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|known| *known == ext)
            }
            None => false,
        }
    }

    /// Classifies one raw input. Only filesystem existence checks are
    /// performed; nothing is mutated. Unreadable or missing paths are
    /// silently dropped as [`PathKind::Ignored`].
    pub fn classify(&self, raw: &Path) -> PathKind {
        let path = resolve_shortcut(raw);
        if path.is_file() && self.is_demo_path(&path) {
            PathKind::Demo(absolute(&path))
        } else if path.is_dir() {
            PathKind::Folder(absolute(&path))
        } else {
            PathKind::Ignored
        }
    }

    /// One-pass split of raw inputs into demo files and folders, dropping
    /// everything else.
    pub fn partition(&self, raw_inputs: &[PathBuf]) -> (Vec<PathBuf>, Vec<PathBuf>) {
        let mut files = Vec::new();
        let mut folders = Vec::new();
        for raw in raw_inputs {
            match self.classify(raw) {
                PathKind::Demo(path) => files.push(path),
                PathKind::Folder(path) => folders.push(path),
                PathKind::Ignored => {}
            }
        }
        (files, folders)
    }
}

/// Follows an OS shortcut if the extension indicates one. Resolution failures
/// keep the original path untouched.
fn resolve_shortcut(path: &Path) -> PathBuf {
    let is_shortcut = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("lnk"))
        .unwrap_or(false);
    if !is_shortcut {
        return path.to_path_buf();
    }

    match std::fs::read_link(path) {
        Ok(target) if target.is_relative() => match path.parent() {
            Some(parent) => parent.join(target),
            None => target,
        },
        Ok(target) => target,
        Err(_) => path.to_path_buf(),
    }
}

/// Lexically absolute form of a path; falls back to the input when the
/// current directory is unavailable.
pub(crate) fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
