//! Read-only configuration consumed by the ingestion core.
//!
//! Loading and saving the configuration file is the embedding application's
//! job; this crate only reads the values.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::parser::OutputPolicy;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestConfig {
    /// File extensions (without the leading dot) recognized as demo files.
    pub demo_extensions: Vec<String>,
    /// When `true`, parser output lands beside each source demo.
    pub output_to_input_folder: bool,
    /// Target directory for parser output when not writing beside the source.
    pub output_folder: PathBuf,
    /// When `true`, never show the recursive-scan prompt and use
    /// `scan_folders_recursively` instead.
    pub skip_recursive_scan_dialog: bool,
    /// Stored default for the recursive-scan decision.
    pub scan_folders_recursively: bool,
    /// Upper bound on the parser's internal worker threads.
    pub max_thread_count: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            demo_extensions: vec![
                "dm_68".to_string(),
                "dm_73".to_string(),
                "dm_90".to_string(),
            ],
            output_to_input_folder: true,
            output_folder: PathBuf::new(),
            skip_recursive_scan_dialog: false,
            scan_folders_recursively: false,
            max_thread_count: 4,
        }
    }
}

impl IngestConfig {
    /// Resolves the configured output-folder policy for a new batch.
    pub fn output_policy(&self) -> OutputPolicy {
        if self.output_to_input_folder {
            OutputPolicy::BesideSource
        } else {
            OutputPolicy::Fixed(self.output_folder.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_input_folders() {
        let config = IngestConfig::default();
        assert_eq!(config.demo_extensions.len(), 3);
        assert_eq!(config.output_policy(), OutputPolicy::BesideSource);
        assert_eq!(config.max_thread_count, 4);
    }

    #[test]
    fn fixed_output_folder_policy() {
        let config = IngestConfig {
            output_to_input_folder: false,
            output_folder: PathBuf::from("/tmp/out"),
            ..Default::default()
        };
        assert_eq!(
            config.output_policy(),
            OutputPolicy::Fixed(PathBuf::from("/tmp/out"))
        );
    }
}
