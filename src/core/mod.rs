pub mod classify;
pub mod dedup;
pub mod expand;

pub use classify::{PathClassifier, PathKind};
pub use dedup::{filter_new, path_key, DemoCollection};
pub use expand::{FolderExpander, RecursionChoice};
