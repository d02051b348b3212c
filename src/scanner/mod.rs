//! Directory scanning logic

mod walker;

pub use walker::{scan_tree, ProgressCallback, TRASH_DIR_NAME};
