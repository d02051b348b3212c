//! Core type definitions for tidesync

mod entry;
mod error;
mod policy;
mod tree;

pub use entry::{is_modified_after, FileRecord};
pub use error::SyncError;
pub use policy::SyncPolicy;
pub use tree::FileIndex;
