//! Change classifier - Correlation of input and output scans

mod classify;
mod compare;
mod engine;

pub use classify::{classify, classify_indexes};
pub use compare::should_copy;
pub use engine::{ChangeSet, PendingFile};
