//! Top-level commands

pub mod sync;

pub use sync::{format_run_summary, run_once, RunReport};
