//! Terminal progress output

mod progress;

pub use progress::ProgressReporter;
