//! Concurrent liveness probing
//!
//! This module holds the probing engine: one-shot URL probes and the
//! bounded worker pool that fans them out and funnels completions into
//! the archive.

pub mod dispatcher;
pub mod prober;

// Re-export commonly used items
pub use dispatcher::{DispatchSummary, Dispatcher};
pub use prober::{HttpProber, ProbeOutcome, ProbeUrl, Verdict};
