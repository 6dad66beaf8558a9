//! topicsup scans forum topics for embedded external URLs, probes each URL
//! under a bounded worker pool, and archives every topic whose links are no
//! longer reachable (or that has no links to check at all).
//!
//! The pipeline is one-shot and in-process: repository → dispatcher →
//! archive → statistics. Reporting collaborators only ever see the settled
//! [`SweepOutcome`].

pub mod archive;
pub mod config;
pub mod core;
pub mod probing;
pub mod reporting;
pub mod repository;
pub mod stats;
pub mod types;
pub mod ui;

// Re-export commonly used items
pub use crate::archive::Archive;
pub use crate::config::Config;
pub use crate::core::error::{Result, TopicsUpError};
pub use crate::probing::{DispatchSummary, Dispatcher, HttpProber, ProbeUrl, Verdict};
pub use crate::repository::{IgnoredUrlSet, TopicRepository};
pub use crate::stats::SweepStats;
pub use crate::types::Topic;

/// Runs the probing pipeline over an already-loaded topic set.
pub struct Sweeper<'a, P: ProbeUrl> {
    prober: &'a P,
    config: &'a Config,
}

impl<'a, P: ProbeUrl> Sweeper<'a, P> {
    pub fn new(prober: &'a P, config: &'a Config) -> Self {
        Self { prober, config }
    }

    /// Probe every topic URL and return the settled final state.
    ///
    /// The archive handed back is complete and stable: this method only
    /// returns after the dispatch barrier.
    pub async fn sweep(&self, topics: Vec<Topic>) -> SweepOutcome {
        let archive = Archive::new();
        let dispatcher = Dispatcher::new(self.prober, self.config.effective_workers())
            .with_deadline(self.config.dispatch_deadline_duration());

        let summary = dispatcher.dispatch(&topics, &archive).await;
        let stats = SweepStats::calculate(topics.len(), archive.len());

        SweepOutcome::new(topics, archive, stats, summary)
    }
}

/// Read-only final state of one sweep, handed to reporting collaborators.
pub struct SweepOutcome {
    topics: Vec<Topic>,
    archive: Archive,
    stats: SweepStats,
    summary: DispatchSummary,
}

impl SweepOutcome {
    pub(crate) fn new(
        topics: Vec<Topic>,
        archive: Archive,
        stats: SweepStats,
        summary: DispatchSummary,
    ) -> Self {
        Self {
            topics,
            archive,
            stats,
            summary,
        }
    }

    /// Full topic list, post-load, pre-archive.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Archived topics with their accumulated offline URLs.
    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    /// Derived online/offline statistics.
    pub fn stats(&self) -> &SweepStats {
        &self.stats
    }

    /// What the dispatcher did, for logging.
    pub fn dispatch_summary(&self) -> DispatchSummary {
        self.summary
    }

    /// Whether any topic needs operator attention.
    pub fn has_offline_topics(&self) -> bool {
        !self.archive.is_empty()
    }
}
