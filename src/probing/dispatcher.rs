//! Probe dispatch
//!
//! Fans one probe task per (topic, URL) pair across a fixed-size worker
//! pool and funnels unreachable completions into the archive. Returns only
//! once every submitted probe has settled, so callers never observe a
//! partially filled archive.

use futures::{StreamExt, stream};
use log::debug;
use rustc_hash::FxHashSet;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::timeout;

use crate::archive::Archive;
use crate::probing::prober::{ProbeOutcome, ProbeUrl, Verdict};
use crate::types::Topic;

/// What one dispatch run did, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Topics archived up front because they had nothing to check
    pub topics_without_urls: usize,
    /// Probe tasks that ran to completion
    pub probes_completed: usize,
    /// Offline URLs recorded across all topics
    pub unreachable_found: usize,
    /// Whether the overall deadline cut the run short
    pub deadline_expired: bool,
}

/// Bounded-concurrency fan-out/fan-in coordinator.
pub struct Dispatcher<'a, P: ProbeUrl> {
    prober: &'a P,
    workers: usize,
    deadline: Option<Duration>,
}

impl<'a, P: ProbeUrl> Dispatcher<'a, P> {
    pub fn new(prober: &'a P, workers: usize) -> Self {
        Self {
            prober,
            workers: workers.max(1),
            deadline: None,
        }
    }

    /// Bound the whole dispatch by a wall-clock deadline. Probes that have
    /// not settled when it fires are recorded as unreachable: they did not
    /// yield a success verdict within bounds.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Run all probes and merge results into `archive`.
    ///
    /// Topics without URLs go straight to the archive. Everything else
    /// becomes one task per (topic, URL) pair, at most `workers` in flight
    /// at a time, completing in whatever order the network dictates. This
    /// is a full barrier: when it returns, the archive is complete and
    /// stable.
    pub async fn dispatch(&self, topics: &[Topic], archive: &Archive) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        for topic in topics.iter().filter(|topic| !topic.has_urls()) {
            archive.archive(topic);
            summary.topics_without_urls += 1;
        }

        let tasks: Vec<(&Topic, &str)> = topics
            .iter()
            .filter(|topic| topic.has_urls())
            .flat_map(|topic| topic.urls.iter().map(move |url| (topic, url.as_str())))
            .collect();

        if tasks.is_empty() {
            summary.unreachable_found = archive.offline_url_count();
            return summary;
        }

        debug!(
            "dispatching {} probes across {} workers",
            tasks.len(),
            self.workers
        );

        // Tracks which (topic, URL) pairs have settled, so a deadline can
        // tell the finished from the abandoned.
        let settled: Mutex<FxHashSet<(i64, String)>> = Mutex::new(FxHashSet::default());
        let settled_ref = &settled;

        let drain = async {
            let mut outcomes = stream::iter(tasks.iter().copied())
                .map(|(topic, url)| async move {
                    let verdict = self.prober.probe(url).await;
                    let outcome = ProbeOutcome {
                        topic,
                        url: url.to_string(),
                        verdict,
                    };
                    if let Verdict::Unreachable = outcome.verdict {
                        archive.record_unreachable(outcome.topic, &outcome.url);
                    }
                    settled_ref
                        .lock()
                        .unwrap()
                        .insert((topic.id, outcome.url.clone()));
                    outcome
                })
                .buffer_unordered(self.workers);

            // The barrier: drain every completion, discarding reachable
            // outcomes. Merging already happened at the completion site.
            let mut completed = 0usize;
            while outcomes.next().await.is_some() {
                completed += 1;
            }
            completed
        };

        let (completed, expired) = match self.deadline {
            None => (drain.await, false),
            Some(deadline) => match timeout(deadline, drain).await {
                Ok(completed) => (completed, false),
                Err(_) => (0, true),
            },
        };

        if expired {
            let settled = settled.lock().unwrap();
            for &(topic, url) in &tasks {
                if !settled.contains(&(topic.id, url.to_string())) {
                    archive.record_unreachable(topic, url);
                }
            }
            summary.probes_completed = settled.len();
            summary.deadline_expired = true;
        } else {
            summary.probes_completed = completed;
        }

        summary.unreachable_found = archive.offline_url_count();
        summary
    }
}
