//! Archive aggregation
//!
//! The archive maps topic ids to snapshots of topics that require operator
//! attention: topics with nothing to check, or topics with at least one URL
//! confirmed unreachable. It is the only state mutated from concurrent probe
//! completions, so every merge goes through one coarse lock.

use rustc_hash::FxHashMap;
use std::sync::Mutex;

use crate::types::Topic;

/// Accumulated offline-URL evidence, keyed by topic id.
///
/// Entries are merged, never replaced or removed; within one run the archive
/// only grows. Merge operations take `&self` and are safe to call from any
/// number of concurrent completions; the per-call critical section
/// guarantees no contribution is lost when two probes for the same topic
/// finish at the same time.
#[derive(Debug, Default)]
pub struct Archive {
    entries: Mutex<FxHashMap<i64, Topic>>,
}

impl Archive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a topic into the archive.
    ///
    /// Inserts a snapshot of the topic if its id is not yet present,
    /// otherwise unions the incoming `offline_urls` into the existing entry.
    pub fn archive(&self, topic: &Topic) {
        let mut entries = self.entries.lock().unwrap();
        match entries.get_mut(&topic.id) {
            Some(existing) => {
                existing
                    .offline_urls
                    .extend(topic.offline_urls.iter().cloned());
            }
            None => {
                entries.insert(topic.id, topic.clone());
            }
        }
    }

    /// Record a single URL of `topic` as unreachable.
    ///
    /// This is the form probe completions use: insert-or-get the snapshot,
    /// then grow its offline set by one URL.
    pub fn record_unreachable(&self, topic: &Topic, url: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries
            .entry(topic.id)
            .or_insert_with(|| topic.clone())
            .offline_urls
            .insert(url.to_string());
    }

    /// Whether a topic id has been archived.
    pub fn contains(&self, id: i64) -> bool {
        self.entries.lock().unwrap().contains_key(&id)
    }

    /// Snapshot of a single archived topic.
    pub fn get(&self, id: i64) -> Option<Topic> {
        self.entries.lock().unwrap().get(&id).cloned()
    }

    /// Number of archived topics.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Total number of offline URLs recorded across all topics.
    pub fn offline_url_count(&self) -> usize {
        self.entries
            .lock()
            .unwrap()
            .values()
            .map(|topic| topic.offline_urls.len())
            .sum()
    }

    /// Archived topics sorted by id, for deterministic reporting.
    pub fn entries_sorted(&self) -> Vec<Topic> {
        let mut topics: Vec<Topic> = self.entries.lock().unwrap().values().cloned().collect();
        topics.sort();
        topics
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::types::UrlSet;
    use std::sync::Arc;

    fn topic(id: i64, urls: &[&str]) -> Topic {
        Topic::new(
            id,
            format!("topic-{id}"),
            format!("https://forum.example/topic/{id}-topic-{id}"),
            urls.iter().map(|u| u.to_string()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_archive__inserts_snapshot() {
        let archive = Archive::new();
        let t = topic(1, &[]);

        archive.archive(&t);

        assert_eq!(archive.len(), 1);
        assert!(archive.contains(1));
        assert!(archive.get(1).unwrap().offline_urls.is_empty());
    }

    #[test]
    fn test_archive__unions_offline_urls() {
        let archive = Archive::new();
        let mut a = topic(7, &["http://a.example", "http://b.example"]);
        a.offline_urls.insert("http://a.example".to_string());
        let mut b = topic(7, &["http://a.example", "http://b.example"]);
        b.offline_urls.insert("http://b.example".to_string());

        archive.archive(&a);
        archive.archive(&b);

        let merged = archive.get(7).unwrap();
        assert_eq!(merged.offline_urls.len(), 2);
        assert!(merged.offline_urls.contains("http://a.example"));
        assert!(merged.offline_urls.contains("http://b.example"));
    }

    #[test]
    fn test_record_unreachable__grows_offline_set() {
        let archive = Archive::new();
        let t = topic(3, &["http://a.example", "http://b.example"]);

        archive.record_unreachable(&t, "http://a.example");
        archive.record_unreachable(&t, "http://b.example");
        // Recording the same URL twice is a no-op
        archive.record_unreachable(&t, "http://a.example");

        let entry = archive.get(3).unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(entry.offline_urls.len(), 2);
        assert_eq!(archive.offline_url_count(), 2);
    }

    #[test]
    fn test_record_unreachable__offline_stays_subset_of_urls() {
        let archive = Archive::new();
        let t = topic(4, &["http://a.example"]);

        archive.record_unreachable(&t, "http://a.example");

        let entry = archive.get(4).unwrap();
        assert!(entry.offline_urls.is_subset(&entry.urls));
    }

    #[test]
    fn test_concurrent_merges__no_lost_update() {
        // Two probes for the same topic failing concurrently on different
        // URLs must both land in the final offline set.
        let archive = Arc::new(Archive::new());
        let urls: Vec<String> = (0..64).map(|i| format!("http://dead-{i}.example")).collect();
        let t = Arc::new(Topic::new(
            9,
            "contested".to_string(),
            "https://forum.example/topic/9-contested".to_string(),
            urls.iter().cloned().collect::<UrlSet>(),
        )
        .unwrap());

        let handles: Vec<_> = urls
            .iter()
            .cloned()
            .map(|url| {
                let archive = Arc::clone(&archive);
                let t = Arc::clone(&t);
                std::thread::spawn(move || archive.record_unreachable(&t, &url))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let entry = archive.get(9).unwrap();
        assert_eq!(entry.offline_urls.len(), 64);
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_entries_sorted__by_id() {
        let archive = Archive::new();
        archive.archive(&topic(5, &[]));
        archive.archive(&topic(1, &[]));
        archive.archive(&topic(3, &[]));

        let ids: Vec<i64> = archive.entries_sorted().iter().map(Topic::id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }
}
