//! Property-based tests for topicsup using proptest
//!
//! These tests exercise the invariants of the pipeline without any network
//! access: statistics totals, the ignored-URL filter, the safe-slug link
//! derivation, and lost-update-free archive merging.

use proptest::prelude::*;
use std::sync::Arc;

use topicsup::archive::Archive;
use topicsup::repository::{IgnoredUrlSet, RawRecord, TopicRepository};
use topicsup::stats::SweepStats;
use topicsup::types::Topic;

/// (total topics, archived topics) with archived <= total
fn counts_strategy() -> impl Strategy<Value = (usize, usize)> {
    (0usize..2000).prop_flat_map(|total| (Just(total), 0..=total))
}

/// Distinct host names, turned into URLs by the tests
fn host_names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{3,10}", 1..16)
        .prop_map(|names| names.into_iter().collect())
}

fn record(id: i64, title: &str, body: String) -> Option<RawRecord> {
    Some(RawRecord {
        topic_id: Some(id),
        title: Some(title.to_string()),
        post_content: Some(body),
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_stats_counts_always_add_up((total, archived) in counts_strategy()) {
        let stats = SweepStats::calculate(total, archived);

        prop_assert_eq!(stats.offline_count + stats.online_count, total);
        prop_assert_eq!(stats.offline_count, archived);
    }

    #[test]
    fn test_stats_percentages_sum_within_tolerance((total, archived) in counts_strategy()) {
        let stats = SweepStats::calculate(total, archived);

        if total == 0 {
            prop_assert_eq!(stats.offline_percentage, 0.0);
            prop_assert_eq!(stats.online_percentage, 0.0);
        } else {
            let sum = stats.offline_percentage + stats.online_percentage;
            // Independent rounding can drift by at most one cent each way
            prop_assert!((sum - 100.0).abs() <= 0.011, "sum was {sum}");
        }
        prop_assert!((0.0..=100.0).contains(&stats.offline_percentage));
        prop_assert!((0.0..=100.0).contains(&stats.online_percentage));
    }

    #[test]
    fn test_extraction_never_keeps_ignored_urls(names in host_names_strategy()) {
        let urls: Vec<String> = names.iter().map(|n| format!("http://{n}.example")).collect();
        let (ignored_urls, kept_urls) = split_alternating(&urls);

        let repo = TopicRepository::new(
            "https://forum.example",
            IgnoredUrlSet::new(ignored_urls.clone()),
        );
        let body = urls.join(" and ");
        let topics = repo.topics_from_records(vec![record(1, "generated", body)]);

        prop_assert_eq!(topics.len(), 1);
        let topic = &topics[0];
        for url in &ignored_urls {
            prop_assert!(!topic.urls().contains(url));
        }
        for url in &kept_urls {
            prop_assert!(topic.urls().contains(url));
        }
        for url in topic.urls() {
            prop_assert!(url.starts_with("http://") || url.starts_with("https://"));
        }
    }

    #[test]
    fn test_full_link_contains_only_safe_characters(title in "[ -~]{1,30}") {
        prop_assume!(!title.trim().is_empty());

        let repo = TopicRepository::new("https://forum.example", IgnoredUrlSet::default());
        let topics = repo.topics_from_records(vec![record(42, &title, String::new())]);

        prop_assert_eq!(topics.len(), 1);
        let link = topics[0].full_link();
        let slug = link
            .strip_prefix("https://forum.example/topic/42-")
            .expect("link should carry the id prefix");
        for c in slug.chars() {
            prop_assert!(
                c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_',
                "unsafe character {c:?} in slug {slug:?}"
            );
        }
    }

    #[test]
    fn test_archive_concurrent_merges_lose_nothing(count in 1usize..48) {
        let urls: Vec<String> = (0..count).map(|i| format!("http://dead-{i}.example")).collect();
        let topic = Arc::new(
            Topic::new(
                1,
                "contested".to_string(),
                "https://forum.example/topic/1-contested".to_string(),
                urls.iter().cloned().collect(),
            )
            .unwrap(),
        );
        let archive = Arc::new(Archive::new());

        let handles: Vec<_> = urls
            .iter()
            .cloned()
            .map(|url| {
                let archive = Arc::clone(&archive);
                let topic = Arc::clone(&topic);
                std::thread::spawn(move || archive.record_unreachable(&topic, &url))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let entry = archive.get(1).unwrap();
        prop_assert_eq!(entry.offline_urls().len(), count);
        prop_assert!(entry.offline_urls().is_subset(entry.urls()));
        prop_assert_eq!(archive.len(), 1);
    }
}

/// Split a URL list into (even indexes, odd indexes).
fn split_alternating(urls: &[String]) -> (Vec<String>, Vec<String>) {
    let mut evens = Vec::new();
    let mut odds = Vec::new();
    for (i, url) in urls.iter().enumerate() {
        if i % 2 == 0 {
            evens.push(url.clone());
        } else {
            odds.push(url.clone());
        }
    }
    (evens, odds)
}
