//! Output formatting and display logic for topicsup

use serde_json::json;

use crate::SweepOutcome;
use crate::core::constants::output_formats;
use crate::types::Topic;

/// Render the final state as human-readable text.
pub fn render_text(outcome: &SweepOutcome) -> String {
    let stats = outcome.stats();
    let archived = outcome.archive().entries_sorted();

    let mut out = String::new();
    if archived.is_empty() {
        out.push_str("No topics need attention!\n");
    } else {
        out.push_str("> Topics needing attention\n");
        for (i, topic) in archived.iter().enumerate() {
            out.push_str(&format!("{:4}. #{} {}\n", i + 1, topic.id, topic.title));
            out.push_str(&format!("      {}\n", topic.full_link));
            for url in sorted_offline(topic) {
                out.push_str(&format!("      ✗ {url}\n"));
            }
        }
    }
    out.push_str(&format!(
        "\nOffline: {} | Online: {}\n",
        stats.offline_summary(),
        stats.online_summary()
    ));
    out
}

/// Render the final state as JSON for automation.
pub fn render_json(outcome: &SweepOutcome) -> String {
    let stats = outcome.stats();
    let archived: Vec<serde_json::Value> = outcome
        .archive()
        .entries_sorted()
        .iter()
        .map(|topic| {
            json!({
                "id": topic.id,
                "title": topic.title,
                "full_link": topic.full_link,
                "offline_urls": sorted_offline(topic),
            })
        })
        .collect();

    json!({
        "total_topics": outcome.topics().len(),
        "offline_count": stats.offline_count,
        "online_count": stats.online_count,
        "offline_percentage": stats.offline_percentage,
        "online_percentage": stats.online_percentage,
        "archived": archived,
    })
    .to_string()
}

/// Render one line per archived topic, nothing else.
pub fn render_minimal(outcome: &SweepOutcome) -> String {
    outcome
        .archive()
        .entries_sorted()
        .iter()
        .map(|topic| {
            format!(
                "{}\t{}\t{}",
                topic.id,
                topic.full_link,
                sorted_offline(topic).join(" ")
            )
        })
        .collect::<Vec<String>>()
        .join("\n")
}

/// Print the rendered results to stdout.
///
/// `quiet` suppresses the text format only; json and minimal exist for
/// automation and always print.
pub fn display_results(outcome: &SweepOutcome, format: &str, quiet: bool) {
    match format {
        output_formats::JSON => println!("{}", render_json(outcome)),
        output_formats::MINIMAL => {
            let rendered = render_minimal(outcome);
            if !rendered.is_empty() {
                println!("{rendered}");
            }
        }
        _ => {
            if !quiet {
                print!("{}", render_text(outcome));
            }
        }
    }
}

fn sorted_offline(topic: &Topic) -> Vec<String> {
    let mut offline: Vec<String> = topic.offline_urls.iter().cloned().collect();
    offline.sort();
    offline
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::archive::Archive;
    use crate::probing::DispatchSummary;
    use crate::stats::SweepStats;
    use crate::types::UrlSet;

    fn topic(id: i64, urls: &[&str]) -> Topic {
        Topic::new(
            id,
            format!("topic-{id}"),
            format!("https://forum.example/topic/{id}-topic-{id}"),
            urls.iter().map(|u| u.to_string()).collect::<UrlSet>(),
        )
        .unwrap()
    }

    fn outcome_with_one_dead_topic() -> SweepOutcome {
        let topics = vec![topic(1, &["http://dead.example"]), topic(2, &["http://ok.example"])];
        let archive = Archive::new();
        archive.record_unreachable(&topics[0], "http://dead.example");
        let stats = SweepStats::calculate(topics.len(), archive.len());
        SweepOutcome::new(topics, archive, stats, DispatchSummary::default())
    }

    fn clean_outcome() -> SweepOutcome {
        let topics = vec![topic(2, &["http://ok.example"])];
        let archive = Archive::new();
        let stats = SweepStats::calculate(topics.len(), archive.len());
        SweepOutcome::new(topics, archive, stats, DispatchSummary::default())
    }

    #[test]
    fn test_render_text__lists_archived_topics() {
        let rendered = render_text(&outcome_with_one_dead_topic());

        assert!(rendered.contains("> Topics needing attention"));
        assert!(rendered.contains("#1 topic-1"));
        assert!(rendered.contains("https://forum.example/topic/1-topic-1"));
        assert!(rendered.contains("✗ http://dead.example"));
        assert!(rendered.contains("Offline: 1 (50.00%) | Online: 1 (50.00%)"));
    }

    #[test]
    fn test_render_text__clean_run() {
        let rendered = render_text(&clean_outcome());

        assert!(rendered.contains("No topics need attention!"));
        assert!(rendered.contains("Offline: 0 (0.00%) | Online: 1 (100.00%)"));
    }

    #[test]
    fn test_render_json__is_parseable_and_sorted() {
        let topics = vec![
            topic(9, &["http://dead.example"]),
            topic(4, &["http://also-dead.example"]),
        ];
        let archive = Archive::new();
        archive.record_unreachable(&topics[0], "http://dead.example");
        archive.record_unreachable(&topics[1], "http://also-dead.example");
        let stats = SweepStats::calculate(topics.len(), archive.len());
        let outcome = SweepOutcome::new(topics, archive, stats, DispatchSummary::default());

        let parsed: serde_json::Value = serde_json::from_str(&render_json(&outcome)).unwrap();

        assert_eq!(parsed["total_topics"], 2);
        assert_eq!(parsed["offline_count"], 2);
        assert_eq!(parsed["online_count"], 0);
        let archived = parsed["archived"].as_array().unwrap();
        assert_eq!(archived.len(), 2);
        assert_eq!(archived[0]["id"], 4);
        assert_eq!(archived[1]["id"], 9);
    }

    #[test]
    fn test_render_minimal__one_line_per_topic() {
        let rendered = render_minimal(&outcome_with_one_dead_topic());

        assert_eq!(
            rendered,
            "1\thttps://forum.example/topic/1-topic-1\thttp://dead.example"
        );
    }

    #[test]
    fn test_render_minimal__empty_when_clean() {
        assert!(render_minimal(&clean_outcome()).is_empty());
    }
}
