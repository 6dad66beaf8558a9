//! Topic loading and URL extraction
//!
//! Turns the raw forum export into validated [`Topic`] entities: id and
//! title from the record fields, a canonical link derived from the base
//! domain, and the set of embedded http/https URLs with ignored entries
//! removed.

use linkify::{LinkFinder, LinkKind};
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use serde::Deserialize;

use std::fs;
use std::path::Path;

use crate::core::error::{Result, TopicsUpError};
use crate::types::{Topic, UrlSet};

static HTTP_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^https?://").unwrap());

/// One row of the forum export. Fields are optional because the export
/// format makes no promises; records missing id or title are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub topic_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub post_content: Option<String>,
}

/// Database-GUI style export wrapper: `{"RECORDS": [...]}`.
#[derive(Debug, Deserialize)]
struct RecordFile {
    #[serde(rename = "RECORDS", default)]
    records: Vec<Option<RawRecord>>,
}

/// URLs excluded from every topic's candidate set, whatever their
/// reachability. Built once before topic construction, never mutated after.
#[derive(Debug, Default, Clone)]
pub struct IgnoredUrlSet {
    urls: FxHashSet<String>,
}

impl IgnoredUrlSet {
    pub fn new<I>(urls: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            urls: urls
                .into_iter()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty())
                .collect(),
        }
    }

    /// Build the set from the inline config list plus an optional
    /// line-oriented file (blank lines and `#` comments skipped).
    pub fn from_sources(inline: &[String], file: Option<&str>) -> Result<Self> {
        let mut urls: FxHashSet<String> = inline
            .iter()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();

        if let Some(path) = file {
            let content = read_source_file(Path::new(path))?;
            urls.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                    .map(str::to_string),
            );
        }

        Ok(Self { urls })
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Produces the ordered topic sequence from raw records.
#[derive(Debug)]
pub struct TopicRepository {
    base_domain: String,
    ignored: IgnoredUrlSet,
}

impl TopicRepository {
    pub fn new<S: Into<String>>(base_domain: S, ignored: IgnoredUrlSet) -> Self {
        Self {
            base_domain: base_domain.into(),
            ignored,
        }
    }

    /// Load and build all topics from a `RECORDS` JSON export.
    ///
    /// A missing or malformed file is fatal; null or incomplete records
    /// inside a well-formed file are silently skipped.
    pub fn load_topics<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Topic>> {
        let content = read_source_file(path.as_ref())?;
        let file: RecordFile = serde_json::from_str(&content)?;
        Ok(self.topics_from_records(file.records))
    }

    /// Build topics from already-parsed records, preserving record order.
    pub fn topics_from_records(&self, records: Vec<Option<RawRecord>>) -> Vec<Topic> {
        records
            .into_iter()
            .flatten()
            .filter_map(|record| self.build_topic(record))
            .collect()
    }

    fn build_topic(&self, record: RawRecord) -> Option<Topic> {
        let id = record.topic_id?;
        let title = record.title?;
        let urls = self.extract_urls(record.post_content.as_deref().unwrap_or(""));
        let full_link = self.full_link(id, &title);

        Topic::new(id, title, full_link, urls).ok()
    }

    /// Canonical topic link: base domain joined with an id-and-title path.
    /// Characters outside the safe subset are dropped, not rejected.
    fn full_link(&self, id: i64, title: &str) -> String {
        format!(
            "{}/topic/{}-{}",
            self.base_domain.trim_end_matches('/'),
            id,
            safe_slug(title)
        )
    }

    /// All http/https URLs embedded in the body, deduplicated, minus the
    /// ignored set.
    fn extract_urls(&self, body: &str) -> UrlSet {
        let mut finder = LinkFinder::new();
        finder.kinds(&[LinkKind::Url]);

        finder
            .links(body)
            .map(|link| link.as_str().to_string())
            .filter(|url| HTTP_SCHEME.is_match(url))
            .filter(|url| !self.ignored.contains(url))
            .collect()
    }
}

fn read_source_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => TopicsUpError::FileNotFound(path.display().to_string()),
        _ => TopicsUpError::Io(err),
    })
}

fn safe_slug(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
