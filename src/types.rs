use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::fmt;

/// Set of URL strings, deduplicated by construction.
pub type UrlSet = FxHashSet<String>;

/// A forum topic with the external URLs embedded in its body.
///
/// Built once by the repository at load time and treated as read-only
/// afterwards. `offline_urls` is the single mutable field, and only the
/// archive's merge operations touch it (on the archive's own snapshots).
#[derive(Debug, Eq, Clone)]
pub struct Topic {
    /// Stable forum identifier
    pub id: i64,
    /// Topic title as exported
    pub title: String,
    /// Canonical link to the topic, derived from the base domain
    pub full_link: String,
    /// External URLs found in the topic body, ignored URLs excluded
    pub urls: UrlSet,
    /// URLs confirmed unreachable; always a subset of `urls`
    pub offline_urls: UrlSet,
}

/// Errors that can occur when building a `Topic`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicError {
    /// Identifier is missing or not positive
    InvalidId,
    /// Title is missing or empty
    MissingTitle,
}

impl fmt::Display for TopicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "Topic id must be a positive integer"),
            Self::MissingTitle => write!(f, "Topic title is required and cannot be empty"),
        }
    }
}

impl std::error::Error for TopicError {}

impl Ord for Topic {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for Topic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Topic {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Topic {
    /// Create a new Topic with validation.
    ///
    /// # Arguments
    /// * `id` - Stable forum identifier (must be > 0)
    /// * `title` - Topic title (must not be empty)
    /// * `full_link` - Canonical link derived by the repository
    /// * `urls` - Extracted URL set, already deduplicated and filtered
    pub fn new(
        id: i64,
        title: String,
        full_link: String,
        urls: UrlSet,
    ) -> Result<Self, TopicError> {
        if id <= 0 {
            return Err(TopicError::InvalidId);
        }
        if title.trim().is_empty() {
            return Err(TopicError::MissingTitle);
        }

        Ok(Self {
            id,
            title: title.trim().to_string(),
            full_link,
            urls,
            offline_urls: UrlSet::default(),
        })
    }

    /// Get the topic id.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Get the title as a string slice.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the canonical link as a string slice.
    pub fn full_link(&self) -> &str {
        &self.full_link
    }

    /// URLs remaining after filtering.
    pub fn urls(&self) -> &UrlSet {
        &self.urls
    }

    /// URLs confirmed unreachable so far.
    pub fn offline_urls(&self) -> &UrlSet {
        &self.offline_urls
    }

    /// Whether there is anything to probe.
    pub fn has_urls(&self) -> bool {
        !self.urls.is_empty()
    }
}
