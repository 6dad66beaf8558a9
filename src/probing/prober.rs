//! URL liveness probing
//!
//! One probe is one HTTP GET. Every failure cause (DNS, TLS, refused
//! connection, timeout, malformed response, non-success status) collapses
//! into the same `Unreachable` verdict; causes are only ever surfaced in
//! debug logs. Callers never see an error cross this boundary.

use async_trait::async_trait;
use log::debug;
use reqwest::redirect::Policy;

use crate::config::Config;
use crate::core::constants::http;
use crate::core::error::Result;
use crate::types::Topic;

/// Reachability verdict for a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Reachable,
    Unreachable,
}

impl Verdict {
    pub fn is_reachable(self) -> bool {
        matches!(self, Verdict::Reachable)
    }
}

/// Result of one liveness check, consumed immediately by the aggregator.
#[derive(Debug)]
pub struct ProbeOutcome<'a> {
    pub topic: &'a Topic,
    pub url: String,
    pub verdict: Verdict,
}

#[async_trait]
pub trait ProbeUrl: Send + Sync {
    /// Perform exactly one reachability probe. Never fails; anything that
    /// goes wrong is an `Unreachable` verdict.
    async fn probe(&self, url: &str) -> Verdict;
}

/// Probes over a shared HTTP client carrying the configured timeout
/// and User-Agent.
#[derive(Debug)]
pub struct HttpProber {
    client: reqwest::Client,
    allow_any_2xx: bool,
}

impl HttpProber {
    /// Build the prober from validated configuration.
    ///
    /// Client construction is the only fallible step here, and it runs
    /// before any probing starts.
    pub fn from_config(config: &Config) -> Result<Self> {
        let user_agent = config
            .user_agent
            .as_deref()
            .unwrap_or(http::DEFAULT_USER_AGENT);

        let mut builder = reqwest::Client::builder()
            .redirect(Policy::limited(http::MAX_REDIRECTS))
            .user_agent(user_agent);

        if let Some(timeout) = config.probe_timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            allow_any_2xx: config.allow_any_2xx.unwrap_or(false),
        })
    }
}

#[async_trait]
impl ProbeUrl for HttpProber {
    async fn probe(&self, url: &str) -> Verdict {
        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                let reachable = if self.allow_any_2xx {
                    status.is_success()
                } else {
                    status.as_u16() == http::STATUS_OK
                };

                if reachable {
                    debug!("✓ {url} -> {status}");
                    Verdict::Reachable
                } else {
                    debug!("✗ {url} -> {status}");
                    Verdict::Unreachable
                }
            }
            Err(err) => {
                let cause = std::error::Error::source(&err)
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| err.to_string());
                debug!("✗ {url} -> {cause}");
                Verdict::Unreachable
            }
        }
    }
}
