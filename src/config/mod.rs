//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{output_formats, timeouts, workers};
use crate::core::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Per-probe timeout in seconds
    pub timeout: Option<u64>,

    /// Probe without any timeout (unbounded wait, explicit opt-in)
    pub no_timeout: Option<bool>,

    /// Number of concurrent probe workers
    pub workers: Option<usize>,

    /// Overall dispatch deadline in seconds
    pub dispatch_deadline: Option<u64>,

    /// Base domain used to build canonical topic links
    pub base_domain: Option<String>,

    /// URLs to exclude from every topic's candidate set
    pub ignored_urls: Option<Vec<String>>,

    /// File with additional ignored URLs, one per line
    pub ignore_file: Option<String>,

    /// Count any 2xx status as reachable instead of exactly 200
    pub allow_any_2xx: Option<bool>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Output format (text, json, minimal)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            no_timeout: Some(false),
            workers: None, // Will default to CPU core count, capped
            dispatch_deadline: None,
            base_domain: None,
            ignored_urls: None,
            ignore_file: None,
            allow_any_2xx: Some(false),
            user_agent: None,
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            crate::core::error::TopicsUpError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            crate::core::error::TopicsUpError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        // Validate the loaded configuration
        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        // Check for .topicsup.toml in current directory
        if let Ok(config) = Self::load_from_file(".topicsup.toml") {
            return config;
        }

        // Check for .topicsup.toml in parent directories (up to 3 levels)
        for i in 1..=3 {
            let path = format!("{}.topicsup.toml", "../".repeat(i));
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        // Fall back to defaults
        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Core options
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if cli_config.no_timeout {
            self.no_timeout = Some(true);
        }
        if let Some(workers) = cli_config.workers {
            self.workers = Some(workers);
        }
        if let Some(deadline) = cli_config.dispatch_deadline {
            self.dispatch_deadline = Some(deadline);
        }

        // Topic source
        if let Some(ref base_domain) = cli_config.base_domain {
            self.base_domain = Some(base_domain.clone());
        }
        if let Some(ref ignore_file) = cli_config.ignore_file {
            self.ignore_file = Some(ignore_file.clone());
        }

        // Probe policy
        if cli_config.allow_any_2xx {
            self.allow_any_2xx = Some(true);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
    }

    /// Per-probe timeout, `None` when the unbounded opt-in is set
    pub fn probe_timeout(&self) -> Option<Duration> {
        if self.no_timeout.unwrap_or(false) {
            None
        } else {
            Some(Duration::from_secs(
                self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS),
            ))
        }
    }

    /// Overall dispatch deadline, if configured
    pub fn dispatch_deadline_duration(&self) -> Option<Duration> {
        self.dispatch_deadline.map(Duration::from_secs)
    }

    /// Worker count actually used: configured value, or the CPU core count,
    /// clamped to the supported range either way
    pub fn effective_workers(&self) -> usize {
        self.workers
            .unwrap_or_else(num_cpus::get)
            .clamp(workers::MIN_WORKERS, workers::MAX_WORKERS)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate timeout
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(crate::core::error::TopicsUpError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(crate::core::error::TopicsUpError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>24 hours). Consider using a smaller value."
                )));
            }
        }

        // Validate worker count
        if let Some(workers_configured) = self.workers {
            if workers_configured < workers::MIN_WORKERS {
                return Err(crate::core::error::TopicsUpError::Config(
                    "Worker count cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if workers_configured > workers::MAX_WORKERS {
                return Err(crate::core::error::TopicsUpError::Config(format!(
                    "Worker count of {workers_configured} exceeds the supported maximum of {}.",
                    workers::MAX_WORKERS
                )));
            }
        }

        // Validate dispatch deadline
        if let Some(deadline) = self.dispatch_deadline
            && deadline == 0
        {
            return Err(crate::core::error::TopicsUpError::Config(
                "Dispatch deadline cannot be 0. Expected a positive integer representing seconds."
                    .to_string(),
            ));
        }

        // Validate base domain
        if let Some(ref base_domain) = self.base_domain {
            let lowered = base_domain.to_ascii_lowercase();
            if !lowered.starts_with("http://") && !lowered.starts_with("https://") {
                return Err(crate::core::error::TopicsUpError::Config(format!(
                    "Base domain '{base_domain}' must be an absolute http(s) URL."
                )));
            }
        }

        // Validate output format
        if let Some(ref format) = self.output_format {
            match format.as_str() {
                f if output_formats::ALL.contains(&f) => {}
                _ => {
                    return Err(crate::core::error::TopicsUpError::Config(format!(
                        "Invalid output format '{format}'. Expected one of: {}.",
                        output_formats::ALL.join(", ")
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Core options
    pub timeout: Option<u64>,            // --timeout
    pub no_timeout: bool,                // --no-timeout
    pub workers: Option<usize>,          // --concurrency
    pub dispatch_deadline: Option<u64>,  // --deadline

    // Topic source
    pub base_domain: Option<String>,     // --domain
    pub ignore_file: Option<String>,     // --ignore-file

    // Probe policy
    pub allow_any_2xx: bool,             // --allow-any-2xx
    pub user_agent: Option<String>,      // --user-agent

    // Output & format
    pub quiet: bool,                     // --quiet
    pub verbose: bool,                   // --verbose
    pub output_format: Option<String>,   // --format

    // Configuration
    pub config_file: Option<String>,     // --config
    pub no_config: bool,                 // --no-config
}
