/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes all magic strings, numbers, and other literal values
/// used across the application, making them easier to maintain and modify.
/// Output format constants
pub mod output_formats {
    /// Text output format - human-readable listing with summary
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";
    /// Minimal output format - one line per archived topic
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// HTTP constants
pub mod http {
    /// HTTP 200 OK - the only status counted as reachable by default
    pub const STATUS_OK: u16 = 200;
    /// Redirect hops followed before giving up
    pub const MAX_REDIRECTS: usize = 10;
    /// User-Agent sent with probes unless overridden
    pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default per-probe timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
    /// Maximum reasonable timeout in seconds (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86400;
    /// Minimum timeout in seconds
    pub const MIN_TIMEOUT_SECONDS: u64 = 1;
}

/// Worker pool bounds
pub mod workers {
    /// Upper bound on concurrent probe workers
    pub const MAX_WORKERS: usize = 32;
    /// Lower bound on concurrent probe workers
    pub const MIN_WORKERS: usize = 1;
}
