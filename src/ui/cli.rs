// Command-line interface definitions and parsing for topicsup

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON export with the topic records to scan
    pub topics_file: Option<String>,

    // Core Options
    /// Base domain used to build canonical topic links
    #[arg(short = 'd', long, value_name = "URL", help_heading = "Core Options")]
    pub domain: Option<String>,

    /// Per-probe timeout in seconds (default: 30)
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        help_heading = "Core Options"
    )]
    pub timeout: Option<u64>,

    /// Probe without any timeout (unbounded wait, use with care)
    #[arg(long, conflicts_with = "timeout", help_heading = "Core Options")]
    pub no_timeout: bool,

    /// Concurrent probe workers (default: CPU cores, capped at 32)
    #[arg(long, value_name = "COUNT", help_heading = "Core Options")]
    pub concurrency: Option<usize>,

    /// Overall dispatch deadline in seconds
    #[arg(long, value_name = "SECONDS", help_heading = "Core Options")]
    pub deadline: Option<u64>,

    // Filtering & Content
    /// File with URLs to ignore, one per line
    #[arg(long, value_name = "FILE", help_heading = "Filtering & Content")]
    pub ignore_file: Option<String>,

    /// Treat any 2xx status as reachable (default: only 200)
    #[arg(long, help_heading = "Filtering & Content")]
    pub allow_any_2xx: bool,

    // Output & Verbosity
    /// Suppress normal output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    // Network & Security
    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network & Security")]
    pub user_agent: Option<String>,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Convert parsed CLI arguments into the CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        timeout: cli.timeout,
        no_timeout: cli.no_timeout,
        workers: cli.concurrency,
        dispatch_deadline: cli.deadline,
        base_domain: cli.domain.clone(),
        ignore_file: cli.ignore_file.clone(),
        allow_any_2xx: cli.allow_any_2xx,
        user_agent: cli.user_agent.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        output_format: cli.format.clone(),
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_minimal_invocation() {
        let cli = Cli::try_parse_from(["topicsup", "records.json"]).unwrap();

        assert_eq!(cli.topics_file, Some("records.json".to_string()));
        assert_eq!(cli.timeout, None);
        assert!(!cli.no_timeout);
        assert_eq!(cli.format, None);
    }

    #[test]
    fn test_cli_parses_all_flags() {
        let cli = Cli::try_parse_from([
            "topicsup",
            "records.json",
            "--domain",
            "https://forum.example",
            "--timeout",
            "5",
            "--concurrency",
            "8",
            "--deadline",
            "120",
            "--ignore-file",
            "ignored.txt",
            "--allow-any-2xx",
            "--user-agent",
            "TopicAgent/1.0",
            "--format",
            "json",
            "--verbose",
        ])
        .unwrap();

        let cli_config = cli_to_config(&cli);
        assert_eq!(cli_config.timeout, Some(5));
        assert_eq!(cli_config.workers, Some(8));
        assert_eq!(cli_config.dispatch_deadline, Some(120));
        assert_eq!(
            cli_config.base_domain,
            Some("https://forum.example".to_string())
        );
        assert_eq!(cli_config.ignore_file, Some("ignored.txt".to_string()));
        assert!(cli_config.allow_any_2xx);
        assert_eq!(cli_config.user_agent, Some("TopicAgent/1.0".to_string()));
        assert_eq!(cli_config.output_format, Some("json".to_string()));
        assert!(cli_config.verbose);
    }

    #[test]
    fn test_cli_rejects_timeout_with_no_timeout() {
        let result = Cli::try_parse_from(["topicsup", "records.json", "-t", "5", "--no-timeout"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let result = Cli::try_parse_from(["topicsup", "records.json", "--format", "yaml"]);

        assert!(result.is_err());
    }
}
