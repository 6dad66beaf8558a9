use clap::Parser;
use topicsup::Sweeper;
use topicsup::config::{CliConfig, Config};
use topicsup::core::TopicsUpError;
use topicsup::core::constants::output_formats;
use topicsup::probing::HttpProber;
use topicsup::reporting::{logging, output};
use topicsup::repository::{IgnoredUrlSet, TopicRepository};
use topicsup::ui::{Cli, cli_to_config};

use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let Some(topics_file) = cli.topics_file.clone() else {
        eprintln!("Error: No topics file provided");
        eprintln!("\nFor more information, try '--help'.");
        std::process::exit(2);
    };

    // Run the main sweep logic
    match run_topicsup_logic(&cli, &topics_file).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}

/// Main sweep logic extracted from main() for testing
pub async fn run_topicsup_logic(
    cli: &Cli,
    topics_file: &str,
) -> Result<i32, Box<dyn std::error::Error>> {
    // Parse CLI arguments into CliConfig using the derive-based CLI
    let cli_config = cli_to_config(cli);

    // Load, merge and validate configuration
    let config = load_and_merge_config(&cli_config)?;
    config.validate()?;

    logging::init_logger(config.verbose.unwrap_or(false), cli_config.quiet);

    let workers = config.effective_workers();
    logging::log_config_info(&config, workers);

    // Build the repository collaborators; all of this is fatal before any
    // probing starts
    let base_domain = config.base_domain.clone().ok_or_else(|| {
        TopicsUpError::Config(
            "Base domain is required (--domain or base_domain in .topicsup.toml)".to_string(),
        )
    })?;
    let ignored = IgnoredUrlSet::from_sources(
        config.ignored_urls.as_deref().unwrap_or(&[]),
        config.ignore_file.as_deref(),
    )?;
    let repository = TopicRepository::new(base_domain, ignored);
    let topics = repository.load_topics(topics_file)?;

    let without_urls = topics.iter().filter(|topic| !topic.has_urls()).count();
    let probe_count: usize = topics.iter().map(|topic| topic.urls().len()).sum();
    logging::log_topic_discovery(topics.len(), without_urls, probe_count);

    // Probe everything behind the barrier, then report over the settled state
    let prober = HttpProber::from_config(&config)?;
    let sweeper = Sweeper::new(&prober, &config);

    let started = Instant::now();
    let outcome = sweeper.sweep(topics).await;
    logging::log_sweep_complete(
        &outcome.dispatch_summary(),
        outcome.archive().len(),
        started.elapsed().as_millis(),
    );

    let format = config
        .output_format
        .as_deref()
        .unwrap_or(output_formats::DEFAULT);
    output::display_results(&outcome, format, cli_config.quiet);

    Ok(if outcome.has_offline_topics() { 1 } else { 0 })
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(&format!("Could not load config file '{config_file}'"), Some(e));
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    Ok(config)
}
