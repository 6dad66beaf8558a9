use crate::config::Config;
use crate::probing::DispatchSummary;
use log::{debug, error, info, warn};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config, actual_workers: usize) {
    let allow_any_2xx = config.allow_any_2xx.unwrap_or(false);

    match config.probe_timeout() {
        Some(timeout) => info!(
            "Configuration: workers={actual_workers}, timeout={}s",
            timeout.as_secs()
        ),
        None => {
            info!("Configuration: workers={actual_workers}, timeout=none");
            warn!("Probing without a timeout; a hung server can stall the whole sweep");
        }
    }
    if let Some(deadline) = config.dispatch_deadline {
        info!("Dispatch deadline: {deadline}s");
    }
    info!("Success policy: {}", if allow_any_2xx { "any 2xx" } else { "200 only" });
}

/// Log topic loading information
pub fn log_topic_discovery(total_topics: usize, without_urls: usize, probe_count: usize) {
    info!(
        "Loaded {total_topics} topic(s): {without_urls} with nothing to check, {probe_count} URL probe(s) queued"
    );
}

/// Log sweep completion
pub fn log_sweep_complete(summary: &DispatchSummary, archived: usize, duration_ms: u128) {
    if summary.deadline_expired {
        warn!(
            "Sweep cut short by deadline: {} probe(s) completed, unfinished ones recorded as unreachable ({duration_ms}ms)",
            summary.probes_completed
        );
    }
    if archived == 0 {
        info!(
            "✅ Sweep complete: {} probe(s), no topics need attention ({duration_ms}ms)",
            summary.probes_completed
        );
    } else {
        warn!(
            "❌ Sweep complete: {} probe(s), {} offline URL(s), {archived} topic(s) archived ({duration_ms}ms)",
            summary.probes_completed, summary.unreachable_found
        );
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
