//! User interface components
//!
//! Command-line parsing lives here; rendering of results is in
//! `reporting::output`.

pub mod cli;

pub use cli::{Cli, cli_to_config};
