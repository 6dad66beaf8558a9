//! Reporting collaborators
//!
//! Logging and rendering over the sweep's read-only final state.

pub mod logging;
pub mod output;
