//! CLI command handlers.
//!
//! Handlers are invoked by main.rs and return the process exit status where
//! the command has one.

mod compare;
mod modes;

pub use compare::{
    compare_files, load_document, render_outcome, run_compare, CompareOutcome, DocumentFormat,
    EXIT_DIFFERENT, EXIT_EQUAL, EXIT_ERROR,
};
pub use modes::{describe_chains, run_modes};

// Re-export config types used by handlers
pub use crate::config::{AppConfig, OutputFormat};
