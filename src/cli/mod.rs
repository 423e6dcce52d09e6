//! CLI command handlers
//!
//! This module contains all CLI-related functionality including:
//! - Argument parsing structures
//! - Command routing
//! - Verbosity mapping

pub mod args;
pub mod help;
pub mod router;

// Re-export the main CLI structures for convenience
pub use args::{Cli, Commands, SourceArgs};
pub use help::{get_log_level, DEFAULT_LOG_LEVEL};
pub use router::{execute_command, Invocation};
