//! # instpack
//!
//! Packs a directory of instance files into a single aggregate file named
//! after the directory.
//!
//! ## Usage
//!
//! ```bash
//! instpack [pack] [DIR] [-e PATTERN]... [-o OUTPUT] [--placeholder N]
//! instpack list [DIR]
//! ```
//!
//! ## Modules
//!
//! - `cli` - Argument parsing and command routing
//! - `config` - TOML configuration with environment overrides
//! - `error` - Library error type
//! - `pack` - Directory snapshot, instance parsing and aggregate writing
pub mod cli;
pub mod config;
pub mod error;
pub mod pack;

pub use error::{Error, Result};
