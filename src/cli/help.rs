//! Verbosity utilities

/// Map `-v` occurrences to a tracing filter directive.
///
/// `None` means no flag was given, leaving the choice to `RUST_LOG` or the
/// configured level.
pub fn get_log_level(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Level used when neither flags, `RUST_LOG` nor config pick one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
