//! Logging configuration for hivedash.
//!
//! The dashboard owns the terminal while it runs, so the default sink is a
//! log file rather than stderr. Stderr logging is available for debugging
//! outside the TUI.

use std::fs::{self, File};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Initializes logging for TUI mode.
///
/// Logs are written to a file to avoid corrupting the terminal display.
/// Location: `~/.local/state/hivedash/hivedash.log` on Linux (XDG state
/// directory), or the platform-appropriate directory on other systems.
///
/// Returns the log file path so startup can report where logs went, or
/// `None` if no writable location was found (logging is then disabled
/// rather than risking TUI corruption).
pub fn init_file_logging() -> Option<PathBuf> {
    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory: {e}");
            return None;
        }
    }

    // Truncate on each run to avoid unbounded growth
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file: {e}");
            return None;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(log_file)
        .with_ansi(false) // No ANSI colors in file output
        .init();

    Some(log_path)
}

/// Initializes logging to stderr.
///
/// Useful when running with `--stderr-log` to see logs live, at the cost of
/// interleaving with the TUI.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Returns the path for the log file.
///
/// Uses the XDG state directory on Linux (`~/.local/state/hivedash/hivedash.log`),
/// or falls back to the config directory on other platforms.
pub fn get_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        return state_dir.join("hivedash").join("hivedash.log");
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("hivedash").join("hivedash.log");
    }

    // Last resort: temp directory
    std::env::temp_dir().join("hivedash.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_is_absolute() {
        let path = get_log_path();
        assert!(path.is_absolute());
    }

    #[test]
    fn test_log_path_ends_with_hivedash_log() {
        let path = get_log_path();
        assert!(path.ends_with("hivedash.log"));
    }
}
