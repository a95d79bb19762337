//! Utilities: logging setup (tracing, stderr only), verbosity mapping and adb path resolution.
//!
//! stdout belongs to the MCP protocol when serving, so every log line goes to stderr.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map `-q` / `-v` / `-vv` onto a tracing level.
pub fn derive_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the CLI-derived level.
pub fn init_logging(level: Level) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Environment fallback for the adb binary.
pub const ADB_PATH_ENV: &str = "ADB_PATH";

/// CLI flag > `ADB_PATH` > `adb` on `PATH`. An explicitly empty value is rejected.
pub fn resolve_adb_path(flag: Option<String>, env: Option<String>) -> Result<String, String> {
    match flag {
        Some(p) if p.trim().is_empty() => Err("--adb must not be empty".to_string()),
        Some(p) => Ok(p),
        None => match env {
            Some(p) if p.trim().is_empty() => Err(format!("{ADB_PATH_ENV} is set but empty")),
            Some(p) => Ok(p),
            None => Ok("adb".to_string()),
        },
    }
}
