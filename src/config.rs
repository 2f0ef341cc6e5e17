//! Environment-sourced configuration.
//!
//! All settings come from the process environment, read once at startup and
//! passed explicitly into the server rather than re-read at call time:
//!
//! - `PORT` - listen port, default 3000
//! - `YOUTUBE_API_KEY` - optional API key the `/feed` route gates on
//! - `STATIC_DIR` - directory served for non-route paths, default `.`
//!
//! Custom Debug impl masks the API key to prevent secret leakage in logs,
//! error messages, and debug output.

use std::path::PathBuf;

/// Runtime configuration for the server adapter.
#[derive(Clone)]
pub struct Config {
    /// TCP port the HTTP server listens on.
    pub port: u16,

    /// API key read from the environment at startup. The `/feed` route
    /// refuses to run without it, although the fetch path never sends it
    /// (see DESIGN.md).
    pub api_key: Option<String>,

    /// Directory served as static files for paths no route claims.
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            api_key: None,
            static_dir: PathBuf::from("."),
        }
    }
}

/// Mask the API key in Debug output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("PORT").ok().as_deref(),
            std::env::var("YOUTUBE_API_KEY").ok().as_deref(),
            std::env::var("STATIC_DIR").ok().as_deref(),
        )
    }

    /// Builds the configuration from raw variable values.
    ///
    /// An unparseable `PORT` falls back to the default, a blank
    /// `YOUTUBE_API_KEY` counts as absent.
    pub fn from_vars(port: Option<&str>, api_key: Option<&str>, static_dir: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            port: port
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from),
            static_dir: static_dir.map(PathBuf::from).unwrap_or(defaults.static_dir),
        }
    }
}
