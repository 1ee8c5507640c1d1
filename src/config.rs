//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;

use crate::bible::OutputOrder;
use crate::constants::{corpus, env as keys};
use crate::error::{Error, Result};

/// Configuration for the finder and the corpus scanner.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Ordering of references in output
    pub order: OutputOrder,
    /// File extensions (without dot, lowercase) scanned in directories
    pub extensions: Vec<String>,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            order: OutputOrder::default(),
            extensions: corpus::DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            pretty: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(order) = lookup(keys::ORDER) {
            config.order = OutputOrder::from_name(&order).ok_or_else(|| {
                Error::config(
                    format!("unknown {} value `{order}`", keys::ORDER),
                    "Use `canonical` or `text`",
                )
            })?;
        }

        if let Some(extensions) = lookup(keys::EXTENSIONS) {
            let parsed = parse_extensions(&extensions);
            if parsed.is_empty() {
                return Err(Error::config(
                    format!("{} lists no extensions", keys::EXTENSIONS),
                    "Set a comma-separated list such as `txt,md`",
                ));
            }
            config.extensions = parsed;
        }

        if let Some(pretty) = lookup(keys::PRETTY) {
            config.pretty = parse_flag(&pretty).ok_or_else(|| {
                Error::config(
                    format!("unknown {} value `{pretty}`", keys::PRETTY),
                    "Use `true` or `false`",
                )
            })?;
        }

        tracing::debug!(
            order = config.order.name(),
            extensions = ?config.extensions,
            pretty = config.pretty,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Whether `ext` is one of the configured extensions, ignoring case.
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Split `txt, .MD,,text` into `["txt", "md", "text"]`.
fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
