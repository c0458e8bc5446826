//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Public site URL used when none is configured.
pub const DEFAULT_SITE_URL: &str = "https://www.weswwim.com";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Public site URL, without a trailing slash (default: https://www.weswwim.com).
    pub site_url: String,

    /// Directory of Tera templates overriding the built-in ones.
    pub templates_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            templates_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let site_url = match env::var("SITE_URL") {
            Ok(value) => parse_site_url(&value)?,
            Err(_) => DEFAULT_SITE_URL.to_string(),
        };

        let templates_dir = env::var("TEMPLATES_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            site_url,
            templates_dir,
        })
    }
}

/// Validate a site URL and strip any trailing slash.
fn parse_site_url(value: &str) -> Result<String> {
    let trimmed = value.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed).context("SITE_URL must be an absolute URL")?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("SITE_URL must use http or https, got {}", parsed.scheme());
    }
    Ok(trimmed.to_string())
}
