//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Storefront base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Catalog category path under the base URL
    #[serde(default = "default_category_path")]
    pub category_path: String,

    /// First listing page to fetch (1-based)
    #[serde(default = "default_first_page")]
    pub first_page: u32,

    /// Last listing page to fetch, inclusive
    #[serde(default = "default_last_page")]
    pub last_page: u32,

    /// Items requested per listing page (`product_list_limit`)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Path to the Chromium binary used for rendering
    #[serde(default = "default_chrome_binary")]
    pub chrome_binary: PathBuf,

    /// Seconds to wait for a page's marker element before giving up
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,

    /// Output CSV path
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_base_url() -> String {
    "https://www.normacomics.com".to_string()
}

fn default_category_path() -> String {
    "/comics/comic-americano/marvel-comics.html".to_string()
}

fn default_first_page() -> u32 {
    1
}

fn default_last_page() -> u32 {
    22
}

fn default_page_size() -> u32 {
    72
}

fn default_chrome_binary() -> PathBuf {
    PathBuf::from("/usr/bin/chromium")
}

fn default_wait_timeout_secs() -> u64 {
    10
}

fn default_output() -> PathBuf {
    PathBuf::from("comics_marvel.csv")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            category_path: default_category_path(),
            first_page: default_first_page(),
            last_page: default_last_page(),
            page_size: default_page_size(),
            chrome_binary: default_chrome_binary(),
            wait_timeout_secs: default_wait_timeout_secs(),
            output: default_output(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("norma-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(chrome) = std::env::var("NORMA_CHROME") {
            self.chrome_binary = PathBuf::from(chrome);
        }

        if let Ok(output) = std::env::var("NORMA_OUTPUT") {
            self.output = PathBuf::from(output);
        }

        if let Ok(timeout) = std::env::var("NORMA_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.wait_timeout_secs = t;
            }
        }

        self
    }

    /// Builds the full set of listing-page URLs for the configured range.
    pub fn listing_urls(&self) -> Vec<String> {
        (self.first_page..=self.last_page)
            .map(|page| {
                format!(
                    "{}{}?p={}&product_list_limit={}",
                    self.base_url.trim_end_matches('/'),
                    self.category_path,
                    page,
                    self.page_size
                )
            })
            .collect()
    }
}
