//! Site configuration management for `prosa.toml`.
//!
//! # Sections
//!
//! | Section   | Purpose                                            |
//! |-----------|----------------------------------------------------|
//! | `[base]`  | Site identity (title, author, url, locale)         |
//! | `[build]` | Directory layout, pagination, feed, date formats   |
//! | `[serve]` | Development server (port, interface)               |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Blog"
//! description = "A personal blog"
//! url = "https://example.com"
//! locale = "en_US.UTF-8"
//!
//! [build]
//! output = "_build"
//! max_entries = 10
//!
//! [build.feed]
//! format = "atom"
//!
//! [serve]
//! port = 4000
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod serve;

// Re-export public types used by other modules
pub use build::{BuildConfig, DateFormatConfig, FeedConfig};
pub use error::ConfigError;

use base::BaseConfig;
use serve::ServeConfig;

use crate::meta::MetaContext;
use anyhow::{Result, bail};
use chrono::Locale;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing prosa.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Site root directory (set after loading)
    #[serde(skip)]
    pub root: PathBuf,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from a site root and config file name.
    pub fn load(root: &Path, config_file: &Path) -> Result<Self> {
        let config_path = root.join(config_file);
        let content = fs::read_to_string(&config_path)
            .map_err(|err| ConfigError::Io(config_path.clone(), err))?;

        let mut config = Self::from_str(&content)?;
        config.root = root.to_path_buf();
        config.config_path = config_path;
        Ok(config)
    }

    // ========================================================================
    // Derived Paths
    // ========================================================================

    /// Source directory holding dated entries.
    pub fn posts_dir(&self) -> PathBuf {
        self.root.join(&self.build.posts)
    }

    /// Source directory holding standalone pages.
    pub fn pages_dir(&self) -> PathBuf {
        self.root.join(&self.build.pages)
    }

    /// Deploy root the site is generated into. Includes the base path so
    /// the on-disk tree mirrors the served URI space.
    pub fn deploy_dir(&self) -> PathBuf {
        let output = self.root.join(&self.build.output);
        let base = self.base.base_path.trim_matches('/');
        if base.is_empty() {
            output
        } else {
            output.join(base)
        }
    }

    /// Static asset source directory.
    pub fn static_dir(&self) -> PathBuf {
        self.root.join(&self.build.statics)
    }

    /// Site template directory.
    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(&self.build.templates)
    }

    /// Output path of the syndication feed.
    pub fn feed_path(&self) -> PathBuf {
        self.deploy_dir().join(&self.build.feed.path)
    }

    // ========================================================================
    // Derived Values
    // ========================================================================

    /// Date-formatting locale, resolved from `[base].locale`.
    ///
    /// The encoding suffix ("en_US.UTF-8") is ignored. An unknown locale is
    /// a configuration error, caught by `validate()` before any content is
    /// processed.
    pub fn locale(&self) -> Result<Locale> {
        let name = self.base.locale.split('.').next().unwrap_or_default();
        let name = name.replace('-', "_");
        Locale::try_from(name.as_str()).map_err(|_| {
            ConfigError::Validation(format!("unsupported locale `{}`", self.base.locale)).into()
        })
    }

    /// Construction context for metadata records.
    pub fn meta_context(&self, date_required: bool) -> MetaContext<'_> {
        MetaContext {
            default_category: &self.build.default_category,
            site_author: &self.base.author,
            site_email: &self.base.email,
            site_language: &self.base.language,
            date_required,
        }
    }

    /// Validate configuration before any content processing begins.
    pub fn validate(&self) -> Result<()> {
        self.locale()?;

        if let Some(url) = &self.base.url
            && !url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if self.build.max_entries == 0 {
            bail!(ConfigError::Validation(
                "[build.max_entries] must be at least 1".into()
            ));
        }

        if self.build.tag_cloud_steps.is_empty() {
            bail!(ConfigError::Validation(
                "[build.tag_cloud_steps] must not be empty".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
