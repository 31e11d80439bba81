//! `[base]` section configuration.
//!
//! Site identity: name, author, canonical URI, language and locale.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in prosa.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "My Blog"
/// description = "A personal blog about typography"
/// author = "Alice"
/// url = "https://myblog.com"
/// locale = "en_US.UTF-8"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title, also the feed title.
    pub title: String,

    /// Site description, used as the feed subtitle.
    #[serde(default = "defaults::base::description")]
    #[educe(Default = defaults::base::description())]
    pub description: String,

    /// Default author for entries that do not name one.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Default author email for the feed.
    #[serde(default = "defaults::base::email")]
    #[educe(Default = defaults::base::email())]
    pub email: String,

    /// Canonical URI for absolute links in the feed.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// Path prefix when the site lives below the domain root
    /// (e.g. "blog" for example.com/blog). Usually empty.
    #[serde(default = "defaults::base::base_path")]
    #[educe(Default = defaults::base::base_path())]
    pub base_path: String,

    /// Default content language code (e.g. "en", "es").
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Locale for date formatting (e.g. "en_US.UTF-8", "es_ES").
    /// Passed explicitly into every formatting call; the process-wide
    /// locale is never touched.
    #[serde(default = "defaults::base::locale")]
    #[educe(Default = defaults::base::locale())]
    pub locale: String,

    /// Copyright notice for the feed and site footer.
    #[serde(default)]
    pub copyright: String,
}
