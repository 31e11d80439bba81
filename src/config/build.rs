//! `[build]` section configuration.
//!
//! Content/deploy directory layout, pagination, category policy, feed
//! format and date-format patterns.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in prosa.toml.
///
/// All directory paths are relative to the site root.
///
/// # Example
/// ```toml
/// [build]
/// posts = "posts"
/// pages = "pages"
/// output = "_build"
/// max_entries = 10
/// default_category = "Miscellaneous"
/// extra_dirs = ["downloads"]
///
/// [build.feed]
/// format = "atom"
///
/// [build.date_format]
/// home = "%b %e, %Y"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Directory holding dated entries (posts).
    #[serde(default = "defaults::build::posts")]
    #[educe(Default = defaults::build::posts())]
    pub posts: PathBuf,

    /// Directory holding standalone pages (About, ...).
    #[serde(default = "defaults::build::pages")]
    #[educe(Default = defaults::build::pages())]
    pub pages: PathBuf,

    /// Deploy directory the generated tree is written into.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Static assets (CSS/JS) copied verbatim.
    #[serde(rename = "static", default = "defaults::build::statics")]
    #[educe(Default = defaults::build::statics())]
    pub statics: PathBuf,

    /// Site template directory; built-in templates fill the gaps.
    #[serde(default = "defaults::build::templates")]
    #[educe(Default = defaults::build::templates())]
    pub templates: PathBuf,

    /// Extra directories copied verbatim into the deploy tree.
    #[serde(default = "defaults::build::extra_dirs")]
    #[educe(Default = defaults::build::extra_dirs())]
    pub extra_dirs: Vec<PathBuf>,

    /// Maximum entries per home page before pagination kicks in.
    #[serde(default = "defaults::build::max_entries")]
    #[educe(Default = defaults::build::max_entries())]
    pub max_entries: usize,

    /// Category assigned to entries that declare none.
    #[serde(default = "defaults::build::default_category")]
    #[educe(Default = defaults::build::default_category())]
    pub default_category: String,

    /// Site-wide switch for comment sections in templates.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub comments: bool,

    /// Tag-cloud display-weight steps; index = occurrence count - 1,
    /// overflow clamps to the last step. Final weight = 100 + step.
    #[serde(default = "defaults::build::tag_cloud_steps")]
    #[educe(Default = defaults::build::tag_cloud_steps())]
    pub tag_cloud_steps: Vec<u32>,

    /// Syndication feed settings.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Per-view date-format patterns (chrono strftime syntax).
    #[serde(default)]
    pub date_format: DateFormatConfig,
}

/// `[build.feed]` section.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    /// "atom" or "rss" (case-insensitive). Anything else disables the feed.
    #[serde(default = "defaults::build::feed::format")]
    #[educe(Default = defaults::build::feed::format())]
    pub format: String,

    /// Feed filename, relative to the deploy root.
    #[serde(default = "defaults::build::feed::path")]
    #[educe(Default = defaults::build::feed::path())]
    pub path: PathBuf,
}

/// `[build.date_format]` section.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct DateFormatConfig {
    /// Date format on single-entry pages.
    #[serde(default = "defaults::build::date_format::entry")]
    #[educe(Default = defaults::build::date_format::entry())]
    pub entry: String,

    /// Date format on the home page listing.
    #[serde(default = "defaults::build::date_format::home")]
    #[educe(Default = defaults::build::date_format::home())]
    pub home: String,

    /// Date format on archive/category/tag listings.
    #[serde(default = "defaults::build::date_format::list")]
    #[educe(Default = defaults::build::date_format::list())]
    pub list: String,
}
