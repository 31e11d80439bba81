//! URI and output-path resolution.
//!
//! Pure string transformations shared by every view: slugs, site-relative
//! URIs, and the deploy-tree paths they map to. Slugs are always derived
//! from plain text, so callers strip HTML before slugging titles.

use anyhow::{Context, Result};
use deunicode::deunicode;
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^<]+?>").unwrap());

/// Slug a string: transliterate to ASCII, lowercase, collapse non-word
/// runs into a single `-`, trim separators at both ends.
///
/// Idempotent: `slugify(slugify(x)) == slugify(x)`.
pub fn slugify(unslugged: &str) -> String {
    let ascii = deunicode(unslugged);
    NON_WORD
        .replace_all(ascii.trim(), "-")
        .to_lowercase()
        .trim_matches('-')
        .to_owned()
}

/// Strip HTML tag markup from a string, keeping the text content.
pub fn strip_html_tags(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}

/// Output path for a named page: `prefix/<slug(name)>/index.html`.
///
/// An empty name resolves to `prefix/index.html` (the index of the prefix
/// directory itself). When `make_dirs` is set the parent directory is
/// created on disk; this is the only function in the module with a side
/// effect.
pub fn link_to(name: &str, prefix: &Path, make_dirs: bool) -> Result<PathBuf> {
    let slug = slugify(name);
    let dir = if slug.is_empty() {
        prefix.to_path_buf()
    } else {
        prefix.join(slug)
    };

    if make_dirs {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    Ok(dir.join("index.html"))
}

/// Site-relative URI for a named page: `/<base>/<prefix>/<slug(name)>`.
///
/// Empty segments are skipped, so an unset base path never produces `//`.
pub fn uri_to(name: &str, segments: &[&str]) -> String {
    let slug = slugify(name);
    let mut parts: Vec<&str> = segments
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect();
    if !slug.is_empty() {
        parts.push(&slug);
    }
    format!("/{}", parts.join("/"))
}

/// Join an absolute site URI onto the canonical base URI.
pub fn absolute_uri(canonical: &str, uri: &str) -> String {
    format!("{}{}", canonical.trim_end_matches('/'), uri)
}
