//! Front-matter metadata extraction and validation.
//!
//! Field names may be written in English, Catalan, Galician, Spanish or
//! Portuguese (without accents: "título" must be spelled "titulo"). Each
//! logical field resolves through an ordered alias table; the first alias
//! present in the raw mapping wins and aliases are never merged.
//!
//! A [`Meta`] record is validated once at construction and immutable
//! afterwards. Slugs, output paths and URIs are always computed from its
//! fields, never stored.

use crate::{markup, uri};
use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime};
use std::{collections::HashMap, path::Path, path::PathBuf};
use thiserror::Error;

/// Raw front-matter mapping: lowercase field name to one or more values.
pub type RawMeta = HashMap<String, Vec<String>>;

// ============================================================================
// Alias Tables
// ============================================================================
//
// Adding a language is a one-line data change; resolution order is the
// priority order.

const TITLE_KEYS: &[&str] = &["title", "titulo", "titol", "entry", "entrada", "post"];
const SUMMARY_KEYS: &[&str] = &["summary", "resumo", "resumen", "resum"];
const CATEGORY_KEYS: &[&str] = &["category", "categoria"];
const AUTHOR_KEYS: &[&str] = &["authors", "author", "autores", "autors", "autor"];
const EMAIL_KEYS: &[&str] = &[
    "email",
    "e-mail",
    "correo electronico",
    "correo",
    "correu",
    "e-correo",
];
const LANGUAGE_KEYS: &[&str] = &["language", "idioma", "lengua", "lingua", "llengua"];
const DATE_KEYS: &[&str] = &["date", "data", "fecha"];
const UPDATED_KEYS: &[&str] = &["updated", "actualizado", "actualitzat"];
const TAGS_KEYS: &[&str] = &["tags", "etiquetas", "etiquetes"];
const COPYRIGHT_KEYS: &[&str] = &["copyright", "license", "licencia", "licenza", "llicencia", "(c)"];
const COMMENTS_KEYS: &[&str] = &["comments", "comentarios", "comentaris"];
const PRIVATE_KEYS: &[&str] = &["private", "privado", "privat"];
const NAVIGATION_KEYS: &[&str] = &["navigation", "navegacion", "navegacio", "navegacao"];

/// Affirmative tokens across the supported languages
const TRUE_TOKENS: &[&str] = &["yes", "si", "sí", "sim", "jes", "true"];

/// Negative tokens across the supported languages
const FALSE_TOKENS: &[&str] = &["no", "non", "não", "nao", "ne", "false"];

/// Date formats accepted in front matter, tried in order.
///
/// Formats carrying a time-of-day come first so the full timestamp survives
/// for sort tie-breaking.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

// ============================================================================
// Errors
// ============================================================================

/// Fatal metadata validation errors, tagged with the offending file.
///
/// A malformed post must abort the whole build; skipping it would silently
/// drop it from every feed and archive.
#[derive(Debug, Error)]
pub enum MetaError {
    #[error("missing or empty title in `{0}`")]
    MissingTitle(PathBuf),

    #[error("missing required date in `{0}`")]
    MissingDate(PathBuf),

    #[error("unparseable date `{1}` in `{0}`")]
    BadDate(PathBuf, String),
}

// ============================================================================
// Construction Context
// ============================================================================

/// Site-level defaults applied while constructing a record.
#[derive(Debug, Clone, Copy)]
pub struct MetaContext<'a> {
    /// Category used when the front matter names none
    pub default_category: &'a str,
    /// Fallback author
    pub site_author: &'a str,
    /// Fallback author email
    pub site_email: &'a str,
    /// Fallback content language
    pub site_language: &'a str,
    /// Entries must carry an origin date; standalone pages need not
    pub date_required: bool,
}

// ============================================================================
// Metadata Record
// ============================================================================

/// Validated, immutable metadata for one content file.
#[derive(Debug, Clone)]
pub struct Meta {
    /// Title as inline HTML (Markdown rendered, paragraph markers stripped)
    pub title: String,
    /// Origin date; `None` only for standalone pages
    pub date: Option<NaiveDateTime>,
    /// Last-modified date, if declared
    pub updated: Option<NaiveDateTime>,
    /// Category, defaulted from the site configuration
    pub category: String,
    /// Tags in declaration order, duplicates preserved
    pub tags: Vec<String>,
    /// Author, defaulted to the site author
    pub author: String,
    /// Author email, defaulted to the site email
    pub email: String,
    /// Summary as inline HTML
    pub summary: String,
    /// Copyright notice as inline HTML
    pub copyright: String,
    /// Content language, defaulted to the site language
    pub language: String,
    /// Excluded from every public aggregated view when set
    pub private: bool,
    /// Whether the entry accepts comments
    pub comments: bool,
    /// Pages only: include in the navigation link list
    pub navigation: bool,
}

impl Meta {
    /// Build a validated record from a raw front-matter mapping.
    pub fn from_raw(raw: &RawMeta, source: &Path, ctx: &MetaContext) -> Result<Self, MetaError> {
        let title = resolve(raw, TITLE_KEYS)
            .map(|t| markup::render_inline(&t))
            .unwrap_or_default();
        if uri::strip_html_tags(&title).trim().is_empty() {
            return Err(MetaError::MissingTitle(source.to_path_buf()));
        }

        let date = match resolve(raw, DATE_KEYS) {
            Some(text) => Some(
                parse_date(&text).ok_or_else(|| MetaError::BadDate(source.to_path_buf(), text))?,
            ),
            None if ctx.date_required => return Err(MetaError::MissingDate(source.to_path_buf())),
            None => None,
        };

        let updated = match resolve(raw, UPDATED_KEYS) {
            Some(text) => Some(
                parse_date(&text).ok_or_else(|| MetaError::BadDate(source.to_path_buf(), text))?,
            ),
            None => None,
        };

        Ok(Self {
            title,
            date,
            updated,
            category: resolve(raw, CATEGORY_KEYS)
                .unwrap_or_else(|| ctx.default_category.to_owned()),
            tags: resolve_tags(raw),
            author: resolve(raw, AUTHOR_KEYS).unwrap_or_else(|| ctx.site_author.to_owned()),
            email: resolve(raw, EMAIL_KEYS).unwrap_or_else(|| ctx.site_email.to_owned()),
            summary: resolve(raw, SUMMARY_KEYS)
                .map(|s| markup::render_inline(&s))
                .unwrap_or_default(),
            copyright: resolve(raw, COPYRIGHT_KEYS)
                .map(|s| markup::render_inline(&s))
                .unwrap_or_default(),
            language: resolve(raw, LANGUAGE_KEYS).unwrap_or_else(|| ctx.site_language.to_owned()),
            private: resolve_bool(raw, PRIVATE_KEYS, false),
            comments: resolve_bool(raw, COMMENTS_KEYS, true),
            navigation: resolve_bool(raw, NAVIGATION_KEYS, true),
        })
    }

    /// Title with all HTML markup stripped, safe for slugs and feed ids.
    pub fn raw_title(&self) -> String {
        uri::strip_html_tags(&self.title)
    }

    /// URL slug derived from the plain-text title.
    pub fn slug(&self) -> String {
        uri::slugify(&self.raw_title())
    }

    /// Origin date rendered with a caller-supplied pattern and locale.
    ///
    /// Empty string when the record has no date.
    pub fn date_fmt(&self, pattern: &str, locale: Locale) -> String {
        format_date(self.date, pattern, locale)
    }

    /// Modified date rendered with a caller-supplied pattern and locale.
    pub fn updated_fmt(&self, pattern: &str, locale: Locale) -> String {
        format_date(self.updated, pattern, locale)
    }

    /// Zero-padded full-timestamp sort key (`%Y-%m-%d %H:%M:%S`).
    ///
    /// Lexicographic order on this string is chronological order, including
    /// the time-of-day tie-break for same-day entries.
    pub fn date_idx(&self) -> String {
        format_date(self.date, "%Y-%m-%d %H:%M:%S", Locale::POSIX)
    }

    /// The timestamp a feed should expose as "updated": the modified date
    /// when present, the origin date otherwise.
    pub fn feed_updated(&self) -> Option<NaiveDateTime> {
        self.updated.or(self.date)
    }
}

// ============================================================================
// Resolution Helpers
// ============================================================================

/// First-match alias lookup; multiple values joined with a single space
/// (multi-line front-matter continuation).
fn resolve(raw: &RawMeta, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| raw.get(*key))
        .filter(|values| !values.is_empty())
        .map(|values| values.join(" "))
}

/// Boolean field with a per-field default truth value.
///
/// A field defaulting to true turns false only on an explicit negative
/// token; a field defaulting to false turns true only on an explicit
/// affirmative token. Unrecognized tokens keep the default.
fn resolve_bool(raw: &RawMeta, keys: &[&str], default: bool) -> bool {
    let Some(token) = resolve(raw, keys) else {
        return default;
    };
    let token = token.trim().to_lowercase();

    if default {
        !FALSE_TOKENS.contains(&token.as_str())
    } else {
        TRUE_TOKENS.contains(&token.as_str())
    }
}

/// Comma-split tag list: trimmed, empty pieces dropped, order preserved,
/// no case folding and no deduplication.
fn resolve_tags(raw: &RawMeta) -> Vec<String> {
    let Some(joined) = TAGS_KEYS
        .iter()
        .find_map(|key| raw.get(*key))
        .map(|values| values.join(","))
    else {
        return Vec::new();
    };

    joined
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parse free-form date text against the accepted format tables.
///
/// RFC 3339 with an offset is accepted as well; the offset is dropped and
/// the local wall-clock time kept.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

fn format_date(date: Option<NaiveDateTime>, pattern: &str, locale: Locale) -> String {
    date.map(|d| d.and_utc().format_localized(pattern, locale).to_string())
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================
