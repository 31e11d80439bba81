//! Content discovery and loading.
//!
//! Scans the posts/ and pages/ source directories for Markdown files,
//! splits YAML front matter from the body and hands the raw field mapping
//! to [`crate::meta`] for validation.

use crate::{
    markup,
    meta::{Meta, MetaContext, RawMeta},
};
use anyhow::{Context, Result, anyhow};
use gray_matter::{Matter, engine::YAML};
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// File extensions recognized as Markdown sources.
const MARKDOWN_EXTS: &[&str] = &["md", "mkdn", "markdown"];

/// One fully loaded content file.
#[derive(Debug, Clone)]
pub struct Document {
    /// Validated front-matter record
    pub meta: Meta,
    /// Body rendered to HTML
    pub body_html: String,
    /// Source file the document came from
    pub source: PathBuf,
}

/// List the Markdown files directly inside `dir`, in name order.
///
/// A missing directory is an empty site, not an error. Subdirectories are
/// not descended into; the output tree layout comes from metadata, never
/// from the source layout.
pub fn scan(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| MARKDOWN_EXTS.contains(&ext.to_lowercase().as_str()))
        })
        .collect();

    files.sort();
    files
}

/// Load and validate a single content file.
pub fn load(path: &Path, ctx: &MetaContext) -> Result<Document> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read `{}`", path.display()))?;

    let (fields, body) = front_matter(&raw)
        .with_context(|| format!("malformed front matter in `{}`", path.display()))?;
    let meta = Meta::from_raw(&fields, path, ctx)?;

    Ok(Document {
        meta,
        body_html: markup::convert(&body),
        source: path.to_path_buf(),
    })
}

/// Split a document into its raw front-matter mapping and Markdown body.
///
/// Field names are lowercased so alias lookup is case-insensitive. Scalar
/// values become a single entry, lists keep one entry per element. A file
/// without a front-matter block yields an empty mapping, which the metadata
/// validation then rejects for lacking a title.
pub fn front_matter(raw: &str) -> Result<(RawMeta, String)> {
    let matter: Matter<YAML> = Matter::new();
    let parsed = matter
        .parse::<Value>(raw)
        .map_err(|err| anyhow!("{err}"))?;

    let mut fields = RawMeta::new();
    if let Some(Value::Object(map)) = parsed.data {
        for (key, value) in map {
            let values = match value {
                Value::Null => Vec::new(),
                Value::String(s) => vec![s],
                Value::Array(items) => items.into_iter().map(scalar_to_string).collect(),
                other => vec![scalar_to_string(other)],
            };
            fields.insert(key.trim().to_lowercase(), values);
        }
    }

    Ok((fields, parsed.content))
}

fn scalar_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
