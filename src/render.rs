//! Template rendering and incremental output.
//!
//! A [`Templates`] instance holds one minijinja environment for the whole
//! build: the built-in layouts first, then any site template with the same
//! name on top. Every page goes through [`Templates::render`]; every file
//! lands on disk through [`write_if_changed`], which leaves untouched files
//! alone so deploy tools can rely on modification times.

use crate::{config::SiteConfig, uri};
use anyhow::{Context, Result};
use minijinja::Environment;
use serde_json::Value;
use std::{collections::HashMap, fs, path::Path, sync::Arc};

/// Built-in layouts compiled into the binary. A site overrides one by
/// dropping a file with the same name into its template directory.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("embed/templates/base.html")),
    ("entry.html", include_str!("embed/templates/entry.html")),
    ("page.html", include_str!("embed/templates/page.html")),
    ("entries.html", include_str!("embed/templates/entries.html")),
    ("archive.html", include_str!("embed/templates/archive.html")),
    ("catlist.html", include_str!("embed/templates/catlist.html")),
    ("cat.html", include_str!("embed/templates/cat.html")),
    ("tag.html", include_str!("embed/templates/tag.html")),
    ("tagcloud.html", include_str!("embed/templates/tagcloud.html")),
];

/// Template engine for the whole build.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Build the environment: built-in layouts, site overrides, helper
    /// functions and the `trans` string table for the site language.
    pub fn load(config: &SiteConfig) -> Result<Self> {
        let mut env = Environment::new();

        for &(name, source) in BUILTIN_TEMPLATES {
            env.add_template(name, source)
                .with_context(|| format!("broken built-in template `{name}`"))?;
        }

        let templates_dir = config.templates_dir();
        if templates_dir.is_dir() {
            for entry in fs::read_dir(&templates_dir)? {
                let path = entry?.path();
                let is_template = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
                if !path.is_file() || !is_template {
                    continue;
                }

                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let source = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read template `{}`", path.display()))?;
                env.add_template_owned(name.clone(), source)
                    .with_context(|| format!("failed to parse template `{name}`"))?;
            }
        }

        env.add_function("slugify", |text: String| uri::slugify(&text));
        env.add_function("strip_html_tags", |text: String| {
            uri::strip_html_tags(&text)
        });

        let table = Arc::new(translations(config)?);
        env.add_function("trans", move |key: String| {
            table.get(&key).cloned().unwrap_or(key)
        });

        Ok(Self { env })
    }

    /// Render one template with a JSON context.
    pub fn render(&self, name: &str, context: &Value) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .with_context(|| format!("unknown template `{name}`"))?;
        template
            .render(context)
            .with_context(|| format!("failed to render `{name}`"))
    }
}

/// Interface string table for the site language, from
/// `locale/<language>.toml` in the site root. Missing file means untranslated
/// template strings pass through as-is.
fn translations(config: &SiteConfig) -> Result<HashMap<String, String>> {
    let path = config
        .root
        .join("locale")
        .join(format!("{}.toml", config.base.language));
    if !path.is_file() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read `{}`", path.display()))?;
    let table: HashMap<String, String> = toml::from_str(&content)
        .with_context(|| format!("malformed string table `{}`", path.display()))?;
    Ok(table)
}

/// Write `content` to `path` only when the bytes on disk differ.
///
/// The content goes to a temporary sibling first and is byte-compared
/// against the existing file; the sibling either replaces the output or is
/// removed, so the output keeps its bytes and mtime when nothing changed.
/// Returns whether the file was actually (re)written. Parent directories
/// are created as needed.
pub fn write_if_changed(path: &Path, content: &[u8]) -> Result<bool> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create `{}`", parent.display()))?;
    }

    let staged = temp_sibling(path);
    fs::write(&staged, content)
        .with_context(|| format!("failed to write `{}`", staged.display()))?;

    let changed = match fs::read(path) {
        Ok(existing) => existing != content,
        Err(_) => true,
    };

    if changed {
        if let Err(err) = fs::rename(&staged, path) {
            let _ = fs::remove_file(&staged);
            return Err(err)
                .with_context(|| format!("failed to write `{}`", path.display()));
        }
    } else {
        fs::remove_file(&staged)
            .with_context(|| format!("failed to remove `{}`", staged.display()))?;
    }

    Ok(changed)
}

/// Hidden sibling the content is staged in before the byte comparison.
fn temp_sibling(path: &Path) -> std::path::PathBuf {
    let mut name = std::ffi::OsString::from(".");
    if let Some(file) = path.file_name() {
        name.push(file);
    }
    name.push(".tmp");
    path.with_file_name(name)
}

// ============================================================================
// Tests
// ============================================================================
