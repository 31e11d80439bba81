//! Site generation: turns the flat content tree into the deploy tree.
//!
//! One [`Builder`] lives for exactly one build. Construction runs the
//! navigation pass over standalone pages, because the resulting link list
//! appears in every later page's layout. After that each `gen_*` method is
//! independent: it re-scans the sources, filters private entries out of the
//! public views, groups and sorts, then renders through the shared template
//! environment and the incremental writer.

mod archive;
mod feed;
mod home;
mod taxonomy;

use crate::{
    config::SiteConfig,
    content::{self, Document},
    log,
    render::{self, Templates},
    uri,
};
use anyhow::{Context, Result};
use chrono::Locale;
use serde::Serialize;
use serde_json::{Value, json};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Entry projection handed to templates: metadata plus computed URIs, with
/// the date already formatted for the view being rendered. Built fresh per
/// view and discarded with it.
#[derive(Debug, Clone, Serialize)]
pub struct ViewEntry {
    pub title: String,
    pub raw_title: String,
    pub summary: String,
    pub date: String,
    pub date_idx: String,
    pub uri: String,
    pub category: String,
    pub category_uri: String,
    pub comments: bool,
    pub tags: Vec<TagRef>,
}

/// A tag name with its listing URI.
#[derive(Debug, Clone, Serialize)]
pub struct TagRef {
    pub name: String,
    pub uri: String,
}

pub struct Builder<'a> {
    config: &'a SiteConfig,
    templates: Templates,
    locale: Locale,
    /// Shared `blog` template context, navigation links included
    blog: Value,
    /// Output paths claimed so far, for collision detection
    claimed: HashSet<PathBuf>,
    /// Files actually (re)written
    updated: usize,
}

impl<'a> Builder<'a> {
    /// Set up the build: template environment, locale, and the navigation
    /// pass over standalone pages.
    pub fn new(config: &'a SiteConfig) -> Result<Self> {
        let locale = config.locale()?;
        let templates = Templates::load(config)?;

        let page_links = navigation_links(config)?;
        let base_uri = match config.base.base_path.trim_matches('/') {
            "" => String::new(),
            base => format!("/{base}"),
        };
        let statics = config.build.statics.to_string_lossy();
        let blog = json!({
            "title": config.base.title,
            "description": config.base.description,
            "lang": config.base.language,
            "base_uri": base_uri,
            "static_uri": format!("{base_uri}/{}", statics.trim_matches('/')),
            "copyright": config.base.copyright,
            "comments": config.build.comments,
            "feed_path": config.build.feed.path.to_string_lossy(),
            "page_links": page_links,
        });

        Ok(Self {
            config,
            templates,
            locale,
            blog,
            claimed: HashSet::new(),
            updated: 0,
        })
    }

    /// Number of output files actually written so far.
    pub fn updated(&self) -> usize {
        self.updated
    }

    // ========================================================================
    // Single-Document Views
    // ========================================================================

    /// Render every dated entry to
    /// `posts/<category>/<YYYY>/<MM>/<DD>/<title>/index.html`.
    ///
    /// Private entries get their page too; they are only absent from the
    /// aggregated views.
    pub fn gen_entries(&mut self) -> Result<()> {
        for doc in self.load_entries()? {
            let entry = self.project(&doc, &self.config.build.date_format.entry);
            let date = doc.meta.date.context("entry without date")?;

            let dir = self
                .deploy()
                .join("posts")
                .join(uri::slugify(&doc.meta.category))
                .join(date.format("%Y").to_string())
                .join(date.format("%m").to_string())
                .join(date.format("%d").to_string());
            let path = uri::link_to(&doc.meta.raw_title(), &dir, true)?;

            let updated =
                doc.meta.updated_fmt(&self.config.build.date_format.entry, self.locale);
            let context = json!({
                "entry": {
                    "title": entry.title,
                    "raw_title": entry.raw_title,
                    "date": entry.date,
                    "updated": updated,
                    "author": doc.meta.author,
                    "category": entry.category,
                    "category_uri": entry.category_uri,
                    "tags": entry.tags,
                    "copyright": doc.meta.copyright,
                    "comments": doc.meta.comments,
                    "content": doc.body_html,
                },
            });
            self.render_to("entry.html", context, &path)?;
        }
        Ok(())
    }

    /// Render every standalone page to `<slug(title)>/index.html`.
    pub fn gen_pages(&mut self) -> Result<()> {
        for path in content::scan(&self.config.pages_dir()) {
            let doc = content::load(&path, &self.config.meta_context(false))?;
            let raw_title = doc.meta.raw_title();
            let out = uri::link_to(&raw_title, &self.deploy(), true)?;

            let context = json!({
                "page": {
                    "title": doc.meta.title,
                    "raw_title": raw_title,
                    "content": doc.body_html,
                },
            });
            self.render_to("page.html", context, &out)?;
        }
        Ok(())
    }

    // ========================================================================
    // Asset Passes
    // ========================================================================

    /// Copy the static asset directory into the deploy tree, under its own
    /// configured name (`static/` by default).
    pub fn copy_static(&mut self) -> Result<()> {
        let source = self.config.static_dir();
        let target = self.deploy().join(&self.config.build.statics);
        self.copy_tree(&source, &target)
    }

    /// Copy each configured extra directory verbatim into the deploy tree.
    pub fn copy_extra_dirs(&mut self) -> Result<()> {
        for dir in &self.config.build.extra_dirs.clone() {
            let source = self.config.root.join(dir);
            if !source.is_dir() {
                log!("warn"; "extra directory `{}` does not exist", source.display());
                continue;
            }
            let target = self.deploy().join(dir);
            self.copy_tree(&source, &target)?;
        }
        Ok(())
    }

    fn copy_tree(&mut self, source: &Path, target: &Path) -> Result<()> {
        if !source.is_dir() {
            return Ok(());
        }
        for entry in WalkDir::new(source) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry.path().strip_prefix(source)?;
            let content = fs::read(entry.path())
                .with_context(|| format!("failed to read `{}`", entry.path().display()))?;
            if render::write_if_changed(&target.join(rel), &content)? {
                self.updated += 1;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Shared Plumbing
    // ========================================================================

    fn deploy(&self) -> PathBuf {
        self.config.deploy_dir()
    }

    /// Scan and load every dated entry, private ones included.
    fn load_entries(&self) -> Result<Vec<Document>> {
        let ctx = self.config.meta_context(true);
        content::scan(&self.config.posts_dir())
            .iter()
            .map(|path| content::load(path, &ctx))
            .collect()
    }

    /// Public entries sorted by full origin timestamp, newest first. The
    /// sort is stable, so scan order breaks same-timestamp ties.
    fn public_entries(&self) -> Result<Vec<Document>> {
        let mut docs: Vec<Document> = self
            .load_entries()?
            .into_iter()
            .filter(|doc| !doc.meta.private)
            .collect();
        docs.sort_by(|a, b| b.meta.date_idx().cmp(&a.meta.date_idx()));
        Ok(docs)
    }

    /// Project a document into a [`ViewEntry`] with the given date pattern.
    fn project(&self, doc: &Document, pattern: &str) -> ViewEntry {
        let meta = &doc.meta;
        let raw_title = meta.raw_title();
        let uri = match meta.date {
            Some(date) => uri::uri_to(
                &raw_title,
                &[
                    "posts",
                    &uri::slugify(&meta.category),
                    &date.format("%Y").to_string(),
                    &date.format("%m").to_string(),
                    &date.format("%d").to_string(),
                ],
            ),
            None => uri::uri_to(&raw_title, &[]),
        };

        ViewEntry {
            title: meta.title.clone(),
            raw_title: raw_title.clone(),
            summary: meta.summary.clone(),
            date: meta.date_fmt(pattern, self.locale),
            date_idx: meta.date_idx(),
            uri,
            category: meta.category.clone(),
            category_uri: uri::uri_to(&meta.category, &["categories"]),
            comments: meta.comments,
            tags: meta
                .tags
                .iter()
                .map(|tag| TagRef {
                    name: tag.clone(),
                    uri: uri::uri_to(tag, &["tags"]),
                })
                .collect(),
        }
    }

    /// Render a template into the deploy tree through the incremental
    /// writer. The shared `blog` context is merged in here; a second claim
    /// on the same output path is loudly logged and last-write-wins.
    fn render_to(&mut self, template: &str, mut context: Value, path: &Path) -> Result<()> {
        if let Value::Object(map) = &mut context {
            map.insert("blog".into(), self.blog.clone());
        }

        if !self.claimed.insert(path.to_path_buf()) {
            log!("warn"; "output collision at `{}`, keeping the last rendering", path.display());
        }

        let html = self.templates.render(template, &context)?;
        if render::write_if_changed(path, html.as_bytes())? {
            log!("build"; "updated {}", path.display());
            self.updated += 1;
        }
        Ok(())
    }
}

/// Navigation pass: ordered (title, URI) pairs for every standalone page
/// whose front matter does not opt out.
fn navigation_links(config: &SiteConfig) -> Result<Vec<Value>> {
    let ctx = config.meta_context(false);
    let mut links = Vec::new();

    for path in content::scan(&config.pages_dir()) {
        let doc = content::load(&path, &ctx)?;
        if !doc.meta.navigation {
            continue;
        }
        let uri = uri::uri_to(&doc.meta.raw_title(), &[]);
        links.push(json!({
            "title": doc.meta.title,
            "uri": uri,
        }));
    }

    Ok(links)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    /// A site skeleton on disk plus its loaded configuration.
    pub(crate) fn site() -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.root = dir.path().to_path_buf();
        config.base.title = "Test Blog".into();
        fs::create_dir_all(config.posts_dir()).unwrap();
        fs::create_dir_all(config.pages_dir()).unwrap();
        (dir, config)
    }

    pub(crate) fn write_post(config: &SiteConfig, file: &str, front: &str, body: &str) {
        fs::write(
            config.posts_dir().join(file),
            format!("---\n{front}---\n\n{body}\n"),
        )
        .unwrap();
    }

    pub(crate) fn write_page(config: &SiteConfig, file: &str, front: &str, body: &str) {
        fs::write(
            config.pages_dir().join(file),
            format!("---\n{front}---\n\n{body}\n"),
        )
        .unwrap();
    }

    #[test]
    fn test_entry_output_path_from_category_and_date() {
        let (_dir, config) = site();
        write_post(
            &config,
            "a.md",
            "title: Hello World\ndate: 2020-04-01\ncategory: Notas Varias\n",
            "body",
        );

        let mut builder = Builder::new(&config).unwrap();
        builder.gen_entries().unwrap();

        let expected = config
            .deploy_dir()
            .join("posts/notas-varias/2020/04/01/hello-world/index.html");
        assert!(expected.is_file(), "missing {}", expected.display());
    }

    #[test]
    fn test_private_entry_still_gets_a_page() {
        let (_dir, config) = site();
        write_post(
            &config,
            "p.md",
            "title: Secret\ndate: 2020-04-01\nprivate: yes\n",
            "body",
        );

        let mut builder = Builder::new(&config).unwrap();
        builder.gen_entries().unwrap();

        assert!(
            config
                .deploy_dir()
                .join("posts/miscellaneous/2020/04/01/secret/index.html")
                .is_file()
        );
        assert!(builder.public_entries().unwrap().is_empty());
    }

    #[test]
    fn test_public_entries_sorted_descending_with_time_tiebreak() {
        let (_dir, config) = site();
        write_post(&config, "a.md", "title: Early\ndate: 2020-04-01 08:00\n", "x");
        write_post(&config, "b.md", "title: Late\ndate: 2020-04-01 20:00\n", "x");
        write_post(&config, "c.md", "title: Old\ndate: 2019-01-01\n", "x");

        let builder = Builder::new(&config).unwrap();
        let titles: Vec<_> = builder
            .public_entries()
            .unwrap()
            .iter()
            .map(|d| d.meta.raw_title())
            .collect();
        assert_eq!(titles, vec!["Late", "Early", "Old"]);
    }

    #[test]
    fn test_navigation_links_respect_opt_out_and_order() {
        let (_dir, config) = site();
        write_page(&config, "a_about.md", "title: About\n", "x");
        write_page(&config, "b_drafts.md", "title: Drafts\nnavigation: no\n", "x");
        write_page(&config, "c_contact.md", "title: Contact\n", "x");

        let links = navigation_links(&config).unwrap();
        let titles: Vec<_> = links.iter().map(|l| l["title"].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["About", "Contact"]);
        assert_eq!(links[0]["uri"], "/about");
    }

    #[test]
    fn test_pages_render_at_slug_root() {
        let (_dir, config) = site();
        write_page(&config, "about.md", "title: About Me\n", "Hi there.");

        let mut builder = Builder::new(&config).unwrap();
        builder.gen_pages().unwrap();

        let out = config.deploy_dir().join("about-me/index.html");
        assert!(out.is_file());
        let html = fs::read_to_string(out).unwrap();
        assert!(html.contains("Hi there."));
    }

    #[test]
    fn test_duplicate_identity_collides_loudly_not_fatally() {
        let (_dir, config) = site();
        write_post(&config, "a.md", "title: Same\ndate: 2020-04-01\n", "first");
        write_post(&config, "b.md", "title: Same\ndate: 2020-04-01\n", "second");

        let mut builder = Builder::new(&config).unwrap();
        builder.gen_entries().unwrap();

        // Last scanned wins on disk
        let html = fs::read_to_string(
            config
                .deploy_dir()
                .join("posts/miscellaneous/2020/04/01/same/index.html"),
        )
        .unwrap();
        assert!(html.contains("second"));
    }

    #[test]
    fn test_copy_static_and_extra_dirs() {
        let (_dir, mut config) = site();
        fs::create_dir_all(config.static_dir().join("css")).unwrap();
        fs::write(config.static_dir().join("css/style.css"), "body{}").unwrap();
        fs::create_dir_all(config.root.join("downloads")).unwrap();
        fs::write(config.root.join("downloads/file.bin"), "data").unwrap();
        config.build.extra_dirs = vec!["downloads".into()];

        let mut builder = Builder::new(&config).unwrap();
        builder.copy_static().unwrap();
        builder.copy_extra_dirs().unwrap();

        // Assets keep their directory name; nothing is flattened into the
        // deploy root
        assert!(config.deploy_dir().join("static/css/style.css").is_file());
        assert!(!config.deploy_dir().join("css/style.css").exists());
        assert!(config.deploy_dir().join("downloads/file.bin").is_file());
        assert_eq!(builder.updated(), 2);
    }
}
