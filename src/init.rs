//! Site initialization module.
//!
//! Creates new site structure with default configuration and one sample
//! post.

use crate::config::SiteConfig;
use anyhow::{Context, Result, bail};
use chrono::Local;
use std::{fs, path::Path};

/// Default config filename
const CONFIG_FILE: &str = "prosa.toml";

/// Default site directory structure
const SITE_DIRS: &[&str] = &["posts", "pages", "static", "templates"];

const SAMPLE_POST: &str = "\
---
title: First entry
summary: The obligatory hello-world post
tags: meta
---

Welcome to your new blog. Edit or delete this file under `posts/` and run
`prosa build` again.
";

const SAMPLE_PAGE: &str = "\
---
title: About
---

Tell your readers who you are.
";

/// Create a new site with default structure
pub fn new_site(root: &Path, has_name: bool) -> Result<()> {
    // When initializing in the current directory (no name given) it must
    // be completely empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `prosa init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(root)?;
    init_default_config(root)?;
    init_sample_content(root)?;
    init_ignore_file(root)?;

    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(root: &Path) -> Result<()> {
    let mut config = SiteConfig::default();
    config.base.title = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "My Blog".into());

    let content = toml::to_string_pretty(&config)?;
    fs::write(root.join(CONFIG_FILE), content)?;
    Ok(())
}

/// Create site directory structure
fn init_site_structure(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `prosa init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Drop a dated sample post and an About page into the fresh tree
fn init_sample_content(root: &Path) -> Result<()> {
    let today = Local::now().format("%Y-%m-%d").to_string();
    let post = SAMPLE_POST.replace("---\ntitle:", &format!("---\ndate: {today}\ntitle:"));

    fs::write(root.join("posts/first-entry.md"), post)?;
    fs::write(root.join("pages/about.md"), SAMPLE_PAGE)?;
    Ok(())
}

/// Keep the deploy directory out of version control
fn init_ignore_file(root: &Path) -> Result<()> {
    let path = root.join(".gitignore");
    if !path.exists() {
        fs::write(&path, "_build/\n")?;
    }
    Ok(())
}
