//! Build orchestration.
//!
//! One fixed, order-significant sequence. The navigation pass runs inside
//! [`Builder::new`] because every later render consumes its output through
//! the shared layout context; the remaining steps only share the deploy
//! tree, never data.

use crate::{builder::Builder, config::SiteConfig, log};
use anyhow::Result;
use std::time::Instant;

/// Run one full site build. Returns how many output files were actually
/// (re)written; an unchanged site reports zero.
pub fn build_site(config: &SiteConfig) -> Result<usize> {
    config.validate()?;
    let started = Instant::now();

    let mut builder = Builder::new(config)?;
    builder.gen_entries()?;
    builder.gen_pages()?;
    builder.gen_archive()?;
    builder.gen_categories()?;
    builder.gen_category_list()?;
    builder.gen_tags()?;
    builder.gen_tag_cloud()?;
    builder.gen_home()?;
    builder.gen_feed()?;
    builder.copy_static()?;
    builder.copy_extra_dirs()?;

    let updated = builder.updated();
    log!("build"; "finished in {:.2?}, {updated} files updated", started.elapsed());
    Ok(updated)
}
