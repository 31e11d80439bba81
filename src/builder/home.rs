//! Home page generation with pagination.

use super::Builder;
use crate::uri;
use anyhow::Result;
use serde_json::{Value, json};

impl Builder<'_> {
    /// Render the paginated home listing: newest entries first, page 1 at
    /// the site root, later pages under `page/<n>/`.
    ///
    /// A site with zero public entries still gets its root index page.
    pub fn gen_home(&mut self) -> Result<()> {
        let pattern = self.config.build.date_format.home.clone();
        let entries: Vec<_> = self
            .public_entries()?
            .iter()
            .map(|doc| self.project(doc, &pattern))
            .collect();

        let per_page = self.config.build.max_entries;
        let total_pages = entries.len().div_ceil(per_page).max(1);

        for page in 1..=total_pages {
            let slice = entries
                .iter()
                .skip((page - 1) * per_page)
                .take(per_page)
                .collect::<Vec<_>>();

            let path = if page == 1 {
                uri::link_to("", &self.deploy(), true)?
            } else {
                uri::link_to(&page.to_string(), &self.deploy().join("page"), true)?
            };

            let context = json!({
                "entries": slice,
                "cur_page": page,
                "total_pages": total_pages,
                "prev_uri": prev_uri(page),
                "next_uri": next_uri(page, total_pages),
            });
            self.render_to("entries.html", context, &path)?;
        }

        Ok(())
    }
}

fn prev_uri(page: usize) -> Value {
    match page {
        1 => Value::Null,
        2 => json!("/"),
        n => json!(format!("/page/{}", n - 1)),
    }
}

fn next_uri(page: usize, total_pages: usize) -> Value {
    if page < total_pages {
        json!(format!("/page/{}", page + 1))
    } else {
        Value::Null
    }
}
