//! Category and tag views.
//!
//! Categories and tags group the same way: exact string match on the
//! normalized value, entries newest first within a bucket. An entry with N
//! tags lands in N tag buckets; an entry has exactly one category.

use super::{Builder, ViewEntry};
use crate::uri;
use anyhow::Result;
use serde_json::json;
use std::collections::BTreeMap;

impl Builder<'_> {
    /// Render one listing page per category under `categories/<slug>/`.
    pub fn gen_categories(&mut self) -> Result<()> {
        for (category, entries) in self.category_buckets()? {
            let path = uri::link_to(&category, &self.deploy().join("categories"), true)?;
            let context = json!({ "category": category, "entries": entries });
            self.render_to("cat.html", context, &path)?;
        }
        Ok(())
    }

    /// Render `categories/index.html`: every category with its entry count.
    pub fn gen_category_list(&mut self) -> Result<()> {
        let categories: Vec<_> = self
            .category_buckets()?
            .into_iter()
            .map(|(name, entries)| {
                json!({
                    "name": name,
                    "uri": uri::uri_to(&name, &["categories"]),
                    "count": entries.len(),
                })
            })
            .collect();

        let path = uri::link_to("", &self.deploy().join("categories"), true)?;
        self.render_to("catlist.html", json!({ "categories": categories }), &path)
    }

    /// Render one listing page per tag under `tags/<slug>/`.
    pub fn gen_tags(&mut self) -> Result<()> {
        for (tag, entries) in self.tag_buckets()? {
            let path = uri::link_to(&tag, &self.deploy().join("tags"), true)?;
            let context = json!({ "tag": tag, "entries": entries });
            self.render_to("tag.html", context, &path)?;
        }
        Ok(())
    }

    /// Render `tags/index.html`: every tag weighted by how often it occurs.
    ///
    /// The weight is `100 + steps[occurrences - 1]`, clamping past the end
    /// of the step table, and is consumed as a percentage font size.
    pub fn gen_tag_cloud(&mut self) -> Result<()> {
        let steps = &self.config.build.tag_cloud_steps;
        let tags: Vec<_> = self
            .tag_buckets()?
            .into_iter()
            .map(|(name, entries)| {
                let step = steps[entries.len().min(steps.len()) - 1];
                json!({
                    "name": name,
                    "uri": uri::uri_to(&name, &["tags"]),
                    "weight": 100 + step,
                })
            })
            .collect();

        let path = uri::link_to("", &self.deploy().join("tags"), true)?;
        self.render_to("tagcloud.html", json!({ "tags": tags }), &path)
    }

    /// Public entries bucketed by category, names sorted, newest entry
    /// first within each bucket.
    fn category_buckets(&self) -> Result<BTreeMap<String, Vec<ViewEntry>>> {
        let pattern = &self.config.build.date_format.list;
        let mut buckets: BTreeMap<String, Vec<ViewEntry>> = BTreeMap::new();

        for doc in self.public_entries()? {
            buckets
                .entry(doc.meta.category.clone())
                .or_default()
                .push(self.project(&doc, pattern));
        }
        Ok(buckets)
    }

    /// Public entries bucketed per tag; empty tag values never form a
    /// bucket.
    fn tag_buckets(&self) -> Result<BTreeMap<String, Vec<ViewEntry>>> {
        let pattern = &self.config.build.date_format.list;
        let mut buckets: BTreeMap<String, Vec<ViewEntry>> = BTreeMap::new();

        for doc in self.public_entries()? {
            for tag in &doc.meta.tags {
                if tag.is_empty() {
                    continue;
                }
                buckets
                    .entry(tag.clone())
                    .or_default()
                    .push(self.project(&doc, pattern));
            }
        }
        Ok(buckets)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{site, write_post};
    use super::*;
    use std::fs;

    #[test]
    fn test_category_pages_and_list() {
        let (_dir, config) = site();
        write_post(
            &config,
            "a.md",
            "title: One\ndate: 2020-04-01\ncategory: Essays\n",
            "x",
        );
        write_post(
            &config,
            "b.md",
            "title: Two\ndate: 2020-04-02\ncategory: Essays\n",
            "x",
        );
        write_post(&config, "c.md", "title: Three\ndate: 2020-04-03\n", "x");

        let mut builder = Builder::new(&config).unwrap();
        builder.gen_categories().unwrap();
        builder.gen_category_list().unwrap();

        let deploy = config.deploy_dir();
        let essays = fs::read_to_string(deploy.join("categories/essays/index.html")).unwrap();
        assert!(essays.contains("One"));
        // Newest first within the category
        assert!(essays.find(">Two<").unwrap() < essays.find(">One<").unwrap());

        assert!(deploy.join("categories/miscellaneous/index.html").is_file());

        let list = fs::read_to_string(deploy.join("categories/index.html")).unwrap();
        assert!(list.contains("Essays"));
        assert!(list.contains("(2)"));
        assert!(list.contains("Miscellaneous"));
        assert!(list.contains("(1)"));
    }

    #[test]
    fn test_categories_are_case_sensitive() {
        let (_dir, config) = site();
        write_post(
            &config,
            "a.md",
            "title: A\ndate: 2020-04-01\ncategory: notes\n",
            "x",
        );
        write_post(
            &config,
            "b.md",
            "title: B\ndate: 2020-04-02\ncategory: Notes\n",
            "x",
        );

        let builder = Builder::new(&config).unwrap();
        let buckets = builder.category_buckets().unwrap();
        assert_eq!(buckets.len(), 2);
    }

    #[test]
    fn test_entry_appears_in_every_tag_bucket() {
        let (_dir, config) = site();
        write_post(
            &config,
            "a.md",
            "title: Multi\ndate: 2020-04-01\ntags: rust, web\n",
            "x",
        );

        let mut builder = Builder::new(&config).unwrap();
        builder.gen_tags().unwrap();

        let deploy = config.deploy_dir();
        for slug in ["rust", "web"] {
            let html =
                fs::read_to_string(deploy.join(format!("tags/{slug}/index.html"))).unwrap();
            assert!(html.contains("Multi"));
        }
    }

    #[test]
    fn test_tag_cloud_weights_and_clamping() {
        let (_dir, mut config) = site();
        config.build.tag_cloud_steps = vec![0, 14, 21];
        write_post(&config, "a.md", "title: A\ndate: 2020-04-01\ntags: once, many\n", "x");
        write_post(&config, "b.md", "title: B\ndate: 2020-04-02\ntags: many\n", "x");
        write_post(&config, "c.md", "title: C\ndate: 2020-04-03\ntags: many\n", "x");
        write_post(&config, "d.md", "title: D\ndate: 2020-04-04\ntags: many\n", "x");

        let mut builder = Builder::new(&config).unwrap();
        builder.gen_tag_cloud().unwrap();

        let html =
            fs::read_to_string(config.deploy_dir().join("tags/index.html")).unwrap();
        // Frequency 1 -> first step; frequency 4 with a 3-step table clamps
        // to the last step
        assert!(html.contains("font-size: 100%"));
        assert!(html.contains("font-size: 121%"));
    }

    #[test]
    fn test_tag_cloud_empty_site_is_empty_not_error() {
        let (_dir, config) = site();
        let mut builder = Builder::new(&config).unwrap();
        builder.gen_tag_cloud().unwrap();
        assert!(config.deploy_dir().join("tags/index.html").is_file());
    }
}
