//! Date archive generation.

use super::Builder;
use crate::uri;
use anyhow::{Context, Result};
use serde_json::json;
use std::collections::BTreeMap;

impl Builder<'_> {
    /// Render `archive/index.html`: entries grouped by year, then by
    /// zero-padded month, reading forward in time within each month.
    /// Years are listed newest first.
    pub fn gen_archive(&mut self) -> Result<()> {
        let pattern = self.config.build.date_format.list.clone();
        let locale = self.locale;

        let mut docs: Vec<_> = self
            .load_entries()?
            .into_iter()
            .filter(|doc| !doc.meta.private)
            .collect();
        docs.sort_by_key(|doc| doc.meta.date_idx());

        // year -> "MM" -> entries, ascending within each bucket
        let mut years: BTreeMap<String, BTreeMap<String, (String, Vec<_>)>> = BTreeMap::new();
        for doc in &docs {
            let date = doc.meta.date.context("entry without date")?;
            let month_key = date.format("%m").to_string();
            let month_name = date
                .and_utc()
                .format_localized("%B", locale)
                .to_string();

            years
                .entry(date.format("%Y").to_string())
                .or_default()
                .entry(month_key)
                .or_insert_with(|| (month_name, Vec::new()))
                .1
                .push(self.project(doc, &pattern));
        }

        let archive: Vec<_> = years
            .into_iter()
            .rev()
            .map(|(year, months)| {
                json!({
                    "year": year,
                    "months": months
                        .into_values()
                        .map(|(name, entries)| json!({"name": name, "entries": entries}))
                        .collect::<Vec<_>>(),
                })
            })
            .collect();

        let path = uri::link_to("", &self.deploy().join("archive"), true)?;
        self.render_to("archive.html", json!({ "archive": archive }), &path)
    }
}
