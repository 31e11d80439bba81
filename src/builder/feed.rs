//! Syndication feed generation.
//!
//! Two formats: RSS 2.0 through the `rss` builders, Atom hand-assembled
//! the same way the sitemap-style XML writers do it. Any other configured
//! format name disables the feed; the feed also needs the canonical site
//! URL, because feed readers require absolute links.

use super::Builder;
use crate::{content::Document, log, render, uri};
use anyhow::{Context, Result, anyhow};
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};

/// XML namespace for Atom feeds
const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

impl Builder<'_> {
    /// Write the feed configured in `[build.feed]` to the deploy root.
    pub fn gen_feed(&mut self) -> Result<()> {
        let format = self.config.build.feed.format.trim().to_lowercase();
        if format != "rss" && format != "atom" {
            log!("feed"; "unrecognized feed format `{}`, skipping", self.config.build.feed.format);
            return Ok(());
        }

        let Some(canonical) = self.config.base.url.clone() else {
            log!("warn"; "[base.url] is not set, skipping feed generation");
            return Ok(());
        };

        let docs = self.public_entries()?;
        let xml = match format.as_str() {
            "rss" => self.rss_xml(&canonical, &docs)?,
            _ => self.atom_xml(&canonical, &docs)?,
        };

        let path = self.config.feed_path();
        if render::write_if_changed(&path, xml.as_bytes())? {
            log!("feed"; "updated {}", path.display());
            self.updated += 1;
        }
        Ok(())
    }

    fn rss_xml(&self, canonical: &str, docs: &[Document]) -> Result<String> {
        let items: Vec<_> = docs
            .iter()
            .map(|doc| {
                let link = self.entry_url(canonical, doc);
                let updated = doc
                    .meta
                    .feed_updated()
                    .context("entry without date")?
                    .and_utc()
                    .to_rfc2822();

                Ok(ItemBuilder::default()
                    .title(doc.meta.raw_title())
                    .link(link.clone())
                    .guid(GuidBuilder::default().permalink(true).value(link).build())
                    .description(feed_summary(doc))
                    .pub_date(updated)
                    .build())
            })
            .collect::<Result<_>>()?;

        let channel = ChannelBuilder::default()
            .title(self.config.base.title.clone())
            .link(canonical.to_owned())
            .description(self.config.base.description.clone())
            .language(self.config.base.language.clone())
            .generator("prosa".to_string())
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("rss validate: {e}"))?;

        Ok(channel.to_string())
    }

    fn atom_xml(&self, canonical: &str, docs: &[Document]) -> Result<String> {
        let base = &self.config.base;
        let feed_url = uri::absolute_uri(
            canonical,
            &format!("/{}", self.config.build.feed.path.to_string_lossy()),
        );
        let feed_updated = docs
            .first()
            .and_then(|doc| doc.meta.feed_updated())
            .map(|d| d.and_utc().to_rfc3339())
            .unwrap_or_else(|| "1970-01-01T00:00:00+00:00".into());

        let mut xml = String::with_capacity(4096);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<feed xmlns="{ATOM_NS}">"#));
        xml.push('\n');
        xml.push_str(&format!("  <title>{}</title>\n", escape_xml(&base.title)));
        xml.push_str(&format!(
            "  <subtitle>{}</subtitle>\n",
            escape_xml(&base.description)
        ));
        xml.push_str(&format!(
            r#"  <link href="{}" rel="self"/>"#,
            escape_xml(&feed_url)
        ));
        xml.push('\n');
        xml.push_str(&format!(r#"  <link href="{}"/>"#, escape_xml(canonical)));
        xml.push('\n');
        xml.push_str(&format!("  <id>{}/</id>\n", escape_xml(canonical.trim_end_matches('/'))));
        xml.push_str(&format!("  <updated>{feed_updated}</updated>\n"));
        xml.push_str("  <author>\n");
        xml.push_str(&format!("    <name>{}</name>\n", escape_xml(&base.author)));
        if !base.email.is_empty() {
            xml.push_str(&format!("    <email>{}</email>\n", escape_xml(&base.email)));
        }
        xml.push_str("  </author>\n");
        xml.push_str("  <generator>prosa</generator>\n");

        for doc in docs {
            let url = self.entry_url(canonical, doc);
            let updated = doc
                .meta
                .feed_updated()
                .context("entry without date")?
                .and_utc()
                .to_rfc3339();

            xml.push_str("  <entry>\n");
            xml.push_str(&format!(
                "    <title>{}</title>\n",
                escape_xml(&doc.meta.raw_title())
            ));
            xml.push_str(&format!(r#"    <link href="{}"/>"#, escape_xml(&url)));
            xml.push('\n');
            xml.push_str(&format!("    <id>{}</id>\n", escape_xml(&url)));
            xml.push_str(&format!("    <updated>{updated}</updated>\n"));
            xml.push_str(&format!(
                "    <summary type=\"html\">{}</summary>\n",
                escape_xml(&feed_summary(doc))
            ));
            xml.push_str("  </entry>\n");
        }

        xml.push_str("</feed>\n");
        Ok(xml)
    }

    /// Absolute URL of one entry page.
    fn entry_url(&self, canonical: &str, doc: &Document) -> String {
        let entry = self.project(doc, "%Y-%m-%d");
        let base = match self.config.base.base_path.trim_matches('/') {
            "" => String::new(),
            path => format!("/{path}"),
        };
        uri::absolute_uri(canonical, &format!("{base}{}/", entry.uri))
    }
}

/// Feed body for one entry: the summary when present, the full rendered
/// body otherwise.
fn feed_summary(doc: &Document) -> String {
    if doc.meta.summary.is_empty() {
        doc.body_html.clone()
    } else {
        doc.meta.summary.clone()
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
