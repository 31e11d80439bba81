//! Prosa - a static blog generator from Markdown to HTML5.
//!
//! Content lives in `posts/` (dated entries) and `pages/` (standalone
//! pages) with YAML front matter whose field names may be written in
//! several languages. `build` turns them into a deploy tree of entry
//! pages, paginated home listings, a date archive, category and tag
//! views, a tag cloud and a syndication feed, rewriting only the files
//! whose content actually changed.

pub mod build;
pub mod builder;
pub mod cli;
pub mod config;
pub mod content;
pub mod init;
pub mod logger;
pub mod markup;
pub mod meta;
pub mod render;
pub mod serve;
pub mod uri;
