use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use comrak::{markdown_to_html, Options};
use serde::Deserialize;
use thiserror::Error;
use tokio::fs;
use tracing::info;

use crate::context::PageMeta;

/// A page source: TOML frontmatter between `---` lines, then Markdown.
#[derive(Clone, Debug)]
pub struct Page {
    pub source_path: Utf8PathBuf,
    pub frontmatter: PageFrontmatter,
    pub html_content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageFrontmatter {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub annotations: bool,
    #[serde(default)]
    pub noannotations: bool,
}

impl Page {
    pub async fn load(path: &Utf8Path) -> Result<Self, LoadPageError> {
        let raw_content = fs::read_to_string(path)
            .await
            .map_err(|err| LoadPageError::ReadContent(path.to_owned(), err))?;

        let page = Self::parse(path, &raw_content)?;
        info!(%path, title = %page.frontmatter.title, "loaded page");
        Ok(page)
    }

    pub fn parse(source_path: &Utf8Path, raw_content: &str) -> Result<Self, LoadPageError> {
        use LoadPageError::*;

        let (frontmatter, raw_content) = raw_content
            .strip_prefix("---")
            .ok_or(MissingFrontmatter)
            .and_then(|rest| split_frontmatter(rest).ok_or(MalformedFrontmatter))?;

        let frontmatter = toml::from_str::<PageFrontmatter>(frontmatter.trim())?;
        let html_content = render_markdown(raw_content);

        Ok(Self {
            source_path: source_path.to_owned(),
            frontmatter,
            html_content,
        })
    }

    /// The URL component of this page: the `slug` from the frontmatter, or the file stem with
    /// any language suffix left in place.
    pub fn slug(&self) -> &str {
        self.frontmatter
            .slug
            .as_deref()
            .or_else(|| self.source_path.file_stem())
            .unwrap_or("index")
    }

    /// Describe this page for the shell, as published under `root`.
    pub fn meta(&self, root: &str) -> PageMeta {
        let root = root.trim_end_matches('/');
        let slug = self.slug();
        let source_link = self
            .source_path
            .extension()
            .map(|ext| format!("{root}/{slug}.{ext}"));

        PageMeta {
            title: self.frontmatter.title.clone(),
            permalink: format!("{root}/{slug}/"),
            source_link,
            annotations: self.frontmatter.annotations,
            noannotations: self.frontmatter.noannotations,
        }
    }
}

/// Split at the closing `---`, which must sit on a line of its own.
fn split_frontmatter(rest: &str) -> Option<(&str, &str)> {
    rest.match_indices("\n---").find_map(|(at, delimiter)| {
        let after = &rest[at + delimiter.len()..];
        let body = match after.strip_prefix("\r\n").or_else(|| after.strip_prefix('\n')) {
            Some(body) => body,
            None if after.trim_end().is_empty() => "",
            None => return None,
        };
        Some((&rest[..at], body))
    })
}

fn render_markdown(md_input: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.footnotes = true;
    options.render.unsafe_ = true;

    markdown_to_html(md_input, &options)
}

#[derive(Error, Debug)]
pub enum LoadPageError {
    #[error("failed to read {0}: {1}")]
    ReadContent(Utf8PathBuf, #[source] io::Error),

    #[error("page does not begin with frontmatter")]
    MissingFrontmatter,

    #[error("page frontmatter is malformed")]
    MalformedFrontmatter,

    #[error("failed to parse page frontmatter: {0}")]
    ParseFrontmatter(#[from] toml::de::Error),
}
