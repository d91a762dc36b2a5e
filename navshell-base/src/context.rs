use std::sync::Arc;

use maud::Render;
use serde::Deserialize;

use crate::{
    annotations::annotations_visible, lang::LangCode, messages::Messages,
    translations::Translation,
};

/// Markup produced somewhere else and emitted verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Fragment(String);

impl Fragment {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Render for Fragment {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str(&self.0);
    }
}

/// One entry of the navigation menu.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub url: String,
    pub text: String,
}

impl NavLink {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }
}

/// What the shell needs to know about the page being rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub permalink: String,
    pub source_link: Option<String>,
    /// Opt in to annotations when they are off site-wide.
    pub annotations: bool,
    /// Opt out of annotations when they are on site-wide.
    pub noannotations: bool,
}

impl PageMeta {
    pub fn new(title: impl Into<String>, permalink: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            permalink: permalink.into(),
            source_link: None,
            annotations: false,
            noannotations: false,
        }
    }
}

/// Everything a single render of the page shell reads.
#[derive(Clone, Debug)]
pub struct ShellContext {
    pub lang: LangCode,
    pub site_root: String,
    pub blog_title: String,
    pub logo_url: Option<String>,
    pub show_blog_title: bool,
    pub navigation_links: Vec<NavLink>,
    pub search_form: Option<Fragment>,
    pub translations: Vec<Translation>,
    pub show_sourcelink: bool,
    pub current_page: Option<PageMeta>,
    pub annotations_globally_enabled: bool,
    pub footer_content: Fragment,
    pub trailing_body_markup: Fragment,
    pub messages: Arc<Messages>,
}

impl ShellContext {
    /// A context for a single-language site rooted at `/`, with every optional block off.
    pub fn new(lang: LangCode, blog_title: impl Into<String>) -> Self {
        Self {
            translations: vec![Translation::new(lang.clone(), "/")],
            lang,
            site_root: "/".to_owned(),
            blog_title: blog_title.into(),
            logo_url: None,
            show_blog_title: true,
            navigation_links: Vec::new(),
            search_form: None,
            show_sourcelink: false,
            current_page: None,
            annotations_globally_enabled: false,
            footer_content: Fragment::default(),
            trailing_body_markup: Fragment::default(),
            messages: Arc::new(Messages::default()),
        }
    }

    /// The message `key` in the language being rendered.
    pub fn message<'a>(&'a self, key: &'a str) -> &'a str {
        self.messages.get(&self.lang, key)
    }

    pub fn has_language_switcher(&self) -> bool {
        self.translations.len() > 1
    }

    pub fn annotations_visible(&self) -> bool {
        annotations_visible(
            self.annotations_globally_enabled,
            self.current_page.as_ref(),
        )
    }

    /// The other languages this page is published in.
    pub fn other_translations(&self) -> impl Iterator<Item = &Translation> {
        self.translations
            .iter()
            .filter(move |translation| translation.lang != self.lang)
    }
}
