//! The base theme's page shell: a bootstrap navbar, the page content, a footer and the late
//! script includes, with the language switcher, search form, source link and annotation widget
//! shown or hidden per page.

pub mod annotations;
pub mod config;
pub mod context;
pub mod lang;
pub mod messages;
pub mod page;
pub mod templates;
pub mod translatable;
pub mod translations;

pub use crate::{
    annotations::{annotations_visible, AnnotationOverride},
    config::SiteConfig,
    context::{Fragment, NavLink, PageMeta, ShellContext},
    lang::LangCode,
    messages::Messages,
    page::Page,
    templates::{
        helpers::{BaseHelpers, ThemeHelpers},
        pages::MarkdownPage,
        shell::{language_switcher, render_shell, PageShell, PageTemplate},
    },
    translations::{Translation, TranslationPattern},
};

/// The compiled stylesheet of the base theme, served as `/assets/css/theme.css`.
pub const STYLESHEET: &str = include_str!(concat!(env!("OUT_DIR"), "/theme.css"));
