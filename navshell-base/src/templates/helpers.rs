use maud::{html, Markup, PreEscaped};

use crate::{context::ShellContext, lang::LangCode};

const ANNOTATOR_SCRIPT: &str =
    "https://assets.annotateit.org/annotator/v1.1.0/annotator-full.min.js";
const ANNOTATOR_STYLESHEET: &str =
    "https://assets.annotateit.org/annotator/v1.1.0/annotator.min.css";
const ANNOTATOR_LOADER: &str = "jQuery(function ($) { \
    $('body').annotator().annotator('setupPlugins', {}, { Filter: false }); });";

/// The partials the page shell delegates to.
///
/// Each one receives the whole context and picks out what it needs.
pub trait ThemeHelpers {
    /// The document `head`, with `extra_head` at the end of it.
    fn head(&self, ctx: &ShellContext, lang: &LangCode, extra_head: Markup) -> Markup;

    /// The `li` entries of the main navigation menu.
    fn navigation_links(&self, ctx: &ShellContext) -> Markup;

    /// Links to the other languages the site is published in.
    fn translations(&self, ctx: &ShellContext) -> Markup;

    /// Scripts loaded at the end of the body.
    fn late_scripts(&self, ctx: &ShellContext) -> Markup;

    /// The annotation widget loader.
    fn annotations(&self, ctx: &ShellContext) -> Markup;
}

/// The helpers of the base theme: bootstrap, jQuery and colorbox from `/assets/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseHelpers {
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,
}

impl Default for BaseHelpers {
    fn default() -> Self {
        Self {
            stylesheets: vec![
                "/assets/css/bootstrap.min.css".to_owned(),
                "/assets/css/colorbox.css".to_owned(),
                "/assets/css/theme.css".to_owned(),
            ],
            scripts: vec![
                "/assets/js/jquery.min.js".to_owned(),
                "/assets/js/bootstrap.min.js".to_owned(),
                "/assets/js/jquery.colorbox-min.js".to_owned(),
            ],
        }
    }
}

impl ThemeHelpers for BaseHelpers {
    fn head(&self, ctx: &ShellContext, lang: &LangCode, extra_head: Markup) -> Markup {
        let title = match &ctx.current_page {
            Some(page) => format!("{} | {}", page.title, ctx.blog_title),
            None => ctx.blog_title.clone(),
        };

        html! {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @for href in &self.stylesheets {
                    link href=(href) rel="stylesheet" type="text/css";
                }
                @for translation in ctx.translations.iter().filter(|t| &t.lang != lang) {
                    link rel="alternate" hreflang=(translation.lang.as_str()) href=(translation.root);
                }
                @if ctx.annotations_visible() {
                    link href=(ANNOTATOR_STYLESHEET) rel="stylesheet" type="text/css";
                }
                (extra_head)
            }
        }
    }

    fn navigation_links(&self, ctx: &ShellContext) -> Markup {
        let permalink = ctx.current_page.as_ref().map(|page| page.permalink.as_str());

        html! {
            @for link in &ctx.navigation_links {
                @let active = permalink == Some(link.url.as_str());
                li class=[active.then_some("active")] {
                    a href=(link.url) { (link.text) }
                }
            }
        }
    }

    fn translations(&self, ctx: &ShellContext) -> Markup {
        html! {
            @for translation in ctx.other_translations() {
                a href=(translation.root) rel="alternate" hreflang=(translation.lang.as_str()) {
                    (ctx.messages.get(&translation.lang, "LANGUAGE"))
                }
            }
        }
    }

    fn late_scripts(&self, _ctx: &ShellContext) -> Markup {
        html! {
            @for src in &self.scripts {
                script src=(src) type="text/javascript" {}
            }
        }
    }

    fn annotations(&self, _ctx: &ShellContext) -> Markup {
        html! {
            script src=(ANNOTATOR_SCRIPT) type="text/javascript" {}
            script type="text/javascript" { (PreEscaped(ANNOTATOR_LOADER)) }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        context::{NavLink, PageMeta},
        messages::Messages,
        translations::Translation,
    };

    fn lang(code: &str) -> LangCode {
        LangCode::try_from(code).unwrap()
    }

    fn bilingual() -> ShellContext {
        let mut ctx = ShellContext::new(lang("en"), "Notes");
        ctx.translations = vec![
            Translation::new(lang("en"), "/"),
            Translation::new(lang("es"), "/es/"),
        ];
        ctx.messages = Arc::new(Messages::builtin(&[lang("en"), lang("es")]).unwrap());
        ctx
    }

    #[test]
    fn title_includes_page_title() {
        let mut ctx = ShellContext::new(lang("en"), "Notes");
        let head = BaseHelpers::default().head(&ctx, &ctx.lang, html! {}).into_string();
        assert!(head.contains("<title>Notes</title>"));

        ctx.current_page = Some(PageMeta::new("About & such", "/about/"));
        let head = BaseHelpers::default().head(&ctx, &ctx.lang, html! {}).into_string();
        assert!(head.contains("<title>About &amp; such | Notes</title>"));
    }

    #[test]
    fn head_links_alternate_languages_and_extra_head() {
        let ctx = bilingual();
        let extra = html! { meta name="robots" content="noindex"; };
        let head = BaseHelpers::default().head(&ctx, &ctx.lang, extra).into_string();

        assert!(head.contains(r#"<link rel="alternate" hreflang="es" href="/es/">"#));
        assert!(!head.contains(r#"hreflang="en""#));
        assert!(head.ends_with(r#"<meta name="robots" content="noindex"></head>"#));
    }

    #[test]
    fn current_page_link_is_active() {
        let mut ctx = ShellContext::new(lang("en"), "Notes");
        ctx.navigation_links = vec![
            NavLink::new("/archive/", "Archive"),
            NavLink::new("/about/", "About"),
        ];
        ctx.current_page = Some(PageMeta::new("About", "/about/"));

        let links = BaseHelpers::default().navigation_links(&ctx).into_string();
        assert_eq!(
            links,
            concat!(
                r#"<li><a href="/archive/">Archive</a></li>"#,
                r#"<li class="active"><a href="/about/">About</a></li>"#,
            )
        );
    }

    #[test]
    fn translations_skip_current_language() {
        let ctx = bilingual();
        let links = BaseHelpers::default().translations(&ctx).into_string();
        assert_eq!(
            links,
            r#"<a href="/es/" rel="alternate" hreflang="es">Español</a>"#
        );
    }

    #[test]
    fn late_scripts_keep_configured_order() {
        let helpers = BaseHelpers {
            scripts: vec!["/a.js".to_owned(), "/b.js".to_owned()],
            ..BaseHelpers::default()
        };
        let ctx = ShellContext::new(lang("en"), "Notes");
        assert_eq!(
            helpers.late_scripts(&ctx).into_string(),
            concat!(
                r#"<script src="/a.js" type="text/javascript"></script>"#,
                r#"<script src="/b.js" type="text/javascript"></script>"#,
            )
        );
    }
}
