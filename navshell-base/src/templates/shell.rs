use maud::{html, Markup, PreEscaped, Render, DOCTYPE};
use tracing::debug;

use crate::{context::ShellContext, templates::helpers::ThemeHelpers};

/// Groups every `a.image-reference` in the content into one viewport-sized colorbox gallery.
pub const GALLERY_SCRIPT: &str = r#"jQuery("a.image-reference").colorbox({rel:"gal",maxWidth:"100%",maxHeight:"100%",scalePhotos:true});"#;

/// A page rendered inside the shell.
///
/// `content` has no default. The remaining slots default to what the base theme shows.
pub trait PageTemplate {
    fn content(&self, ctx: &ShellContext) -> Markup;

    fn extra_head(&self, _ctx: &ShellContext) -> Markup {
        html! {}
    }

    /// The right-hand side of the navbar. Shows the language switcher by default.
    fn belowtitle(&self, ctx: &ShellContext, helpers: &dyn ThemeHelpers) -> Markup {
        language_switcher(ctx, helpers)
    }

    /// Only rendered when the site shows source links.
    fn sourcelink(&self, _ctx: &ShellContext) -> Markup {
        html! {}
    }

    fn extra_js(&self, _ctx: &ShellContext) -> Markup {
        html! {}
    }
}

/// The language switcher as a navbar entry, or nothing for single-language sites.
pub fn language_switcher(ctx: &ShellContext, helpers: &dyn ThemeHelpers) -> Markup {
    html! {
        @if ctx.has_language_switcher() {
            li { (helpers.translations(ctx)) }
        }
    }
}

pub struct PageShell<'p, P: ?Sized> {
    ctx: &'p ShellContext,
    helpers: &'p dyn ThemeHelpers,
    page: &'p P,
}

impl<'p, P: PageTemplate + ?Sized> PageShell<'p, P> {
    pub fn new(ctx: &'p ShellContext, helpers: &'p dyn ThemeHelpers, page: &'p P) -> Self {
        Self { ctx, helpers, page }
    }
}

impl<'p, P: PageTemplate + ?Sized> Render for PageShell<'p, P> {
    fn render(&self) -> Markup {
        let Self { ctx, helpers, page } = *self;
        let annotated = ctx.annotations_visible();

        debug!(
            lang = %ctx.lang,
            page = ?ctx.current_page.as_ref().map(|page| &page.permalink),
            annotated,
            "rendering page shell"
        );

        html! {
            (DOCTYPE)
            html lang=(ctx.lang.as_str()) {
                (helpers.head(ctx, &ctx.lang, page.extra_head(ctx)))
                body {
                    div class="navbar navbar-fixed-top" id="navbar" {
                        div class="navbar-inner" {
                            div class="container" {
                                a class="btn btn-navbar" data-toggle="collapse" data-target=".nav-collapse" {
                                    span class="icon-bar" {}
                                    span class="icon-bar" {}
                                    span class="icon-bar" {}
                                }
                                a class="brand" href=(ctx.site_root) {
                                    @if let Some(logo_url) = &ctx.logo_url {
                                        img src=(logo_url) alt=(ctx.blog_title) id="logo";
                                    }
                                    @if ctx.show_blog_title {
                                        span id="blog-title" { (ctx.blog_title) }
                                    }
                                }
                                div class="nav-collapse collapse" {
                                    ul class="nav" {
                                        (helpers.navigation_links(ctx))
                                    }
                                    @if let Some(search_form) = &ctx.search_form {
                                        (search_form)
                                    }
                                    ul class="nav pull-right" {
                                        (page.belowtitle(ctx, helpers))
                                        @if ctx.show_sourcelink {
                                            li { (page.sourcelink(ctx)) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    div class="container-fluid" id="container-fluid" {
                        div class="row-fluid" {
                            div class="span2" {}
                            div class="span8" {
                                (page.content(ctx))
                            }
                        }
                        div class="footerbox" {
                            (ctx.footer_content)
                        }
                    }
                    (helpers.late_scripts(ctx))
                    script type="text/javascript" { (PreEscaped(GALLERY_SCRIPT)) }
                    (page.extra_js(ctx))
                    @if annotated {
                        (helpers.annotations(ctx))
                    }
                    (ctx.trailing_body_markup)
                }
            }
        }
    }
}

/// Render a complete HTML document for `page`.
pub fn render_shell<P>(ctx: &ShellContext, helpers: &dyn ThemeHelpers, page: &P) -> Markup
where
    P: PageTemplate + ?Sized,
{
    PageShell::new(ctx, helpers, page).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{context::Fragment, lang::LangCode, templates::helpers::BaseHelpers};

    struct Hello;

    impl PageTemplate for Hello {
        fn content(&self, _ctx: &ShellContext) -> Markup {
            html! { p { "hello" } }
        }
    }

    fn ctx() -> ShellContext {
        ShellContext::new(LangCode::try_from("en").unwrap(), "Notes")
    }

    #[test]
    fn minimal_document_shape() {
        let out = render_shell(&ctx(), &BaseHelpers::default(), &Hello).into_string();

        assert!(out.starts_with(r#"<!DOCTYPE html><html lang="en"><head>"#));
        assert!(out.contains(r#"<a class="brand" href="/"><span id="blog-title">Notes</span></a>"#));
        assert!(out.contains(r#"<div class="span8"><p>hello</p></div>"#));
        assert!(out.contains(r#"<ul class="nav pull-right"></ul>"#));
        assert!(out.ends_with("</body></html>"));
    }

    #[test]
    fn body_blocks_render_in_order() {
        let mut ctx = ctx();
        ctx.footer_content = Fragment::new("<p>footer</p>");
        ctx.trailing_body_markup = Fragment::new("<!-- analytics -->");
        let out = render_shell(&ctx, &BaseHelpers::default(), &Hello).into_string();

        let positions = [
            out.find(r#"id="navbar""#),
            out.find("<p>hello</p>"),
            out.find(r#"<div class="footerbox"><p>footer</p></div>"#),
            out.find("jquery.min.js"),
            out.find(GALLERY_SCRIPT),
            out.find("<!-- analytics -->"),
        ];
        let positions = positions.map(|found| found.expect("block missing from output"));
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn logo_and_title_render_together() {
        let mut ctx = ctx();
        ctx.logo_url = Some("/logo.png".to_owned());
        let out = render_shell(&ctx, &BaseHelpers::default(), &Hello).into_string();
        assert!(out.contains(concat!(
            r#"<a class="brand" href="/"><img src="/logo.png" alt="Notes" id="logo">"#,
            r#"<span id="blog-title">Notes</span></a>"#,
        )));
    }
}
