use maud::{html, Markup, PreEscaped};

use crate::{context::ShellContext, page::Page, templates::shell::PageTemplate};

/// A Markdown page rendered as an article, with a link to its source.
pub struct MarkdownPage<'p> {
    page: &'p Page,
}

impl<'p> MarkdownPage<'p> {
    pub fn new(page: &'p Page) -> Self {
        Self { page }
    }
}

impl<'p> PageTemplate for MarkdownPage<'p> {
    fn content(&self, _ctx: &ShellContext) -> Markup {
        html! {
            article class="storypage" {
                header {
                    h1 class="title" { (self.page.frontmatter.title) }
                }
                div class="body" {
                    (PreEscaped(&self.page.html_content))
                }
            }
        }
    }

    fn sourcelink(&self, ctx: &ShellContext) -> Markup {
        let source_link = ctx
            .current_page
            .as_ref()
            .and_then(|page| page.source_link.as_deref());

        html! {
            @if let Some(href) = source_link {
                a href=(href) id="sourcelink" { (ctx.message("Source")) }
            }
        }
    }
}
