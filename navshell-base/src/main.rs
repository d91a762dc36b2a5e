use std::{io, process::ExitCode, sync::Arc};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{error, info};
use www_navshell_base::{
    config::{ContextError, LoadConfigError},
    messages::MessagesError,
    page::LoadPageError,
    render_shell,
    translations::TranslationPatternError,
    LangCode, MarkdownPage, Messages, Page, SiteConfig, STYLESHEET,
};

/// Render a page source into a complete HTML document using the base theme.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Site configuration file.
    #[arg(long, env = "NAVSHELL_CONFIG", default_value = "site.toml")]
    config: Utf8PathBuf,

    /// Language to render in. Defaults to the site's default language.
    #[arg(long, env = "NAVSHELL_LANG")]
    lang: Option<LangCode>,

    /// Where to write the HTML. Standard output when omitted.
    #[arg(long, short)]
    output: Option<Utf8PathBuf>,

    /// Directory to write the theme stylesheet into, as `theme.css`.
    #[arg(long, env = "NAVSHELL_ASSETS_DIR")]
    assets_dir: Option<Utf8PathBuf>,

    /// Page source: TOML frontmatter followed by Markdown.
    page: Utf8PathBuf,
}

#[derive(Error, Debug)]
enum RunError {
    #[error(transparent)]
    LoadConfig(#[from] LoadConfigError),

    #[error(transparent)]
    Messages(#[from] MessagesError),

    #[error(transparent)]
    TranslationPattern(#[from] TranslationPatternError),

    #[error(transparent)]
    LoadPage(#[from] LoadPageError),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("could not write {0}: {1}")]
    Write(Utf8PathBuf, #[source] io::Error),

    #[error("could not write to standard output: {0}")]
    Stdout(#[source] io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    www_navshell::init_tracing();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "failed to render page");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), RunError> {
    let config = SiteConfig::load(&args.config).await?;
    let lang = args.lang.unwrap_or_else(|| config.default_lang.clone());

    let messages = Messages::load(&config.langs(), config.messages_dir.as_deref()).await?;
    let source = config.translated_source(&args.page, &lang).await?;
    let page = Page::load(&source).await?;

    let ctx = config.context(&lang, Arc::new(messages), Some(&page))?;
    let html = render_shell(&ctx, &config.helpers(), &MarkdownPage::new(&page)).into_string();

    match &args.output {
        Some(path) => {
            write_file(path, &html).await?;
            info!(%path, %lang, "wrote page");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(html.as_bytes()).await.map_err(RunError::Stdout)?;
            stdout.flush().await.map_err(RunError::Stdout)?;
        }
    }

    if let Some(dir) = &args.assets_dir {
        let path = dir.join("theme.css");
        write_file(&path, STYLESHEET).await?;
        info!(%path, "wrote theme stylesheet");
    }

    Ok(())
}

async fn write_file(path: &Utf8Path, contents: &str) -> Result<(), RunError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|err| RunError::Write(path.to_owned(), err))?;
    }

    fs::write(path, contents)
        .await
        .map_err(|err| RunError::Write(path.to_owned(), err))
}
