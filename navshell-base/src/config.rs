use std::{io, sync::Arc};

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use tap::TapFallible;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

use crate::{
    context::{Fragment, NavLink, ShellContext},
    lang::LangCode,
    messages::Messages,
    page::Page,
    templates::helpers::BaseHelpers,
    translatable::Translatable,
    translations::{Translation, TranslationPattern, TranslationPatternError},
};

/// Site-wide settings, usually read from `site.toml`.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    #[serde(default = "default_site_root")]
    pub site_root: String,
    #[serde(default = "default_lang")]
    pub default_lang: LangCode,
    /// Every published language, in switcher order. Empty means only `default_lang`.
    #[serde(default)]
    pub translations: Vec<Translation>,
    #[serde(default = "default_translations_pattern")]
    pub translations_pattern: String,
    pub blog_title: Translatable<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default = "default_true")]
    pub show_blog_title: bool,
    #[serde(default)]
    pub navigation_links: Translatable<Vec<NavLink>>,
    #[serde(default)]
    pub search_form: Option<Translatable<Fragment>>,
    #[serde(default = "default_true")]
    pub show_sourcelink: bool,
    #[serde(default)]
    pub annotations: bool,
    #[serde(default)]
    pub content_footer: Translatable<Fragment>,
    #[serde(default)]
    pub body_end: Fragment,
    #[serde(default)]
    pub stylesheets: Option<Vec<String>>,
    #[serde(default)]
    pub scripts: Option<Vec<String>>,
    /// Theme message catalogs, `<lang>.toml` each. Relative to the config file.
    #[serde(default)]
    pub messages_dir: Option<Utf8PathBuf>,
}

fn default_site_root() -> String {
    "/".to_owned()
}

fn default_lang() -> LangCode {
    LangCode::english()
}

fn default_translations_pattern() -> String {
    "{path}.{lang}.{ext}".to_owned()
}

fn default_true() -> bool {
    true
}

impl SiteConfig {
    pub async fn load(path: &Utf8Path) -> Result<Self, LoadConfigError> {
        let raw = fs::read_to_string(path)
            .await
            .map_err(|err| LoadConfigError::ReadConfig(path.to_owned(), err))?;

        let mut config = Self::from_toml_str(&raw)
            .tap_err(|error| warn!(%path, %error, "rejected site configuration"))?;

        if let (Some(dir), Some(base)) = (&config.messages_dir, path.parent()) {
            if dir.is_relative() {
                config.messages_dir = Some(base.join(dir));
            }
        }

        debug!(%path, languages = config.translations.len(), "loaded site configuration");
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, LoadConfigError> {
        use LoadConfigError::*;

        let mut config = toml::from_str::<Self>(raw)?;

        if config.translations.is_empty() {
            config.translations = vec![Translation::new(
                config.default_lang.clone(),
                config.site_root.clone(),
            )];
        }

        if config.root_for(&config.default_lang).is_none() {
            return Err(DefaultLangNotTranslated(config.default_lang));
        }

        for (i, translation) in config.translations.iter().enumerate() {
            if config.translations[..i]
                .iter()
                .any(|earlier| earlier.lang == translation.lang)
            {
                return Err(DuplicateLang(translation.lang.clone()));
            }
        }

        Ok(config)
    }

    pub fn langs(&self) -> Vec<LangCode> {
        self.translations
            .iter()
            .map(|translation| translation.lang.clone())
            .collect()
    }

    /// The URL the pages in `lang` are published under.
    pub fn root_for(&self, lang: &LangCode) -> Option<&str> {
        self.translations
            .iter()
            .find(|translation| &translation.lang == lang)
            .map(|translation| translation.root.as_str())
    }

    pub fn translation_pattern(&self) -> Result<TranslationPattern, TranslationPatternError> {
        TranslationPattern::new(&self.translations_pattern, &self.langs())
    }

    /// The source to render for `lang`: the translated file when one exists, `page` otherwise.
    pub async fn translated_source(
        &self,
        page: &Utf8Path,
        lang: &LangCode,
    ) -> Result<Utf8PathBuf, TranslationPatternError> {
        let pattern = self.translation_pattern()?;
        let candidate =
            Utf8PathBuf::from(pattern.candidate(page.as_str(), lang, &self.default_lang));
        if candidate.as_path() == page {
            return Ok(page.to_owned());
        }

        match fs::try_exists(&candidate).await {
            Ok(true) => {
                debug!(%candidate, %lang, "using translated source");
                Ok(candidate)
            }
            Ok(false) => Ok(page.to_owned()),
            Err(error) => {
                warn!(%candidate, %error, "could not check for translated source, using original");
                Ok(page.to_owned())
            }
        }
    }

    pub fn helpers(&self) -> BaseHelpers {
        let defaults = BaseHelpers::default();
        BaseHelpers {
            stylesheets: self.stylesheets.clone().unwrap_or(defaults.stylesheets),
            scripts: self.scripts.clone().unwrap_or(defaults.scripts),
        }
    }

    /// Resolve every setting for `lang`, for a render of `page` (or of a page-less listing).
    pub fn context(
        &self,
        lang: &LangCode,
        messages: Arc<Messages>,
        page: Option<&Page>,
    ) -> Result<ShellContext, ContextError> {
        let root = self
            .root_for(lang)
            .ok_or_else(|| ContextError::UnknownLanguage(lang.clone()))?;
        let default_lang = &self.default_lang;

        Ok(ShellContext {
            lang: lang.clone(),
            site_root: root.to_owned(),
            blog_title: self
                .blog_title
                .get(lang, default_lang)
                .cloned()
                .unwrap_or_default(),
            logo_url: self.logo_url.clone(),
            show_blog_title: self.show_blog_title,
            navigation_links: self
                .navigation_links
                .get(lang, default_lang)
                .cloned()
                .unwrap_or_default(),
            search_form: self
                .search_form
                .as_ref()
                .and_then(|form| form.get(lang, default_lang))
                .filter(|form| !form.is_empty())
                .cloned(),
            translations: self.translations.clone(),
            show_sourcelink: self.show_sourcelink,
            current_page: page.map(|page| page.meta(root)),
            annotations_globally_enabled: self.annotations,
            footer_content: self
                .content_footer
                .get(lang, default_lang)
                .cloned()
                .unwrap_or_default(),
            trailing_body_markup: self.body_end.clone(),
            messages,
        })
    }
}

#[derive(Error, Debug)]
pub enum LoadConfigError {
    #[error("failed to read site configuration {0}: {1}")]
    ReadConfig(Utf8PathBuf, #[source] io::Error),

    #[error("failed to parse site configuration: {0}")]
    ParseConfig(#[from] toml::de::Error),

    #[error("default language {0} is missing from the translations")]
    DefaultLangNotTranslated(LangCode),

    #[error("language {0} is listed more than once in the translations")]
    DuplicateLang(LangCode),
}

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("site is not published in language {0}")]
    UnknownLanguage(LangCode),
}
