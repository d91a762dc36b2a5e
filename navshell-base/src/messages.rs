use std::{collections::BTreeMap, io};

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

use crate::lang::LangCode;

type Catalog = BTreeMap<String, String>;

const ENGLISH: &str = include_str!("../messages/en.toml");
const BUILTIN: &[(&str, &str)] = &[("en", ENGLISH), ("es", include_str!("../messages/es.toml"))];

/// Translated interface strings, keyed by language.
///
/// Every language starts from the English catalog and layers its own strings on top, so a
/// partially translated language still renders every message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Messages {
    catalogs: BTreeMap<LangCode, Catalog>,
}

impl Messages {
    /// Build catalogs for `langs` from the messages bundled with the base theme.
    pub fn builtin(langs: &[LangCode]) -> Result<Self, MessagesError> {
        let english = parse_catalog("en", ENGLISH)?;
        let mut messages = Self::default();
        for lang in langs {
            let raw = builtin_source(lang)
                .ok_or_else(|| MessagesError::LanguageNotFound(lang.clone()))?;
            let translation = parse_catalog(lang.as_str(), raw)?;
            messages.insert(lang, &english, translation);
        }
        Ok(messages)
    }

    /// Build catalogs for `langs`, preferring `<dir>/<lang>.toml` over the bundled messages.
    ///
    /// A theme `en.toml` extends the bundled English, and that extended catalog is the base
    /// every other language is layered over.
    pub async fn load(langs: &[LangCode], dir: Option<&Utf8Path>) -> Result<Self, MessagesError> {
        use MessagesError::*;

        let english_lang = LangCode::english();
        let mut english = parse_catalog("en", ENGLISH)?;
        if let Some(theme_english) = theme_catalog(dir, &english_lang).await? {
            english.extend(theme_english);
        }

        let mut messages = Self::default();
        for lang in langs {
            let translation = match theme_catalog(dir, lang).await? {
                Some(catalog) => catalog,
                None => {
                    let raw = builtin_source(lang).ok_or_else(|| LanguageNotFound(lang.clone()))?;
                    parse_catalog(lang.as_str(), raw)?
                }
            };
            messages.insert(lang, &english, translation);
        }
        Ok(messages)
    }

    fn insert(&mut self, lang: &LangCode, english: &Catalog, translation: Catalog) {
        let missing = english
            .keys()
            .filter(|key| !translation.contains_key(*key))
            .count();
        if missing > 0 {
            warn!(%lang, missing, "incomplete translation");
        }

        let mut merged = english.clone();
        merged.extend(translation);
        self.catalogs.insert(lang.clone(), merged);
    }

    /// The message `key` in `lang`, or `key` itself if there is no such message.
    pub fn get<'a>(&'a self, lang: &LangCode, key: &'a str) -> &'a str {
        self.catalogs
            .get(lang)
            .and_then(|catalog| catalog.get(key))
            .map_or(key, String::as_str)
    }

}

async fn theme_catalog(
    dir: Option<&Utf8Path>,
    lang: &LangCode,
) -> Result<Option<Catalog>, MessagesError> {
    let Some(path) = dir.map(|dir| dir.join(format!("{lang}.toml"))) else {
        return Ok(None);
    };
    if !path.is_file() {
        return Ok(None);
    }

    debug!(%lang, %path, "loading theme messages");
    let raw = fs::read_to_string(&path)
        .await
        .map_err(|err| MessagesError::ReadCatalog(path.clone(), err))?;
    parse_catalog(path.as_str(), &raw).map(Some)
}

fn builtin_source(lang: &LangCode) -> Option<&'static str> {
    BUILTIN
        .iter()
        .find(|(code, _)| *code == lang.as_str())
        .map(|(_, raw)| *raw)
}

fn parse_catalog(origin: &str, raw: &str) -> Result<Catalog, MessagesError> {
    toml::from_str(raw).map_err(|err| MessagesError::ParseCatalog(origin.to_owned(), err))
}

#[derive(Error, Debug)]
pub enum MessagesError {
    #[error("cannot find messages for language {0}")]
    LanguageNotFound(LangCode),

    #[error("failed to read messages from {0}: {1}")]
    ReadCatalog(Utf8PathBuf, #[source] io::Error),

    #[error("failed to parse messages from {0}: {1}")]
    ParseCatalog(String, #[source] toml::de::Error),
}
