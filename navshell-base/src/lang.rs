use std::fmt;

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer,
};
use thiserror::Error;
use www_navshell::OptionExt as _;

/// A language code as used in site configuration, such as `en` or `pt_br`.
///
/// Language codes are non-empty and contain only lowercase ASCII-alphabetic characters, digits,
/// underscores and dashes.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct LangCode(String);

impl LangCode {
    pub fn english() -> Self {
        Self("en".to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LangCode {
    type Error = ParseLangCodeError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        use ParseLangCodeError::*;

        if raw.is_empty() {
            return Err(Empty);
        }

        raw.chars()
            .find(|&c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'))
            .map(|inv| InvalidChar(raw.clone(), inv))
            .err_or(LangCode(raw))
    }
}

impl TryFrom<&str> for LangCode {
    type Error = ParseLangCodeError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::try_from(raw.to_owned())
    }
}

impl std::str::FromStr for LangCode {
    type Err = ParseLangCodeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::try_from(raw)
    }
}

impl fmt::Display for LangCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LangCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseLangCodeError {
    #[error("language code is empty")]
    Empty,

    #[error("language code \"{0}\" contains invalid char '{1}'")]
    InvalidChar(String, char),
}

struct LangCodeVisitor;

impl<'de> Visitor<'de> for LangCodeVisitor {
    type Value = LangCode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(
            "a non-empty string of lowercase ASCII letters, digits, underscores or dashes",
        )
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        LangCode::try_from(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for LangCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(LangCodeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_regional_codes() {
        assert_eq!(LangCode::try_from("pt_br").unwrap().as_str(), "pt_br");
        assert_eq!(LangCode::try_from("zh-cn").unwrap().as_str(), "zh-cn");
    }

    #[test]
    fn rejects_uppercase() {
        assert_eq!(
            LangCode::try_from("EN"),
            Err(ParseLangCodeError::InvalidChar("EN".into(), 'E'))
        );
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(LangCode::try_from(""), Err(ParseLangCodeError::Empty));
    }

    #[test]
    fn deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            lang: LangCode,
        }

        let parsed: Wrapper = toml::from_str(r#"lang = "es""#).unwrap();
        assert_eq!(parsed.lang.as_str(), "es");
        assert!(toml::from_str::<Wrapper>(r#"lang = "E S""#).is_err());
    }
}
