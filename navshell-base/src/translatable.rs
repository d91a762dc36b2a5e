use std::collections::BTreeMap;

use serde::Deserialize;

use crate::lang::LangCode;

/// A setting that can either hold one value for every language or a value per language.
///
/// In TOML, `blog_title = "Notes"` and `blog_title = { en = "Notes", es = "Notas" }` are both
/// accepted.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Translatable<T> {
    PerLang(BTreeMap<LangCode, T>),
    Same(T),
}

impl<T> Translatable<T> {
    /// Look up the value for `lang`.
    ///
    /// Languages missing from a per-language table fall back to `default_lang`, and then to the
    /// first entry of the table. Only an empty table yields `None`.
    pub fn get(&self, lang: &LangCode, default_lang: &LangCode) -> Option<&T> {
        match self {
            Translatable::Same(value) => Some(value),
            Translatable::PerLang(values) => values
                .get(lang)
                .or_else(|| values.get(default_lang))
                .or_else(|| values.values().next()),
        }
    }
}

impl<T: Default> Default for Translatable<T> {
    fn default() -> Self {
        Translatable::Same(T::default())
    }
}

impl<T> From<T> for Translatable<T> {
    fn from(value: T) -> Self {
        Translatable::Same(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Settings {
        title: Translatable<String>,
    }

    fn lang(code: &str) -> LangCode {
        LangCode::try_from(code).unwrap()
    }

    #[test]
    fn single_value_serves_every_language() {
        let settings: Settings = toml::from_str(r#"title = "Notes""#).unwrap();
        assert_eq!(
            settings.title.get(&lang("de"), &lang("en")).map(String::as_str),
            Some("Notes")
        );
    }

    #[test]
    fn missing_language_falls_back_to_default() {
        let settings: Settings =
            toml::from_str(r#"title = { en = "Notes", es = "Notas" }"#).unwrap();
        assert!(matches!(settings.title, Translatable::PerLang(_)));
        assert_eq!(
            settings.title.get(&lang("es"), &lang("en")).map(String::as_str),
            Some("Notas")
        );
        assert_eq!(
            settings.title.get(&lang("de"), &lang("en")).map(String::as_str),
            Some("Notes")
        );
    }

    #[test]
    fn missing_default_falls_back_to_first_entry() {
        let settings: Settings =
            toml::from_str(r#"title = { es = "Notas", fr = "Notes (fr)" }"#).unwrap();
        assert_eq!(
            settings.title.get(&lang("de"), &lang("en")).map(String::as_str),
            Some("Notas")
        );
    }
}
