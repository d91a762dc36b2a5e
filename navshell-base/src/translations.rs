use camino::Utf8Path;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::lang::LangCode;

/// One language the site is published in, and the URL its pages live under.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Translation {
    pub lang: LangCode,
    pub root: String,
}

impl Translation {
    pub fn new(lang: LangCode, root: impl Into<String>) -> Self {
        Self {
            lang,
            root: root.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Path,
    Ext,
    Lang,
}

/// Where the translated sources of a page live, such as `{path}.{lang}.{ext}`.
#[derive(Clone, Debug)]
pub struct TranslationPattern {
    pieces: Vec<Piece>,
    matcher: Regex,
}

impl TranslationPattern {
    pub fn new(raw: &str, langs: &[LangCode]) -> Result<Self, TranslationPatternError> {
        use TranslationPatternError::*;

        let pieces = split_pattern(raw);
        let required = [
            (Piece::Path, "{path}"),
            (Piece::Ext, "{ext}"),
            (Piece::Lang, "{lang}"),
        ];
        for (piece, name) in required {
            if !pieces.contains(&piece) {
                return Err(MissingPlaceholder(raw.to_owned(), name));
            }
        }

        let lang_alternatives = langs
            .iter()
            .map(|lang| regex::escape(lang.as_str()))
            .collect::<Vec<_>>()
            .join("|");

        let mut expr = String::from("^");
        for piece in &pieces {
            match piece {
                Piece::Literal(text) => expr.push_str(&regex::escape(text)),
                Piece::Path => expr.push_str("(?P<path>.+?)"),
                Piece::Ext => expr.push_str(r"(?P<ext>[^./]+)"),
                Piece::Lang => expr.push_str(&format!("(?P<lang>{lang_alternatives})")),
            }
        }
        expr.push('$');

        let matcher = Regex::new(&expr).map_err(|err| InvalidPattern(raw.to_owned(), err))?;
        Ok(Self { pieces, matcher })
    }

    /// The path where the `lang` version of the source at `path` would be found.
    ///
    /// A path that already names a language is rewritten to `lang`, or back to a plain
    /// `path.ext` when `lang` is the default language. An untranslated path is returned as is for
    /// the default language and gets `lang` inserted otherwise. Paths without an extension have
    /// no translated form and are returned unchanged.
    pub fn candidate(&self, path: &str, lang: &LangCode, default_lang: &LangCode) -> String {
        if let Some(captures) = self.matcher.captures(path) {
            let parts = (
                captures.name("path").map(|m| m.as_str()),
                captures.name("ext").map(|m| m.as_str()),
                captures.name("lang").map(|m| m.as_str()),
            );
            if let (Some(stem), Some(ext), Some(found)) = parts {
                if !stem.is_empty() && !ext.is_empty() && !found.is_empty() {
                    return if found == lang.as_str() {
                        path.to_owned()
                    } else if lang == default_lang {
                        format!("{stem}.{ext}")
                    } else {
                        self.fill(stem, ext, lang.as_str())
                    };
                }
            }
        }

        if lang == default_lang {
            return path.to_owned();
        }

        match Utf8Path::new(path).extension() {
            Some(ext) => {
                let stem = &path[..path.len() - ext.len() - 1];
                self.fill(stem, ext, lang.as_str())
            }
            None => path.to_owned(),
        }
    }

    fn fill(&self, path: &str, ext: &str, lang: &str) -> String {
        self.pieces
            .iter()
            .map(|piece| match piece {
                Piece::Literal(text) => text.as_str(),
                Piece::Path => path,
                Piece::Ext => ext,
                Piece::Lang => lang,
            })
            .collect()
    }
}

fn split_pattern(raw: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut rest = raw;

    while !rest.is_empty() {
        let placeholder = [("{path}", Piece::Path), ("{ext}", Piece::Ext), ("{lang}", Piece::Lang)]
            .into_iter()
            .find(|(name, _)| rest.starts_with(name));

        match placeholder {
            Some((name, piece)) => {
                if !literal.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                }
                pieces.push(piece);
                rest = &rest[name.len()..];
            }
            None => {
                let mut chars = rest.chars();
                if let Some(c) = chars.next() {
                    literal.push(c);
                }
                rest = chars.as_str();
            }
        }
    }

    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    pieces
}

#[derive(Error, Debug)]
pub enum TranslationPatternError {
    #[error("translation pattern \"{0}\" does not contain {1}")]
    MissingPlaceholder(String, &'static str),

    #[error("translation pattern \"{0}\" cannot be matched: {1}")]
    InvalidPattern(String, #[source] regex::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(code: &str) -> LangCode {
        LangCode::try_from(code).unwrap()
    }

    fn pattern(raw: &str) -> TranslationPattern {
        TranslationPattern::new(raw, &[lang("es"), lang("en")]).unwrap()
    }

    #[test]
    fn lang_before_extension() {
        let pattern = pattern("{path}.{lang}.{ext}");
        let (en, es) = (lang("en"), lang("es"));

        assert_eq!(pattern.candidate("*.rst", &es, &en), "*.es.rst");
        assert_eq!(pattern.candidate("fancy.post.rst", &es, &en), "fancy.post.es.rst");
        assert_eq!(pattern.candidate("*.es.rst", &es, &en), "*.es.rst");
        assert_eq!(pattern.candidate("*.es.rst", &en, &en), "*.rst");
        assert_eq!(
            pattern.candidate("cache/posts/fancy.post.es.html", &en, &en),
            "cache/posts/fancy.post.html"
        );
        assert_eq!(
            pattern.candidate("cache/posts/fancy.post.html", &es, &en),
            "cache/posts/fancy.post.es.html"
        );
        assert_eq!(
            pattern.candidate("cache/stories/charts.html", &es, &en),
            "cache/stories/charts.es.html"
        );
        assert_eq!(
            pattern.candidate("cache/stories/charts.html", &en, &en),
            "cache/stories/charts.html"
        );
    }

    #[test]
    fn lang_after_extension() {
        let pattern = pattern("{path}.{ext}.{lang}");
        let (en, es) = (lang("en"), lang("es"));

        assert_eq!(pattern.candidate("*.rst", &es, &en), "*.rst.es");
        assert_eq!(pattern.candidate("*.rst.es", &es, &en), "*.rst.es");
        assert_eq!(pattern.candidate("*.rst.es", &en, &en), "*.rst");
        assert_eq!(
            pattern.candidate("cache/posts/fancy.post.html.es", &en, &en),
            "cache/posts/fancy.post.html"
        );
        assert_eq!(
            pattern.candidate("cache/posts/fancy.post.html", &es, &en),
            "cache/posts/fancy.post.html.es"
        );
    }

    #[test]
    fn extensionless_paths_are_untouched() {
        let pattern = pattern("{path}.{lang}.{ext}");
        assert_eq!(pattern.candidate("pages/README", &lang("es"), &lang("en")), "pages/README");
    }

    #[test]
    fn placeholders_are_required() {
        let err = TranslationPattern::new("{path}.{ext}", &[lang("en")]).unwrap_err();
        assert!(matches!(err, TranslationPatternError::MissingPlaceholder(_, "{lang}")));
    }
}
