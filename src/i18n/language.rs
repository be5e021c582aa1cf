//! Language type: validated language handle backed by the registry.

use std::fmt;

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};

/// Writing direction of a language, as used by the `dir` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated language.
///
/// Only languages present in the registry can be constructed, so every
/// `Language` has a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "he")
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };

    pub const HEBREW: Language = Language { code: "he" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is in the registry
    /// * `Err` if the code is unknown
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) => Ok(Language { code: config.code }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// The default language, served at unprefixed paths.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// All supported languages in processing order (English first).
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list_all()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// The language a concrete URL path is written in.
    pub fn for_path(path: &str) -> Language {
        Language {
            code: LanguageRegistry::get().for_path(path).code,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the language code is not found in the registry. This cannot
    /// happen for a Language built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn direction(&self) -> TextDirection {
        self.config().direction
    }

    /// True iff the language is written right-to-left.
    pub fn is_rtl(&self) -> bool {
        self.direction() == TextDirection::Rtl
    }

    /// Open Graph locale, e.g. "he_IL".
    pub fn locale(&self) -> &'static str {
        self.config().locale
    }

    pub fn url_prefix(&self) -> &'static str {
        self.config().url_prefix
    }

    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }

    /// The opposite language of the pair.
    pub fn other(&self) -> Language {
        if *self == Language::HEBREW {
            Language::ENGLISH
        } else {
            Language::HEBREW
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
