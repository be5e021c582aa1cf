//! Language registry: Single source of truth for all supported languages.
//!
//! The registry is initialized once on first access through a `OnceLock` and is
//! immutable afterwards.

use std::sync::OnceLock;

use super::TextDirection;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "he")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Hebrew")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "עברית")
    pub native_name: &'static str,

    /// Writing direction used for the document root
    pub direction: TextDirection,

    /// Open Graph locale (e.g., "en_US", "he_IL")
    pub locale: &'static str,

    /// Prefix prepended to every site path for this language ("" or "/he")
    pub url_prefix: &'static str,

    /// Whether this is the default language served at unprefixed paths (only one should be true)
    pub is_canonical: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all languages in processing order (canonical first).
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Get the canonical language configuration.
    ///
    /// # Panics
    /// Panics if no canonical language is found or if multiple canonical
    /// languages are defined (this indicates a configuration error).
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }

    /// Find the language whose URL prefix starts the given path.
    ///
    /// Prefixed languages are matched on a whole path segment, so `/help` is
    /// not treated as Hebrew. Paths without a known prefix belong to the
    /// canonical language.
    pub fn for_path(&self, path: &str) -> &LanguageConfig {
        self.languages
            .iter()
            .filter(|lang| !lang.url_prefix.is_empty())
            .find(|lang| {
                path.strip_prefix(lang.url_prefix)
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
            })
            .unwrap_or_else(|| self.canonical())
    }
}

/// Default language configurations: English (canonical) and Hebrew.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            direction: TextDirection::Ltr,
            locale: "en_US",
            url_prefix: "",
            is_canonical: true,
        },
        LanguageConfig {
            code: "he",
            name: "Hebrew",
            native_name: "עברית",
            direction: TextDirection::Rtl,
            locale: "he_IL",
            url_prefix: "/he",
            is_canonical: false,
        },
    ]
}
