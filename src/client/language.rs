use tracing::warn;

use super::document::Document;
use super::storage::{Storage, LANGUAGE_KEY};
use crate::i18n::{Language, LanguageStrings};

/// Current display language, persisted under [`LANGUAGE_KEY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageController {
    language: Language,
}

impl LanguageController {
    /// Restore the stored language. Absent or unknown values mean the default language.
    pub fn load(storage: &dyn Storage) -> Self {
        let language = match storage.get(LANGUAGE_KEY) {
            Some(code) => Language::from_code(&code).unwrap_or_else(|e| {
                warn!("Ignoring stored language: {}", e);
                Language::canonical()
            }),
            None => Language::canonical(),
        };
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_rtl(&self) -> bool {
        self.language.is_rtl()
    }

    pub fn strings(&self) -> &'static LanguageStrings {
        LanguageStrings::for_language(self.language)
    }

    pub fn set(&mut self, language: Language, storage: &mut dyn Storage) {
        self.language = language;
        storage.set(LANGUAGE_KEY, language.code());
    }

    /// Switch to the other language, as the header switcher does.
    pub fn toggle(&mut self, storage: &mut dyn Storage) {
        self.set(self.language.other(), storage);
    }

    pub fn apply<D: Document + ?Sized>(&self, document: &mut D) {
        document.set_root_language(self.language.code(), self.language.direction());
    }
}
