use std::time::Duration;

use super::accessibility::{AccessibilityController, AccessibilitySettings, Setting};
use super::consent::{ConsentController, ConsentDecision, ConsentState};
use super::document::Document;
use super::language::LanguageController;
use super::storage::Storage;
use crate::i18n::{Language, LanguageStrings};

/// One visitor's page session.
///
/// Owns the storage handle, the document and the three preference
/// controllers. Every mutation persists first and then re-applies the
/// document effects from the full state.
pub struct ClientSession<S: Storage, D: Document> {
    storage: S,
    document: D,
    language: LanguageController,
    accessibility: AccessibilityController,
    consent: ConsentController,
    panel_open: bool,
}

impl<S: Storage, D: Document> ClientSession<S, D> {
    /// Restore all preferences from `storage` and apply them to `document`.
    pub fn start(storage: S, document: D) -> Self {
        let mut session = Self {
            language: LanguageController::load(&storage),
            accessibility: AccessibilityController::load(&storage),
            consent: ConsentController::load(&storage),
            storage,
            document,
            panel_open: false,
        };
        session.apply();
        session
    }

    fn apply(&mut self) {
        self.language.apply(&mut self.document);
        self.accessibility.apply(&mut self.document);
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_parts(self) -> (S, D) {
        (self.storage, self.document)
    }

    // Language

    pub fn language(&self) -> Language {
        self.language.language()
    }

    pub fn is_rtl(&self) -> bool {
        self.language.is_rtl()
    }

    /// Translation tree of the active language.
    pub fn strings(&self) -> &'static LanguageStrings {
        self.language.strings()
    }

    pub fn set_language(&mut self, language: Language) {
        self.language.set(language, &mut self.storage);
        self.apply();
    }

    pub fn toggle_language(&mut self) {
        self.language.toggle(&mut self.storage);
        self.apply();
    }

    // Accessibility

    pub fn accessibility(&self) -> &AccessibilitySettings {
        self.accessibility.settings()
    }

    pub fn update_accessibility(&mut self, setting: Setting) {
        self.accessibility.update(setting, &mut self.storage);
        self.apply();
    }

    pub fn increase_font_size(&mut self) {
        self.accessibility.increase_font_size(&mut self.storage);
        self.apply();
    }

    pub fn decrease_font_size(&mut self) {
        self.accessibility.decrease_font_size(&mut self.storage);
        self.apply();
    }

    pub fn reset_accessibility(&mut self) {
        self.accessibility.reset(&mut self.storage);
        self.apply();
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    // Consent

    pub fn consent(&self) -> ConsentState {
        self.consent.state()
    }

    pub fn decide_consent(&mut self, decision: ConsentDecision) -> bool {
        self.consent.decide(decision, &mut self.storage)
    }

    pub fn banner_visible(&self, elapsed: Duration) -> bool {
        self.consent.banner_visible(elapsed)
    }
}
