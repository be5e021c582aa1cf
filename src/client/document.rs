//! Adapter over the rendered page the controllers act on.

use std::collections::BTreeSet;

use crate::i18n::TextDirection;

/// The document-level mutations the preference controllers perform.
///
/// Every mutation is absolute (set, not toggle), so applying the same
/// directives twice leaves the document unchanged.
pub trait Document {
    /// Root element font size in percent.
    fn set_root_font_size(&mut self, percent: u32);

    /// Add (`enabled`) or remove a presentation class on the body.
    fn set_body_class(&mut self, class: &str, enabled: bool);

    /// Root element `lang` and `dir` attributes.
    fn set_root_language(&mut self, lang: &str, direction: TextDirection);
}

/// Declarative description of the document state for a settings record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDirectives {
    pub root_font_size: u32,
    pub body_classes: Vec<(&'static str, bool)>,
}

impl StyleDirectives {
    pub fn apply_to<D: Document + ?Sized>(&self, document: &mut D) {
        document.set_root_font_size(self.root_font_size);
        for (class, enabled) in &self.body_classes {
            document.set_body_class(class, *enabled);
        }
    }
}

/// Records the resulting document state. Used headless and in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryDocument {
    pub root_font_size: u32,
    pub body_classes: BTreeSet<String>,
    pub lang: String,
    pub direction: TextDirection,
}

impl Default for InMemoryDocument {
    fn default() -> Self {
        Self {
            root_font_size: 100,
            body_classes: BTreeSet::new(),
            lang: "en".to_string(),
            direction: TextDirection::Ltr,
        }
    }
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root style attribute, as a browser would render it.
    pub fn root_style(&self) -> String {
        format!("font-size: {}%", self.root_font_size)
    }

    pub fn has_body_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }
}

impl Document for InMemoryDocument {
    fn set_root_font_size(&mut self, percent: u32) {
        self.root_font_size = percent;
    }

    fn set_body_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.body_classes.insert(class.to_string());
        } else {
            self.body_classes.remove(class);
        }
    }

    fn set_root_language(&mut self, lang: &str, direction: TextDirection) {
        self.lang = lang.to_string();
        self.direction = direction;
    }
}
