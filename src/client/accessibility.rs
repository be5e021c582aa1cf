//! Accessibility adjustments: font scale and presentation toggles.
//!
//! The whole settings record is persisted as camelCase JSON under
//! [`ACCESSIBILITY_KEY`] after every change and the document effects are
//! always derived from the complete record.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::document::{Document, StyleDirectives};
use super::storage::{Storage, ACCESSIBILITY_KEY};

pub const MIN_FONT_SIZE: u32 = 80;
pub const MAX_FONT_SIZE: u32 = 150;
pub const FONT_SIZE_STEP: u32 = 10;
pub const DEFAULT_FONT_SIZE: u32 = 100;

pub const HIGH_CONTRAST_CLASS: &str = "accessibility-high-contrast";
pub const GRAYSCALE_CLASS: &str = "accessibility-grayscale";
pub const BIG_CURSOR_CLASS: &str = "accessibility-big-cursor";
pub const HIGHLIGHT_LINKS_CLASS: &str = "accessibility-highlight-links";
pub const PAUSE_ANIMATIONS_CLASS: &str = "accessibility-pause-animations";
pub const TEXT_SPACING_CLASS: &str = "accessibility-text-spacing";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilitySettings {
    /// Root font size in percent
    pub font_size: u32,
    pub high_contrast: bool,
    pub grayscale: bool,
    pub big_cursor: bool,
    pub highlight_links: bool,
    pub pause_animations: bool,
    pub text_spacing: bool,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            high_contrast: false,
            grayscale: false,
            big_cursor: false,
            highlight_links: false,
            pause_animations: false,
            text_spacing: false,
        }
    }
}

impl AccessibilitySettings {
    /// Document effects of this record. Each field maps to its own mutation.
    pub fn directives(&self) -> StyleDirectives {
        StyleDirectives {
            root_font_size: self.font_size,
            body_classes: vec![
                (HIGH_CONTRAST_CLASS, self.high_contrast),
                (GRAYSCALE_CLASS, self.grayscale),
                (BIG_CURSOR_CLASS, self.big_cursor),
                (HIGHLIGHT_LINKS_CLASS, self.highlight_links),
                (PAUSE_ANIMATIONS_CLASS, self.pause_animations),
                (TEXT_SPACING_CLASS, self.text_spacing),
            ],
        }
    }

    fn normalized(mut self) -> Self {
        self.font_size = normalize_font_size(self.font_size);
        self
    }
}

/// Clamp into the supported range and snap to the nearest step.
pub fn normalize_font_size(percent: u32) -> u32 {
    let clamped = percent.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    ((clamped + FONT_SIZE_STEP / 2) / FONT_SIZE_STEP * FONT_SIZE_STEP).min(MAX_FONT_SIZE)
}

/// A single-field update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    FontSize(u32),
    HighContrast(bool),
    Grayscale(bool),
    BigCursor(bool),
    HighlightLinks(bool),
    PauseAnimations(bool),
    TextSpacing(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessibilityController {
    settings: AccessibilitySettings,
}

impl AccessibilityController {
    /// Restore stored settings. Malformed records load as the defaults.
    pub fn load(storage: &dyn Storage) -> Self {
        let settings = match storage.get(ACCESSIBILITY_KEY) {
            Some(json) => match serde_json::from_str::<AccessibilitySettings>(&json) {
                Ok(settings) => settings.normalized(),
                Err(e) => {
                    warn!("Ignoring malformed accessibility settings: {}", e);
                    AccessibilitySettings::default()
                }
            },
            None => AccessibilitySettings::default(),
        };
        Self { settings }
    }

    pub fn settings(&self) -> &AccessibilitySettings {
        &self.settings
    }

    pub fn update(&mut self, setting: Setting, storage: &mut dyn Storage) {
        match setting {
            Setting::FontSize(percent) => self.settings.font_size = normalize_font_size(percent),
            Setting::HighContrast(on) => self.settings.high_contrast = on,
            Setting::Grayscale(on) => self.settings.grayscale = on,
            Setting::BigCursor(on) => self.settings.big_cursor = on,
            Setting::HighlightLinks(on) => self.settings.highlight_links = on,
            Setting::PauseAnimations(on) => self.settings.pause_animations = on,
            Setting::TextSpacing(on) => self.settings.text_spacing = on,
        }
        self.save(storage);
    }

    /// One step larger. Returns `false` (and changes nothing) at the maximum.
    pub fn increase_font_size(&mut self, storage: &mut dyn Storage) -> bool {
        if self.settings.font_size >= MAX_FONT_SIZE {
            return false;
        }
        self.update(
            Setting::FontSize(self.settings.font_size + FONT_SIZE_STEP),
            storage,
        );
        true
    }

    /// One step smaller. Returns `false` (and changes nothing) at the minimum.
    pub fn decrease_font_size(&mut self, storage: &mut dyn Storage) -> bool {
        if self.settings.font_size <= MIN_FONT_SIZE {
            return false;
        }
        self.update(
            Setting::FontSize(self.settings.font_size - FONT_SIZE_STEP),
            storage,
        );
        true
    }

    pub fn reset(&mut self, storage: &mut dyn Storage) {
        self.settings = AccessibilitySettings::default();
        self.save(storage);
    }

    pub fn apply<D: Document + ?Sized>(&self, document: &mut D) {
        self.settings.directives().apply_to(document);
    }

    fn save(&self, storage: &mut dyn Storage) {
        match serde_json::to_string(&self.settings) {
            Ok(json) => storage.set(ACCESSIBILITY_KEY, &json),
            Err(e) => warn!("Failed to serialize accessibility settings: {}", e),
        }
    }
}
