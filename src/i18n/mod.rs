//! Internationalization (i18n) module for the bilingual site.
//!
//! All language-related metadata and localized strings live here.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported languages and their metadata
//! - `language`: Type-safe `Language` handle validated against the registry
//! - `strings`: The translation store, one string tree per language
//!
//! # Example
//!
//! ```rust,ignore
//! use sacker_site::i18n::{Language, LanguageStrings};
//!
//! let hebrew = Language::from_code("he")?;
//! assert!(hebrew.is_rtl());
//! let strings = LanguageStrings::for_language(hebrew);
//! ```

mod language;
mod registry;
mod strings;

pub use language::{Language, TextDirection};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::LanguageStrings;
