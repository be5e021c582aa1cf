//! Runtime preference controllers of the site shell.
//!
//! Language, accessibility and cookie consent preferences live in
//! client-local storage. Each controller owns exactly one storage key and is
//! its only writer. [`ClientSession`] ties them to one storage handle and one
//! document.

pub mod accessibility;
pub mod consent;
pub mod document;
pub mod language;
pub mod session;
pub mod storage;

pub use accessibility::{AccessibilityController, AccessibilitySettings, Setting};
pub use consent::{ConsentController, ConsentDecision, ConsentState};
pub use document::{Document, InMemoryDocument, StyleDirectives};
pub use language::LanguageController;
pub use session::ClientSession;
pub use storage::{FileStorage, MemoryStorage, Storage};
