//! Internationalization (i18n) for the two site locales.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported languages
//! - `language`: Validated `Language` type (Thai default, English)
//! - `strings`: Localized notification and label strings
//! - `content`: `(ElementId, Language) -> text` table for page content
//!
//! # Example
//!
//! ```rust
//! use protana_site::i18n::Language;
//!
//! let thai = Language::default_language();
//! assert_eq!(thai.other(), Language::ENGLISH);
//! assert_eq!(thai.other().short_label(), "EN");
//! ```

mod content;
mod language;
mod registry;
mod strings;

pub use content::{ContentTable, ElementId};
pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::{LanguageStrings, ENGLISH_STRINGS, THAI_STRINGS};
