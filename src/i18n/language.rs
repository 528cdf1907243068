//! Language type: the validated two-locale representation.

use crate::i18n::strings::{ENGLISH_STRINGS, THAI_STRINGS};
use crate::i18n::{LanguageConfig, LanguageRegistry, LanguageStrings};
use anyhow::{bail, Result};
use std::fmt;

/// A validated language.
///
/// Only languages present in the registry can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code ("th" or "en")
    code: &'static str,
}

impl Language {
    pub const THAI: Language = Language { code: "th" };
    pub const ENGLISH: Language = Language { code: "en" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is registered
    /// * `Err` if the code is unknown
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) => Ok(Language { code: config.code }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// The language used when no preference has been stored.
    pub fn default_language() -> Language {
        let config = LanguageRegistry::get().default_language();
        Language { code: config.code }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// The opposite locale. The site only ever has two.
    pub fn other(&self) -> Language {
        if *self == Language::THAI {
            Language::ENGLISH
        } else {
            Language::THAI
        }
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the language code is not found in the registry. This cannot
    /// happen for a Language built via `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Label shown on the toggle control (e.g., "TH", "EN").
    pub fn short_label(&self) -> &'static str {
        self.config().short_label
    }

    /// Localized user-facing strings for this language.
    pub fn strings(&self) -> &'static LanguageStrings {
        if *self == Language::THAI {
            &THAI_STRINGS
        } else {
            &ENGLISH_STRINGS
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::default_language()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
