use crate::i18n::Language;
use crate::preferences::PreferenceStore;
use tracing::{debug, warn};

/// The active locale and its persisted copy.
///
/// Exactly one language is active at a time. The stored value is read once at
/// startup; an absent or unrecognised value falls back to the default
/// language.
#[derive(Debug)]
pub struct LocaleSwitch<P: PreferenceStore> {
    active: Language,
    store: P,
    key: String,
}

impl<P: PreferenceStore> LocaleSwitch<P> {
    pub fn load(store: P, key: impl Into<String>) -> Self {
        let key = key.into();

        let active = match store.load(&key) {
            Some(code) => Language::from_code(&code).unwrap_or_else(|e| {
                warn!("Ignoring stored language preference: {}", e);
                Language::default_language()
            }),
            None => Language::default_language(),
        };
        debug!("Initial language: {}", active);

        Self { active, store, key }
    }

    pub fn active(&self) -> Language {
        self.active
    }

    /// Flip to the other language and persist it.
    ///
    /// A storage failure is logged; the switch still takes effect for the
    /// current page.
    pub fn toggle(&mut self) -> Language {
        self.active = self.active.other();

        if let Err(e) = self.store.save(&self.key, self.active.code()) {
            warn!("Failed to save language preference: {}", e);
        } else {
            debug!("Language saved: {}", self.active);
        }

        self.active
    }

    pub fn store(&self) -> &P {
        &self.store
    }
}
