//! Dual-language page content.
//!
//! Every translatable element on the page carries one payload per locale.
//! The table maps `(ElementId, Language)` to text so rendering never needs to
//! read markup attributes.

use crate::i18n::Language;
use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier of a page element known to the controller.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The Thai and English payloads of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DualText {
    th: String,
    en: String,
}

impl DualText {
    /// Payload for `language`, or `None` when that payload is empty.
    fn text_for(&self, language: Language) -> Option<&str> {
        let text = if language == Language::THAI {
            &self.th
        } else {
            &self.en
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContentTable {
    entries: BTreeMap<ElementId, DualText>,
}

impl ContentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element. Elements missing either payload are not affected
    /// by locale switching, so they are refused here.
    ///
    /// Returns `true` if the element was registered.
    pub fn register(&mut self, id: ElementId, th: Option<String>, en: Option<String>) -> bool {
        match (th, en) {
            (Some(th), Some(en)) => {
                self.entries.insert(id, DualText { th, en });
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    fn text(&self, id: &ElementId, language: Language) -> Option<&str> {
        self.entries.get(id).and_then(|dual| dual.text_for(language))
    }

    /// Every element paired with its text in `language`. Elements whose
    /// payload for that language is empty are skipped, never cleared.
    pub fn render(&self, language: Language) -> impl Iterator<Item = (&ElementId, &str)> {
        self.entries
            .iter()
            .filter_map(move |(id, dual)| dual.text_for(language).map(|text| (id, text)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ContentTable {
        let mut table = ContentTable::new();
        table.register(
            "hero-title".into(),
            Some("สตูดิโอกอล์ฟ".to_string()),
            Some("Golf Studio".to_string()),
        );
        table.register(
            "cta".into(),
            Some("ติดต่อเรา".to_string()),
            Some("Contact us".to_string()),
        );
        table
    }

    #[test]
    fn test_text_lookup_per_language() {
        let table = table();
        let id = ElementId::from("hero-title");

        assert_eq!(table.text(&id, Language::THAI), Some("สตูดิโอกอล์ฟ"));
        assert_eq!(table.text(&id, Language::ENGLISH), Some("Golf Studio"));
    }

    #[test]
    fn test_unknown_element_has_no_text() {
        assert_eq!(table().text(&"missing".into(), Language::THAI), None);
    }

    #[test]
    fn test_register_requires_both_payloads() {
        let mut table = ContentTable::new();

        assert!(!table.register("a".into(), Some("ก".to_string()), None));
        assert!(!table.register("b".into(), None, Some("B".to_string())));
        assert!(table.is_empty());
    }

    #[test]
    fn test_render_skips_empty_payload() {
        let mut table = table();
        table.register("partial".into(), Some(String::new()), Some("Only English".to_string()));

        let thai: Vec<_> = table.render(Language::THAI).collect();
        let english: Vec<_> = table.render(Language::ENGLISH).collect();

        assert_eq!(thai.len(), 2);
        assert!(thai.iter().all(|(id, _)| id.as_str() != "partial"));
        assert_eq!(english.len(), 3);
    }

    #[test]
    fn test_render_returns_all_entries() {
        let table = table();
        let english: Vec<_> = table.render(Language::ENGLISH).map(|(_, t)| t).collect();

        assert!(english.contains(&"Golf Studio"));
        assert!(english.contains(&"Contact us"));
    }
}
