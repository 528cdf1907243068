//! The page as seen by the controller.
//!
//! `Surface` is the markup contract: translatable elements, the language
//! toggle label, the hamburger bars, the header, the reveal cards, the contact
//! form and the address bar. The browser implements it over the DOM;
//! `HeadlessSurface` records every update so behavior can be checked without
//! a browser.

use crate::effects::HeaderStyle;
use crate::form::ContactFields;
use crate::i18n::{ElementId, Language};
use crate::nav::BarStyle;
use crate::notification::{Millis, Notification, NotificationId};
use std::collections::{BTreeMap, BTreeSet};

pub trait Surface {
    /// Current time on the page clock.
    fn now(&self) -> Millis;

    // Language
    fn set_text(&mut self, element: &ElementId, text: &str);
    fn set_language_indicator(&mut self, label: &str);
    fn set_document_language(&mut self, language: Language);

    // Notifications
    fn show_notification(&mut self, notification: &Notification);
    fn animate_out_notification(&mut self, id: NotificationId);
    fn remove_notification(&mut self, id: NotificationId);

    // Navigation
    fn render_menu(&mut self, open: bool, bars: &[BarStyle; 3]);

    // Scroll effects
    fn render_header(&mut self, style: HeaderStyle);
    fn reveal(&mut self, element: &ElementId);
    fn scroll_to(&mut self, top: f64);

    // Contact form
    fn read_form(&self) -> ContactFields;
    fn clear_form(&mut self);
    fn submit_label(&self) -> String;
    fn set_submit_control(&mut self, label: &str, busy: bool);

    // Address bar
    fn replace_address(&mut self, address: &str);
}

/// Submit button as last rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
    pub busy: bool,
}

/// In-memory page that records what the controller rendered.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    pub clock: Millis,
    pub texts: BTreeMap<ElementId, String>,
    pub language_indicator: String,
    pub document_language: Option<Language>,
    pub notifications: Vec<Notification>,
    pub leaving: BTreeSet<NotificationId>,
    pub removed: Vec<NotificationId>,
    pub menu_open: bool,
    pub bars: Option<[BarStyle; 3]>,
    pub menu_renders: usize,
    pub header: HeaderStyle,
    pub revealed: BTreeSet<ElementId>,
    pub scrolled_to: Option<f64>,
    pub form: ContactFields,
    pub submit: SubmitControl,
    pub address: String,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self {
            submit: SubmitControl {
                label: "Send".to_string(),
                busy: false,
            },
            address: "https://protana.example/".to_string(),
            ..Self::default()
        }
    }

    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::new()
        }
    }

    pub fn advance_clock(&mut self, ms: Millis) {
        self.clock += ms;
    }

    pub fn text(&self, element: &str) -> Option<&str> {
        self.texts.get(&ElementId::from(element)).map(String::as_str)
    }

    /// The single visible notification, if any.
    pub fn visible_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }
}

impl Surface for HeadlessSurface {
    fn now(&self) -> Millis {
        self.clock
    }

    fn set_text(&mut self, element: &ElementId, text: &str) {
        self.texts.insert(element.clone(), text.to_string());
    }

    fn set_language_indicator(&mut self, label: &str) {
        self.language_indicator = label.to_string();
    }

    fn set_document_language(&mut self, language: Language) {
        self.document_language = Some(language);
    }

    fn show_notification(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }

    fn animate_out_notification(&mut self, id: NotificationId) {
        self.leaving.insert(id);
    }

    fn remove_notification(&mut self, id: NotificationId) {
        self.notifications.retain(|n| n.id != id);
        self.leaving.remove(&id);
        self.removed.push(id);
    }

    fn render_menu(&mut self, open: bool, bars: &[BarStyle; 3]) {
        self.menu_open = open;
        self.bars = Some(*bars);
        self.menu_renders += 1;
    }

    fn render_header(&mut self, style: HeaderStyle) {
        self.header = style;
    }

    fn reveal(&mut self, element: &ElementId) {
        self.revealed.insert(element.clone());
    }

    fn scroll_to(&mut self, top: f64) {
        self.scrolled_to = Some(top);
    }

    fn read_form(&self) -> ContactFields {
        self.form.clone()
    }

    fn clear_form(&mut self) {
        self.form = ContactFields::default();
    }

    fn submit_label(&self) -> String {
        self.submit.label.clone()
    }

    fn set_submit_control(&mut self, label: &str, busy: bool) {
        self.submit = SubmitControl {
            label: label.to_string(),
            busy,
        };
    }

    fn replace_address(&mut self, address: &str) {
        self.address = address.to_string();
    }
}
