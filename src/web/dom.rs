//! `Surface` over the live DOM.

use crate::effects::HeaderStyle;
use crate::form::ContactFields;
use crate::i18n::{ContentTable, ElementId, Language};
use crate::nav::BarStyle;
use crate::notification::{Millis, Notification, NotificationId};
use crate::surface::Surface;
use std::collections::HashMap;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement, ScrollBehavior,
    ScrollToOptions, Window,
};

pub const TRANSLATABLE_SELECTOR: &str = "[data-th][data-en]";
pub const REVEAL_SELECTOR: &str =
    ".course-card, .feature-card, .instructor-card, .facility-item, .value-item";
pub const REVEAL_ID_ATTR: &str = "data-reveal-id";
pub const NOTIFICATION_ID_ATTR: &str = "data-notification-id";

/// Everything found on the page at startup.
pub struct Scan {
    pub surface: DomSurface,
    pub content: ContentTable,
    pub reveal_ids: Vec<ElementId>,
}

pub struct DomSurface {
    window: Window,
    document: Document,
    translatable: HashMap<ElementId, Element>,
    reveal: HashMap<ElementId, HtmlElement>,
    lang_text: Option<Element>,
    hamburger: Option<Element>,
    bars: Vec<HtmlElement>,
    nav_menu: Option<Element>,
    header: Option<HtmlElement>,
    form: Option<HtmlFormElement>,
    submit_button: Option<HtmlButtonElement>,
    notifications: HashMap<NotificationId, HtmlElement>,
}

impl DomSurface {
    /// Collect the elements named by the markup contract.
    pub fn scan(window: Window, document: Document) -> Result<Scan, JsValue> {
        let mut content = ContentTable::new();
        let mut translatable = HashMap::new();
        for (i, element) in select_all(&document, TRANSLATABLE_SELECTOR)?
            .into_iter()
            .enumerate()
        {
            let id = ElementId::new(format!("i18n-{}", i));
            if content.register(
                id.clone(),
                element.get_attribute("data-th"),
                element.get_attribute("data-en"),
            ) {
                translatable.insert(id, element);
            }
        }

        let mut reveal = HashMap::new();
        let mut reveal_ids = Vec::new();
        for (i, element) in select_all(&document, REVEAL_SELECTOR)?.into_iter().enumerate() {
            let Ok(element) = element.dyn_into::<HtmlElement>() else {
                continue;
            };
            let id = ElementId::new(format!("reveal-{}", i));
            element.set_attribute(REVEAL_ID_ATTR, id.as_str())?;

            let style = element.style();
            style.set_property("opacity", "0")?;
            style.set_property("transform", "translateY(30px)")?;
            style.set_property("transition", "opacity 0.6s ease, transform 0.6s ease")?;

            reveal_ids.push(id.clone());
            reveal.insert(id, element);
        }

        let hamburger = document.query_selector(".hamburger")?;
        let bars = match &hamburger {
            Some(h) => h
                .query_selector_all(".bar")?
                .iter_elements()
                .filter_map(|e| e.dyn_into::<HtmlElement>().ok())
                .collect(),
            None => Vec::new(),
        };

        let form = document
            .get_element_by_id("contactForm")
            .and_then(|e| e.dyn_into::<HtmlFormElement>().ok());
        let submit_button = match &form {
            Some(f) => f
                .query_selector(".submit-button")?
                .and_then(|e| e.dyn_into::<HtmlButtonElement>().ok()),
            None => None,
        };

        let surface = DomSurface {
            lang_text: document.query_selector(".lang-text")?,
            nav_menu: document.query_selector(".nav-menu")?,
            header: document
                .query_selector(".header")?
                .and_then(|e| e.dyn_into::<HtmlElement>().ok()),
            hamburger,
            bars,
            form,
            submit_button,
            translatable,
            reveal,
            notifications: HashMap::new(),
            window,
            document,
        };

        Ok(Scan {
            surface,
            content,
            reveal_ids,
        })
    }

    pub fn hamburger(&self) -> Option<&Element> {
        self.hamburger.as_ref()
    }

    pub fn nav_menu(&self) -> Option<&Element> {
        self.nav_menu.as_ref()
    }

    pub fn form(&self) -> Option<&HtmlFormElement> {
        self.form.as_ref()
    }

    pub fn reveal_elements(&self) -> impl Iterator<Item = &HtmlElement> {
        self.reveal.values()
    }

    fn create_notification(&self, notification: &Notification) -> Result<HtmlElement, JsValue> {
        let severity = notification.severity;
        let element: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        element.set_class_name(&format!("notification notification-{}", severity.as_str()));
        element.set_attribute(NOTIFICATION_ID_ATTR, &notification.id.as_u64().to_string())?;
        element.set_inner_html(&format!(
            r#"<div class="notification-content">
                <i class="fas fa-{}"></i>
                <span class="notification-message"></span>
                <button class="notification-close"><i class="fas fa-times"></i></button>
            </div>"#,
            severity.icon()
        ));
        if let Some(span) = element.query_selector(".notification-message")? {
            span.set_text_content(Some(&notification.message));
        }
        element.style().set_css_text(&format!(
            "position: fixed; top: 90px; right: 20px; background: {}; color: white; \
             padding: 1rem 1.5rem; border-radius: 8px; box-shadow: 0 4px 12px rgba(0, 0, 0, 0.2); \
             z-index: 1001; max-width: 400px; animation: slideInRight 0.3s ease;",
            severity.color()
        ));
        Ok(element)
    }
}

/// Every `(name, value)` entry the browser would submit for `form`, in
/// document order. File inputs are skipped.
fn form_entries(form: &HtmlFormElement) -> Result<Vec<(String, String)>, JsValue> {
    let data = FormData::new_with_form(form)?;
    let entries = js_sys::try_iter(&data)?.ok_or("form data is not iterable")?;

    let mut pairs = Vec::new();
    for entry in entries {
        let entry: js_sys::Array = entry?.dyn_into()?;
        if let (Some(name), Some(value)) = (entry.get(0).as_string(), entry.get(1).as_string()) {
            pairs.push((name, value));
        }
    }
    Ok(pairs)
}

fn select_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(document.query_selector_all(selector)?.iter_elements().collect())
}

trait NodeListExt {
    fn iter_elements(&self) -> Box<dyn Iterator<Item = Element> + '_>;
}

impl NodeListExt for web_sys::NodeList {
    fn iter_elements(&self) -> Box<dyn Iterator<Item = Element> + '_> {
        Box::new(
            (0..self.length())
                .filter_map(move |i| self.get(i))
                .filter_map(|node| node.dyn_into::<Element>().ok()),
        )
    }
}

fn log_dom_error(action: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        warn!("Failed to {}: {:?}", action, e);
    }
}

impl Surface for DomSurface {
    fn now(&self) -> Millis {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn set_text(&mut self, element: &ElementId, text: &str) {
        if let Some(node) = self.translatable.get(element) {
            node.set_text_content(Some(text));
        }
    }

    fn set_language_indicator(&mut self, label: &str) {
        match &self.lang_text {
            Some(node) => node.set_text_content(Some(label)),
            None => warn!("Lang text element not found"),
        }
    }

    fn set_document_language(&mut self, language: Language) {
        if let Some(root) = self.document.document_element() {
            log_dom_error("set document lang", root.set_attribute("lang", language.code()));
        }
        if let Some(body) = self.document.body() {
            log_dom_error("set body data-lang", body.set_attribute("data-lang", language.code()));
        }
    }

    fn show_notification(&mut self, notification: &Notification) {
        let result = self.create_notification(notification).and_then(|element| {
            let body = self.document.body().ok_or("document has no body")?;
            body.append_child(&element)?;
            self.notifications.insert(notification.id, element);
            Ok(())
        });
        log_dom_error("show notification", result);
    }

    fn animate_out_notification(&mut self, id: NotificationId) {
        if let Some(element) = self.notifications.get(&id) {
            log_dom_error(
                "animate notification",
                element.style().set_property("animation", "slideOutRight 0.3s ease"),
            );
        }
    }

    fn remove_notification(&mut self, id: NotificationId) {
        if let Some(element) = self.notifications.remove(&id) {
            element.remove();
        }
    }

    fn render_menu(&mut self, open: bool, bars: &[BarStyle; 3]) {
        for target in [&self.hamburger, &self.nav_menu].into_iter().flatten() {
            log_dom_error(
                "toggle menu class",
                target.class_list().toggle_with_force("active", open).map(|_| ()),
            );
        }
        for (element, bar) in self.bars.iter().zip(bars.iter()) {
            let style = element.style();
            log_dom_error("style bar", style.set_property("transform", bar.transform));
            log_dom_error(
                "style bar",
                style.set_property("opacity", &bar.opacity.to_string()),
            );
        }
    }

    fn render_header(&mut self, header_style: HeaderStyle) {
        let Some(header) = &self.header else {
            return;
        };
        let style = header.style();
        let (background, blur) = if header_style.solid {
            ("rgba(27, 38, 44, 0.95)", "blur(10px)")
        } else {
            ("", "")
        };
        let transform = if header_style.hidden {
            "translateY(-100%)"
        } else {
            "translateY(0)"
        };
        log_dom_error("style header", style.set_property("background", background));
        log_dom_error("style header", style.set_property("backdrop-filter", blur));
        log_dom_error("style header", style.set_property("transform", transform));
    }

    fn reveal(&mut self, element: &ElementId) {
        if let Some(node) = self.reveal.get(element) {
            let style = node.style();
            log_dom_error("reveal", style.set_property("opacity", "1"));
            log_dom_error("reveal", style.set_property("transform", "translateY(0)"));
        }
    }

    fn scroll_to(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn read_form(&self) -> ContactFields {
        let Some(form) = &self.form else {
            return ContactFields::default();
        };
        match form_entries(form) {
            Ok(entries) => ContactFields::from_entries(entries),
            Err(e) => {
                warn!("Failed to read contact form: {:?}", e);
                ContactFields::default()
            }
        }
    }

    fn clear_form(&mut self) {
        if let Some(form) = &self.form {
            form.reset();
        }
    }

    fn submit_label(&self) -> String {
        self.submit_button
            .as_ref()
            .map(|b| b.inner_html())
            .unwrap_or_default()
    }

    fn set_submit_control(&mut self, label: &str, busy: bool) {
        let Some(button) = &self.submit_button else {
            return;
        };
        if busy {
            button.set_inner_html(r#"<i class="fas fa-spinner fa-spin"></i> "#);
            log_dom_error(
                "set busy label",
                button.insert_adjacent_text("beforeend", label),
            );
        } else {
            button.set_inner_html(label);
        }
        button.set_disabled(busy);
    }

    fn replace_address(&mut self, address: &str) {
        let result = self.window.history().and_then(|history| {
            history.replace_state_with_url(&JsValue::NULL, &self.document.title(), Some(address))
        });
        log_dom_error("replace address", result);
    }
}
