//! Browser entry point: scans the page, builds the controller and wires every
//! DOM event to it.

mod dom;
mod storage;

use crate::config::SiteConfig;
use crate::controller::SiteController;
use crate::form::{format_phone_input, keeps_focus_class, FormClient};
use crate::i18n::ElementId;
use crate::logging;
use crate::notification::{NotificationId, TimerHandle};
use crate::surface::Surface;
use dom::{DomSurface, NOTIFICATION_ID_ATTR, REVEAL_ID_ATTR};
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use storage::BrowserStore;
use tracing::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, DocumentReadyState, Element, ErrorEvent, Event, EventTarget, HtmlElement,
    HtmlInputElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Node, Window,
};

const NOTIFICATION_STYLES: &str = r#"
@keyframes slideInRight {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}
@keyframes slideOutRight {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(100%); opacity: 0; }
}
.notification-content { display: flex; align-items: center; gap: 10px; }
.notification-close {
    background: none; border: none; color: white;
    cursor: pointer; padding: 5px; margin-left: auto;
}
.notification-close:hover { opacity: 0.8; }
"#;

type Controller = SiteController<DomSurface, BrowserStore>;

struct App {
    controller: RefCell<Controller>,
    client: FormClient,
    timer: RefCell<TimerHandle<Timeout>>,
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logging::init();

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    if document.ready_state() == DocumentReadyState::Loading {
        let target = document.clone();
        let on_ready = Closure::once(move || {
            if let Err(e) = init(window, document) {
                error!("Site initialization failed: {:?}", e);
            }
        });
        target.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
        Ok(())
    } else {
        init(window, document)
    }
}

fn init(window: Window, document: Document) -> Result<(), JsValue> {
    info!("Pro Tana Golf Studio - Website loaded successfully");

    // The site only ships a dark theme
    if let Some(root) = document.document_element() {
        root.set_attribute("data-theme", "dark")?;
    }

    let scan = DomSurface::scan(window.clone(), document.clone())?;
    let config = SiteConfig::default();

    let action = scan.surface.form().and_then(|f| f.get_attribute("action"));
    let client = FormClient::for_form(action.as_deref(), &config);

    let reveal_threshold = config.reveal_threshold;
    let reveal_root_margin = config.reveal_root_margin.clone();

    let mut controller = SiteController::new(config, scan.surface, BrowserStore, scan.content);
    for id in scan.reveal_ids {
        controller.observe_reveal(id);
    }
    controller.start(&window.location().href()?, window.scroll_y().unwrap_or(0.0));

    let app = Rc::new(App {
        controller: RefCell::new(controller),
        client,
        timer: RefCell::new(TimerHandle::new()),
    });

    wire_language_toggle(&app, &document)?;
    wire_menu(&app, &document, &window)?;
    wire_form(&app)?;
    wire_anchors(&app, &document)?;
    wire_scroll(&app, &window)?;
    wire_reveal(&app, reveal_threshold, &reveal_root_margin)?;
    enhance_form_fields(&document)?;
    add_notification_styles(&document)?;
    wire_diagnostics(&window)?;

    rearm_timer(&app);

    if let Some(body) = document.body() {
        body.class_list().add_1("loaded")?;
    }
    Ok(())
}

/// Attach a listener for the lifetime of the page.
fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Run a controller update, then re-arm the notification timer.
fn update(app: &Rc<App>, f: impl FnOnce(&mut Controller)) {
    {
        let mut controller = app.controller.borrow_mut();
        f(&mut controller);
    }
    rearm_timer(app);
}

/// Keep exactly one timer armed for the controller's next deadline.
fn rearm_timer(app: &Rc<App>) {
    let deadline = app.controller.borrow().next_timer_deadline();
    if !app.timer.borrow().needs_arming(deadline) {
        return;
    }

    let timeout = deadline.map(|at| {
        let now = app.controller.borrow().surface().now();
        let delay = (at - now).max(0.0).ceil() as u32;
        let weak = Rc::downgrade(app);

        Timeout::new(delay, move || {
            let Some(app) = weak.upgrade() else {
                return;
            };
            app.timer.borrow_mut().fired();
            update(&app, |c| c.on_timer());
        })
    });

    app.timer.borrow_mut().arm(deadline, timeout);
}

fn wire_language_toggle(app: &Rc<App>, document: &Document) -> Result<(), JsValue> {
    let Some(toggle) = document.get_element_by_id("lang-toggle") else {
        return Ok(());
    };
    let app = Rc::clone(app);
    listen(&toggle, "click", move |_| {
        update(&app, |c| {
            c.toggle_language();
        })
    })
}

fn wire_menu(app: &Rc<App>, document: &Document, window: &Window) -> Result<(), JsValue> {
    let (hamburger, nav_menu) = {
        let controller = app.controller.borrow();
        let surface = controller.surface();
        (surface.hamburger().cloned(), surface.nav_menu().cloned())
    };

    if let Some(hamburger) = &hamburger {
        let app = Rc::clone(app);
        listen(hamburger, "click", move |_| {
            update(&app, |c| {
                c.toggle_menu();
            })
        })?;
    }

    if let Some(nav_menu) = &nav_menu {
        let app = Rc::clone(app);
        listen(nav_menu, "click", move |event| {
            let is_nav_link = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(|e| e.class_list().contains("nav-link"))
                .unwrap_or(false);
            if is_nav_link {
                update(&app, |c| c.on_nav_link_click());
            }
        })?;
    }

    // Outside clicks close the menu. Notification close buttons are
    // delegated here too.
    {
        let app = Rc::clone(app);
        listen(document, "click", move |event| {
            let target = event.target();
            let node = target.as_ref().and_then(|t| t.dyn_ref::<Node>());

            if let Some(id) = target
                .as_ref()
                .and_then(|t| t.dyn_ref::<Element>())
                .and_then(closed_notification)
            {
                update(&app, |c| c.dismiss_notification(id));
            }

            let inside = |container: &Option<Element>| {
                container
                    .as_ref()
                    .map(|c| c.contains(node))
                    .unwrap_or(false)
            };
            let (inside_toggle, inside_menu) = (inside(&hamburger), inside(&nav_menu));
            update(&app, |c| c.on_document_click(inside_toggle, inside_menu));
        })?;
    }

    let app = Rc::clone(app);
    let resize_window = window.clone();
    listen(window, "resize", move |_| {
        let width = resize_window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0);
        update(&app, |c| c.on_resize(width));
    })
}

/// The notification whose close button was clicked, if any.
fn closed_notification(target: &Element) -> Option<NotificationId> {
    target.closest(".notification-close").ok().flatten()?;
    target
        .closest(".notification")
        .ok()
        .flatten()?
        .get_attribute(NOTIFICATION_ID_ATTR)
        .and_then(|raw| NotificationId::parse(&raw))
}

fn wire_form(app: &Rc<App>) -> Result<(), JsValue> {
    let form = app.controller.borrow().surface().form().cloned();
    let Some(form) = form else {
        return Ok(());
    };

    let app = Rc::clone(app);
    listen(&form, "submit", move |event| {
        event.prevent_default();

        let begun = app.controller.borrow_mut().begin_submit();
        rearm_timer(&app);

        let Some(Ok(submission)) = begun else {
            return;
        };
        let app = Rc::clone(&app);
        wasm_bindgen_futures::spawn_local(async move {
            let result = app.client.send(&submission).await;
            update(&app, |c| c.finish_submit(result));
        });
    })
}

fn wire_anchors(app: &Rc<App>, document: &Document) -> Result<(), JsValue> {
    let links = document.query_selector_all("a[href^=\"#\"]")?;
    for i in 0..links.length() {
        let Some(link) = links.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let app = Rc::clone(app);
        let doc = document.clone();
        let href_source = link.clone();
        listen(&link, "click", move |event| {
            event.prevent_default();
            let href = href_source.get_attribute("href").unwrap_or_default();
            let target_top = crate::effects::anchor_target(&href)
                .and_then(|selector| doc.query_selector(selector).ok().flatten())
                .and_then(|e| e.dyn_into::<HtmlElement>().ok())
                .map(|e| f64::from(e.offset_top()));
            update(&app, |c| {
                c.on_anchor_click(&href, target_top);
            });
        })?;
    }
    Ok(())
}

fn wire_scroll(app: &Rc<App>, window: &Window) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    let scroll_window = window.clone();
    listen(window, "scroll", move |_| {
        let y = scroll_window.scroll_y().unwrap_or(0.0);
        update(&app, |c| c.on_scroll(y));
    })
}

fn wire_reveal(app: &Rc<App>, threshold: f64, root_margin: &str) -> Result<(), JsValue> {
    let observer_app = Rc::clone(app);
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if let Some(id) = entry.target().get_attribute(REVEAL_ID_ATTR) {
                    let intersecting = entry.is_intersecting();
                    update(&observer_app, |c| {
                        c.on_intersection(&ElementId::new(id), intersecting)
                    });
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    options.set_root_margin(root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    let controller = app.controller.borrow();
    for element in controller.surface().reveal_elements() {
        observer.observe(element);
    }
    Ok(())
}

/// Floating labels and live phone formatting.
fn enhance_form_fields(document: &Document) -> Result<(), JsValue> {
    let inputs = document.query_selector_all("input, textarea, select")?;
    for i in 0..inputs.length() {
        let Some(input) = inputs.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };

        let focused = input.clone();
        listen(&input, "focus", move |_| {
            if let Some(parent) = focused.parent_element() {
                let _ = parent.class_list().add_1("focused");
            }
        })?;

        let blurred = input.clone();
        listen(&input, "blur", move |_| {
            let value = field_value(&blurred);
            if !keeps_focus_class(&value) {
                if let Some(parent) = blurred.parent_element() {
                    let _ = parent.class_list().remove_1("focused");
                }
            }
        })?;

        if let Some(tel) = input.dyn_ref::<HtmlInputElement>().filter(|i| i.type_() == "tel") {
            let tel = tel.clone();
            let target = tel.clone();
            listen(&target, "input", move |_| {
                tel.set_value(&format_phone_input(&tel.value()));
            })?;
        }
    }
    Ok(())
}

fn field_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        area.value()
    } else if let Some(select) = element.dyn_ref::<web_sys::HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

fn add_notification_styles(document: &Document) -> Result<(), JsValue> {
    let style = document.create_element("style")?;
    style.set_text_content(Some(NOTIFICATION_STYLES));
    if let Some(head) = document.head() {
        head.append_child(&style)?;
    }
    Ok(())
}

/// Uncaught errors and page load time go to the log.
fn wire_diagnostics(window: &Window) -> Result<(), JsValue> {
    listen(window, "error", |event| {
        let message = event
            .dyn_ref::<ErrorEvent>()
            .map(|e| e.message())
            .unwrap_or_default();
        error!("JavaScript error: {}", message);
    })?;

    let load_window = window.clone();
    listen(window, "load", move |_| {
        if let Some(performance) = load_window.performance() {
            info!("Page loaded in {:.0}ms", performance.now());
        }
    })
}
