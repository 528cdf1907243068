use crate::config::SiteConfig;
use crate::effects::{anchor_target, scroll_target, HeaderScroll, RevealTracker};
use crate::form::{validate, ContactSubmission, FormClient, FormError, SubmitPhase};
use crate::i18n::{ContentTable, ElementId, Language};
use crate::locale::LocaleSwitch;
use crate::nav::{is_desktop_width, MobileMenu};
use crate::notification::{Millis, NotificationId, NotificationSlot, Severity, SlotEffect};
use crate::preferences::PreferenceStore;
use crate::redirect::take_success_flag;
use crate::surface::Surface;
use tracing::{debug, info, warn};

/// Owns every piece of page state and reacts to page events.
///
/// The controller is built once at startup. Each event handler updates the
/// relevant component and renders the result onto the surface.
pub struct SiteController<S: Surface, P: PreferenceStore> {
    config: SiteConfig,
    surface: S,
    content: ContentTable,
    locale: LocaleSwitch<P>,
    notifications: NotificationSlot,
    menu: MobileMenu,
    header: HeaderScroll,
    reveal: RevealTracker,
    submit_phase: SubmitPhase,
    submit_label: Option<String>,
    last_outcome: Option<Result<(), FormError>>,
}

impl<S: Surface, P: PreferenceStore> SiteController<S, P> {
    pub fn new(config: SiteConfig, surface: S, store: P, content: ContentTable) -> Self {
        let locale = LocaleSwitch::load(store, config.language_storage_key.clone());
        let notifications =
            NotificationSlot::new(config.notification_timeout, config.notification_exit);
        let header = HeaderScroll::new(0.0, config.scroll_threshold_px);

        Self {
            config,
            surface,
            content,
            locale,
            notifications,
            menu: MobileMenu::new(),
            header,
            reveal: RevealTracker::new(),
            submit_phase: SubmitPhase::Idle,
            submit_label: None,
            last_outcome: None,
        }
    }

    /// Page load: render the stored language and report a redirect-based
    /// submission if the address carries the success flag.
    pub fn start(&mut self, address: &str, scroll_y: f64) {
        self.header = HeaderScroll::new(scroll_y, self.config.scroll_threshold_px);
        self.apply_language(self.locale.active());

        if let Some(clean) = take_success_flag(address) {
            info!("Page loaded after a successful form redirect");
            let message = self.locale.active().strings().redirect_success;
            self.notify(message, Severity::Success);
            self.surface.replace_address(&clean);
        }

        info!(
            "Site controller started ({} translatable elements, language {})",
            self.content.len(),
            self.locale.active()
        );
    }

    // ==================== Language ====================

    pub fn language(&self) -> Language {
        self.locale.active()
    }

    /// Render every translatable element in `language`.
    ///
    /// The toggle always names the language you would switch to.
    pub fn apply_language(&mut self, language: Language) {
        let mut updated = 0;
        for (id, text) in self.content.render(language) {
            self.surface.set_text(id, text);
            updated += 1;
        }
        self.surface.set_language_indicator(language.other().short_label());
        self.surface.set_document_language(language);

        debug!("Updated {} elements to {}", updated, language);
    }

    pub fn toggle_language(&mut self) -> Language {
        let language = self.locale.toggle();
        self.apply_language(language);
        self.notify(language.strings().language_switched, Severity::Info);

        info!("Language switched to {}", language);
        language
    }

    // ==================== Notifications ====================

    /// Show a notification, replacing the visible one.
    pub fn notify(&mut self, message: &str, severity: Severity) -> NotificationId {
        let now = self.surface.now();
        let (notification, evicted) = self.notifications.show(message, severity, now);

        if let Some(old) = evicted {
            self.surface.remove_notification(old);
        }
        self.surface.show_notification(&notification);

        notification.id
    }

    /// The close button on a notification.
    pub fn dismiss_notification(&mut self, id: NotificationId) {
        let now = self.surface.now();
        if self.notifications.dismiss(id, now) {
            self.surface.animate_out_notification(id);
        }
    }

    /// Called when the host timer for [`Self::next_timer_deadline`] fires.
    pub fn on_timer(&mut self) {
        let now = self.surface.now();
        for effect in self.notifications.advance(now) {
            match effect {
                SlotEffect::AnimateOut(id) => self.surface.animate_out_notification(id),
                SlotEffect::Remove(id) => self.surface.remove_notification(id),
            }
        }
    }

    /// The one deadline the host should arm a timer for.
    pub fn next_timer_deadline(&self) -> Option<Millis> {
        self.notifications.next_deadline()
    }

    // ==================== Navigation ====================

    pub fn menu_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn toggle_menu(&mut self) -> bool {
        let open = self.menu.toggle();
        self.surface.render_menu(open, &self.menu.bars());
        open
    }

    /// Safe to call unconditionally; a closed menu is left untouched.
    pub fn close_menu(&mut self) {
        if self.menu.close() {
            self.surface.render_menu(false, &self.menu.bars());
        }
    }

    pub fn on_nav_link_click(&mut self) {
        self.close_menu();
    }

    /// Any click on the document. Clicks on the toggle or inside the menu are
    /// handled by the menu itself.
    pub fn on_document_click(&mut self, inside_toggle: bool, inside_menu: bool) {
        if !inside_toggle && !inside_menu {
            self.close_menu();
        }
    }

    pub fn on_resize(&mut self, width: f64) {
        if is_desktop_width(width, self.config.desktop_breakpoint_px) {
            self.close_menu();
        }
    }

    // ==================== Scroll Effects ====================

    pub fn on_scroll(&mut self, y: f64) {
        let style = self.header.on_scroll(y);
        self.surface.render_header(style);
    }

    pub fn observe_reveal(&mut self, id: ElementId) {
        self.reveal.observe(id);
    }

    pub fn on_intersection(&mut self, id: &ElementId, intersecting: bool) {
        if self.reveal.on_intersect(id, intersecting) {
            self.surface.reveal(id);
        }
    }

    /// An in-page link was clicked. `target_top` is the document offset of
    /// the element the link points at, if it exists.
    ///
    /// Returns `true` if the page scrolled.
    pub fn on_anchor_click(&mut self, href: &str, target_top: Option<f64>) -> bool {
        if anchor_target(href).is_none() {
            return false;
        }

        match target_top {
            Some(top) => {
                let position = scroll_target(top, self.config.header_offset_px);
                self.surface.scroll_to(position);
                self.close_menu();
                true
            }
            None => {
                debug!("Anchor target {} not found", href);
                false
            }
        }
    }

    // ==================== Contact Form ====================

    pub fn submit_phase(&self) -> &SubmitPhase {
        &self.submit_phase
    }

    /// Outcome of the most recent completed submit attempt.
    pub fn last_outcome(&self) -> Option<&Result<(), FormError>> {
        self.last_outcome.as_ref()
    }

    /// Validate the form and, if valid, put the submit control into its busy
    /// state.
    ///
    /// # Returns
    /// * `None` if a submission is already in flight (the control is disabled)
    /// * `Some(Err(_))` if validation failed; the visitor has been notified and
    ///   no request must be made
    /// * `Some(Ok(submission))` to be sent, followed by [`Self::finish_submit`]
    pub fn begin_submit(&mut self) -> Option<Result<ContactSubmission, FormError>> {
        if !self.submit_phase.accepts_submit() {
            debug!("Submit ignored, a submission is already in flight");
            return None;
        }

        self.transition(SubmitPhase::Validating);
        let fields = self.surface.read_form();

        match validate(&fields) {
            Ok(submission) => {
                let original = self.surface.submit_label();
                self.submit_label = Some(original);
                let busy = self.language().strings().submit_busy;
                self.surface.set_submit_control(busy, true);

                self.transition(SubmitPhase::Submitting);
                Some(Ok(submission))
            }
            Err(e) => {
                self.fail(e.clone());
                Some(Err(e))
            }
        }
    }

    /// Report the result of the request started by [`Self::begin_submit`].
    pub fn finish_submit(&mut self, result: Result<(), FormError>) {
        if self.submit_phase != SubmitPhase::Submitting {
            warn!("Submit result arrived with no submission in flight");
            return;
        }

        match result {
            Ok(()) => {
                let message = self.language().strings().submit_success;
                self.notify(message, Severity::Success);
                self.surface.clear_form();
                self.transition(SubmitPhase::Succeeded);
                self.last_outcome = Some(Ok(()));
                self.transition(SubmitPhase::Idle);
            }
            Err(e) => self.fail(e),
        }

        // Runs whatever the outcome
        let label = self
            .submit_label
            .take()
            .unwrap_or_else(|| self.surface.submit_label());
        self.surface.set_submit_control(&label, false);
    }

    /// Validate, send once, and report.
    ///
    /// Returns `None` if a submission was already in flight.
    pub async fn submit_contact(&mut self, client: &FormClient) -> Option<Result<(), FormError>> {
        let submission = match self.begin_submit()? {
            Ok(submission) => submission,
            Err(e) => return Some(Err(e)),
        };

        let result = client.send(&submission).await;
        self.finish_submit(result.clone());
        Some(result)
    }

    fn fail(&mut self, error: FormError) {
        warn!("Contact form rejected: {}", error.reason());
        let message = error.message(self.language().strings());
        self.notify(message, Severity::Error);

        self.transition(SubmitPhase::Failed(error.clone()));
        self.last_outcome = Some(Err(error));
        self.transition(SubmitPhase::Idle);
    }

    fn transition(&mut self, next: SubmitPhase) {
        debug!("Submit phase {:?} -> {:?}", self.submit_phase, next);
        self.submit_phase = next;
    }

    // ==================== Accessors ====================

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn store(&self) -> &P {
        self.locale.store()
    }
}
