use std::time::Duration;

/// Endpoint baked in at build time. The contact form's `action` attribute
/// takes precedence in the browser.
const BUILD_FORM_ENDPOINT: Option<&str> = option_env!("FORM_ENDPOINT");

#[derive(Debug, Clone)]
pub struct SiteConfig {
    // Contact form
    pub form_endpoint: Option<String>,

    // Persistence
    pub language_storage_key: String,

    // Layout
    pub header_offset_px: f64,
    pub scroll_threshold_px: f64,
    pub desktop_breakpoint_px: f64,

    // Notifications
    pub notification_timeout: Duration,
    pub notification_exit: Duration,

    // Reveal-on-scroll
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            form_endpoint: BUILD_FORM_ENDPOINT
                .filter(|e| !e.trim().is_empty())
                .map(str::to_string),
            language_storage_key: "language".to_string(),
            header_offset_px: 80.0,
            scroll_threshold_px: 100.0,
            desktop_breakpoint_px: 768.0,
            notification_timeout: Duration::from_millis(5000),
            notification_exit: Duration::from_millis(300),
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}
