//! Client-side controller for the Pro Tana Golf Studio website.
//!
//! The crate is split into a headless core and a browser binding:
//!
//! - `controller`: `SiteController`, the single owner of page state
//! - `i18n` / `locale`: Thai/English content and the persisted language choice
//! - `notification`: single-slot toast notifications
//! - `nav`: mobile menu state
//! - `form`: contact form validation and submission
//! - `effects`: header, reveal-on-scroll and anchor scrolling
//! - `surface`: the page contract, plus a headless recorder
//! - `web` (feature `web`, wasm32 only): the DOM binding and entry point

pub mod config;
pub mod controller;
pub mod effects;
pub mod form;
pub mod i18n;
pub mod locale;
pub mod logging;
pub mod nav;
pub mod notification;
pub mod preferences;
pub mod redirect;
pub mod surface;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

pub use config::SiteConfig;
pub use controller::SiteController;
pub use notification::Severity;
pub use surface::{HeadlessSurface, Surface};
