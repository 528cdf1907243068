//! Contact form: validation, submission and the submit lifecycle.

mod client;
mod validate;

pub use client::{resolve_endpoint, FormClient};
pub use validate::{
    format_phone_input, is_valid_email, is_valid_phone, keeps_focus_class, validate,
    ContactFields, ContactSubmission, FormError,
};

/// Where the contact form is in its submit lifecycle.
///
/// `Idle → Validating → Submitting → {Succeeded, Failed} → Idle`. A failed
/// validation goes straight from `Validating` to `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed(FormError),
}

impl SubmitPhase {
    /// The submit control is disabled while a request is in flight.
    pub fn accepts_submit(&self) -> bool {
        !matches!(self, SubmitPhase::Validating | SubmitPhase::Submitting)
    }
}
