//! Toast notifications with a single visible slot.
//!
//! At most one notification exists at a time. Showing a new one evicts the
//! current one immediately. A visible notification leaves either when its
//! timeout elapses or when the user closes it; both paths go through the same
//! leaving phase, so a notification is removed exactly once.
//!
//! The slot never owns a timer. It exposes the one pending deadline through
//! [`NotificationSlot::next_deadline`] and the host arms a single timer for
//! it, replacing whatever timer was armed before.

use std::time::Duration;

/// Milliseconds on the host clock (browser high-resolution time).
pub type Millis = f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Font Awesome icon name (without the `fa-` prefix)
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Info => "info-circle",
            Severity::Success => "check-circle",
            Severity::Warning => "exclamation-triangle",
            Severity::Error => "exclamation-circle",
        }
    }

    /// Background color
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Info => "#3498DB",
            Severity::Success => "#2ECC71",
            Severity::Warning => "#F39C12",
            Severity::Error => "#E74C3C",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Raw value, for tagging rendered elements.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Read back an id written with [`Self::as_u64`] onto a rendered
    /// element. An id that no longer matches the current notification is
    /// ignored by the slot.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().map(Self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Visible { expires_at: Millis },
    Leaving { remove_at: Millis },
}

/// Page update the host must perform after the slot advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotEffect {
    /// Start the exit animation
    AnimateOut(NotificationId),
    /// Take the notification off the page
    Remove(NotificationId),
}

#[derive(Debug)]
pub struct NotificationSlot {
    current: Option<(Notification, Phase)>,
    next_id: u64,
    timeout: Duration,
    exit: Duration,
}

impl NotificationSlot {
    /// * `timeout` - how long a notification stays before leaving on its own
    /// * `exit` - length of the exit animation before removal
    pub fn new(timeout: Duration, exit: Duration) -> Self {
        Self {
            current: None,
            next_id: 0,
            timeout,
            exit,
        }
    }

    /// Show a notification, evicting the current one.
    ///
    /// # Returns
    /// The new notification and the id of the evicted one, if any. The
    /// evicted notification must be removed from the page right away.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: Millis,
    ) -> (Notification, Option<NotificationId>) {
        let evicted = self.current.take().map(|(n, _)| n.id);

        self.next_id += 1;
        let notification = Notification {
            id: NotificationId(self.next_id),
            message: message.into(),
            severity,
        };
        let phase = Phase::Visible {
            expires_at: now + as_millis(self.timeout),
        };
        self.current = Some((notification.clone(), phase));

        (notification, evicted)
    }

    /// Close a notification early (the close button).
    ///
    /// Returns `true` if the notification started leaving. Closing a stale id
    /// or a notification that is already leaving does nothing.
    pub fn dismiss(&mut self, id: NotificationId, now: Millis) -> bool {
        match &mut self.current {
            Some((notification, phase @ Phase::Visible { .. })) if notification.id == id => {
                *phase = Phase::Leaving {
                    remove_at: now + as_millis(self.exit),
                };
                true
            }
            _ => false,
        }
    }

    /// Apply every transition that is due at `now`.
    pub fn advance(&mut self, now: Millis) -> Vec<SlotEffect> {
        let mut effects = Vec::new();

        if let Some((notification, phase)) = &mut self.current {
            if let Phase::Visible { expires_at } = *phase {
                if now >= expires_at {
                    *phase = Phase::Leaving {
                        remove_at: expires_at + as_millis(self.exit),
                    };
                    effects.push(SlotEffect::AnimateOut(notification.id));
                }
            }
            if let Phase::Leaving { remove_at } = *phase {
                if now >= remove_at {
                    effects.push(SlotEffect::Remove(notification.id));
                    self.current = None;
                }
            }
        }

        effects
    }

    /// The single pending deadline, if anything is scheduled.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.current.as_ref().map(|(_, phase)| match *phase {
            Phase::Visible { expires_at } => expires_at,
            Phase::Leaving { remove_at } => remove_at,
        })
    }

    #[cfg(test)]
    fn current(&self) -> Option<&Notification> {
        self.current.as_ref().map(|(n, _)| n)
    }

    #[cfg(test)]
    fn is_leaving(&self) -> bool {
        matches!(self.current, Some((_, Phase::Leaving { .. })))
    }
}

/// The host's timer handle for the slot's single deadline.
///
/// Replacing the armed handle drops (and so cancels) the old one. A handle
/// that has fired is parked until the next one fires, so it is never dropped
/// from inside its own callback.
#[derive(Debug)]
pub struct TimerHandle<T> {
    armed: Option<T>,
    armed_for: Option<Millis>,
    spent: Option<T>,
}

impl<T> Default for TimerHandle<T> {
    fn default() -> Self {
        Self {
            armed: None,
            armed_for: None,
            spent: None,
        }
    }
}

impl<T> TimerHandle<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the armed timer no longer matches `deadline`.
    pub fn needs_arming(&self, deadline: Option<Millis>) -> bool {
        self.armed_for != deadline
    }

    /// Arm `handle` for `deadline`, cancelling whatever was armed.
    pub fn arm(&mut self, deadline: Option<Millis>, handle: Option<T>) {
        self.armed_for = deadline;
        self.armed = handle;
    }

    /// The armed timer fired. Call this from its callback.
    pub fn fired(&mut self) {
        self.armed_for = None;
        self.spent = self.armed.take();
    }
}

fn as_millis(duration: Duration) -> Millis {
    duration.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn slot() -> NotificationSlot {
        NotificationSlot::new(Duration::from_millis(5000), Duration::from_millis(300))
    }

    // ==================== Severity Tests ====================

    #[test]
    fn test_severity_icons() {
        assert_eq!(Severity::Info.icon(), "info-circle");
        assert_eq!(Severity::Success.icon(), "check-circle");
        assert_eq!(Severity::Warning.icon(), "exclamation-triangle");
        assert_eq!(Severity::Error.icon(), "exclamation-circle");
    }

    #[test]
    fn test_severity_colors() {
        assert_eq!(Severity::Info.color(), "#3498DB");
        assert_eq!(Severity::Success.color(), "#2ECC71");
        assert_eq!(Severity::Warning.color(), "#F39C12");
        assert_eq!(Severity::Error.color(), "#E74C3C");
    }

    // ==================== NotificationId Tests ====================

    #[test]
    fn test_id_parse_round_trip() {
        let mut slot = slot();
        let (n, _) = slot.show("hello", Severity::Info, 0.0);

        let raw = n.id.as_u64().to_string();
        assert_eq!(NotificationId::parse(&raw), Some(n.id));
    }

    #[test]
    fn test_id_parse_rejects_garbage() {
        assert_eq!(NotificationId::parse(""), None);
        assert_eq!(NotificationId::parse("abc"), None);
        assert_eq!(NotificationId::parse("-1"), None);
    }

    // ==================== Single Slot Tests ====================

    #[test]
    fn test_show_sets_deadline() {
        let mut slot = slot();
        let (notification, evicted) = slot.show("hello", Severity::Info, 1000.0);

        assert!(evicted.is_none());
        assert_eq!(slot.current(), Some(&notification));
        assert_eq!(slot.next_deadline(), Some(6000.0));
    }

    #[test]
    fn test_second_show_evicts_first() {
        let mut slot = slot();
        let (first, _) = slot.show("first", Severity::Info, 0.0);
        let (second, evicted) = slot.show("second", Severity::Error, 100.0);

        assert_eq!(evicted, Some(first.id));
        assert_ne!(first.id, second.id);
        assert_eq!(slot.current().map(|n| n.id), Some(second.id));
        // Deadline belongs to the new notification only
        assert_eq!(slot.next_deadline(), Some(5100.0));
    }

    #[test]
    fn test_show_while_leaving_evicts() {
        let mut slot = slot();
        let (first, _) = slot.show("first", Severity::Info, 0.0);
        assert!(slot.dismiss(first.id, 10.0));

        let (_, evicted) = slot.show("second", Severity::Info, 20.0);

        assert_eq!(evicted, Some(first.id));
        assert!(!slot.is_leaving());
    }

    // ==================== Expiry Tests ====================

    #[test]
    fn test_nothing_due_before_timeout() {
        let mut slot = slot();
        slot.show("hello", Severity::Info, 0.0);

        assert!(slot.advance(4999.0).is_empty());
        assert!(slot.current().is_some());
    }

    #[test]
    fn test_timeout_animates_then_removes() {
        let mut slot = slot();
        let (n, _) = slot.show("hello", Severity::Success, 0.0);

        assert_eq!(slot.advance(5000.0), vec![SlotEffect::AnimateOut(n.id)]);
        assert!(slot.is_leaving());
        assert_eq!(slot.next_deadline(), Some(5300.0));

        assert_eq!(slot.advance(5300.0), vec![SlotEffect::Remove(n.id)]);
        assert!(slot.current().is_none());
        assert_eq!(slot.next_deadline(), None);
    }

    #[test]
    fn test_late_timer_catches_up_in_one_advance() {
        let mut slot = slot();
        let (n, _) = slot.show("hello", Severity::Info, 0.0);

        assert_eq!(
            slot.advance(10_000.0),
            vec![SlotEffect::AnimateOut(n.id), SlotEffect::Remove(n.id)]
        );
    }

    // ==================== Dismiss Tests ====================

    #[test]
    fn test_dismiss_then_remove_once() {
        let mut slot = slot();
        let (n, _) = slot.show("hello", Severity::Warning, 0.0);

        assert!(slot.dismiss(n.id, 1000.0));
        assert_eq!(slot.next_deadline(), Some(1300.0));

        // The original timeout no longer applies
        assert_eq!(slot.advance(1300.0), vec![SlotEffect::Remove(n.id)]);
        assert!(slot.advance(5000.0).is_empty());
    }

    #[test]
    fn test_double_dismiss_is_noop() {
        let mut slot = slot();
        let (n, _) = slot.show("hello", Severity::Info, 0.0);

        assert!(slot.dismiss(n.id, 100.0));
        assert!(!slot.dismiss(n.id, 150.0));
        assert_eq!(slot.next_deadline(), Some(400.0));
    }

    #[test]
    fn test_dismiss_after_expiry_is_noop() {
        let mut slot = slot();
        let (n, _) = slot.show("hello", Severity::Info, 0.0);

        slot.advance(5000.0);
        assert!(!slot.dismiss(n.id, 5100.0));
    }

    #[test]
    fn test_dismiss_stale_id_is_noop() {
        let mut slot = slot();
        let (first, _) = slot.show("first", Severity::Info, 0.0);
        slot.show("second", Severity::Info, 10.0);

        assert!(!slot.dismiss(first.id, 20.0));
        assert!(!slot.is_leaving());
    }

    #[test]
    fn test_advance_on_empty_slot() {
        let mut slot = slot();
        assert!(slot.advance(1_000_000.0).is_empty());
    }

    // ==================== Timer Handle Tests ====================

    #[test]
    fn test_timer_arms_only_on_new_deadline() {
        let mut timer: TimerHandle<Rc<()>> = TimerHandle::new();

        assert!(!timer.needs_arming(None));
        assert!(timer.needs_arming(Some(5000.0)));

        timer.arm(Some(5000.0), Some(Rc::new(())));
        assert!(!timer.needs_arming(Some(5000.0)));
        assert!(timer.needs_arming(Some(5300.0)));
    }

    #[test]
    fn test_rearming_drops_previous_handle() {
        let mut timer = TimerHandle::new();
        let first = Rc::new(());

        timer.arm(Some(5000.0), Some(Rc::clone(&first)));
        timer.arm(Some(6000.0), Some(Rc::new(())));

        assert_eq!(Rc::strong_count(&first), 1);
    }

    #[test]
    fn test_fired_handle_kept_until_next_fires() {
        let mut timer = TimerHandle::new();
        let first = Rc::new(());
        let second = Rc::new(());

        timer.arm(Some(5000.0), Some(Rc::clone(&first)));
        timer.fired();
        // Still running its callback
        assert_eq!(Rc::strong_count(&first), 2);
        assert!(timer.needs_arming(Some(5300.0)));

        timer.arm(Some(5300.0), Some(Rc::clone(&second)));
        assert_eq!(Rc::strong_count(&first), 2);

        timer.fired();
        assert_eq!(Rc::strong_count(&first), 1);
        assert_eq!(Rc::strong_count(&second), 2);
    }
}
