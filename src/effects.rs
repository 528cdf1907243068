//! Scroll-driven visual effects: header hide/show, reveal-on-scroll cards and
//! smooth in-page navigation.

use crate::i18n::ElementId;
use std::collections::BTreeSet;

/// How the header should look after a scroll event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderStyle {
    /// Translucent, blurred background once the page is scrolled
    pub solid: bool,
    /// Slid out of view while scrolling down
    pub hidden: bool,
}

/// Tracks the previous scroll offset to decide header visibility.
#[derive(Debug, Clone)]
pub struct HeaderScroll {
    last_y: f64,
    threshold: f64,
}

impl HeaderScroll {
    pub fn new(initial_y: f64, threshold: f64) -> Self {
        Self {
            last_y: initial_y,
            threshold,
        }
    }

    pub fn on_scroll(&mut self, y: f64) -> HeaderStyle {
        let past_threshold = y > self.threshold;
        let style = HeaderStyle {
            solid: past_threshold,
            hidden: past_threshold && y > self.last_y,
        };
        self.last_y = y;
        style
    }
}

/// Cards that fade in the first time they scroll into view.
///
/// Revealing is one-way: an element that leaves the viewport stays visible.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    hidden: BTreeSet<ElementId>,
    revealed: BTreeSet<ElementId>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching an element. It begins hidden.
    pub fn observe(&mut self, id: ElementId) {
        if !self.revealed.contains(&id) {
            self.hidden.insert(id);
        }
    }

    /// Handle an intersection report. Returns `true` if the element should be
    /// revealed now.
    pub fn on_intersect(&mut self, id: &ElementId, intersecting: bool) -> bool {
        if intersecting && self.hidden.remove(id) {
            self.revealed.insert(id.clone());
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    fn is_revealed(&self, id: &ElementId) -> bool {
        self.revealed.contains(id)
    }

    #[cfg(test)]
    fn pending(&self) -> usize {
        self.hidden.len()
    }
}

/// The fragment selector of an in-page link, or `None` for an empty or bare
/// `#` link.
pub fn anchor_target(href: &str) -> Option<&str> {
    match href {
        "" | "#" => None,
        h if h.starts_with('#') => Some(h),
        _ => None,
    }
}

/// Scroll position that puts `element_top` just below the fixed header.
pub fn scroll_target(element_top: f64, header_offset: f64) -> f64 {
    element_top - header_offset
}
