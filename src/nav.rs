/// Visual state of one hamburger bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarStyle {
    pub transform: &'static str,
    pub opacity: f32,
}

const BAR_RESET: BarStyle = BarStyle {
    transform: "none",
    opacity: 1.0,
};

/// The three bars morphed into an X.
const BARS_OPEN: [BarStyle; 3] = [
    BarStyle {
        transform: "rotate(-45deg) translate(-5px, 6px)",
        opacity: 1.0,
    },
    BarStyle {
        transform: "none",
        opacity: 0.0,
    },
    BarStyle {
        transform: "rotate(45deg) translate(-5px, -6px)",
        opacity: 1.0,
    },
];

const BARS_CLOSED: [BarStyle; 3] = [BAR_RESET; 3];

/// Open/closed state of the mobile navigation menu. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Force the menu closed.
    ///
    /// Returns `true` only if the menu was open, so callers can skip
    /// re-rendering a menu that is already closed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    pub fn bars(&self) -> [BarStyle; 3] {
        if self.open {
            BARS_OPEN
        } else {
            BARS_CLOSED
        }
    }
}

/// A resize to at least desktop width closes the mobile menu.
pub fn is_desktop_width(width: f64, breakpoint: f64) -> bool {
    width > breakpoint
}
