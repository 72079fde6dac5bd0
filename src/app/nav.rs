//! Navigation bar chrome state.
//!
//! The mobile menu and the mobile search overlay are mutually exclusive, so
//! they are modeled as a single [`Overlay`] value instead of two flags. The
//! lifestyle dropdown is independent of both.

/// Full-screen overlay currently shown on small screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    /// Mobile navigation menu.
    Menu,
    /// Mobile search overlay.
    Search,
}

/// Open/closed state of the navigation bar widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavState {
    pub overlay: Overlay,
    pub lifestyle_open: bool,
}

impl NavState {
    /// Opens or closes the mobile menu. Opening it hides the mobile search.
    pub fn toggle_menu(&mut self) {
        self.overlay = if self.overlay == Overlay::Menu {
            Overlay::None
        } else {
            Overlay::Menu
        };
    }

    /// Opens or closes the mobile search. Opening it hides the mobile menu.
    pub fn toggle_mobile_search(&mut self) {
        self.overlay = if self.overlay == Overlay::Search {
            Overlay::None
        } else {
            Overlay::Search
        };
    }

    pub fn toggle_lifestyle(&mut self) {
        self.lifestyle_open = !self.lifestyle_open;
    }

    /// Closes every overlay; called after any navigation.
    pub fn close_all(&mut self) {
        self.overlay = Overlay::None;
        self.lifestyle_open = false;
    }
}
