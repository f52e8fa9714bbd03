//! Screen stack navigation

use crate::grab::Navigator;
use crate::types::Screen;
use std::cell::RefCell;
use tracing::{info, warn};

/// Back stack of screens. `Home` is always at the bottom.
pub struct Navigation {
    stack: RefCell<Vec<Screen>>,
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigation {
    pub fn new() -> Self {
        Self {
            stack: RefCell::new(vec![Screen::Home]),
        }
    }

    pub fn current(&self) -> Screen {
        self.stack.borrow().last().copied().unwrap_or(Screen::Home)
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.borrow().len() > 1
    }

    /// Pop the current screen. Returns false at the root.
    pub fn back(&self) -> bool {
        let mut stack = self.stack.borrow_mut();
        if stack.len() <= 1 {
            return false;
        }
        stack.pop();
        true
    }

    /// Go to `screen`; if it is already on the stack, unwind to it instead of
    /// pushing a duplicate.
    pub fn go_to(&self, screen: Screen) {
        let mut stack = self.stack.borrow_mut();
        match stack.iter().position(|s| *s == screen) {
            Some(pos) => stack.truncate(pos + 1),
            None => stack.push(screen),
        }
        info!(screen = %screen, depth = stack.len(), "Navigated");
    }
}

impl Navigator for Navigation {
    fn navigate(&self, screen: &str) {
        match screen.parse::<Screen>() {
            Ok(screen) => self.go_to(screen),
            Err(e) => warn!(error = %e, "Ignoring navigation request"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_and_back() {
        let nav = Navigation::new();
        assert_eq!(nav.current(), Screen::Home);
        assert!(!nav.back());

        nav.navigate("Statistics");
        assert_eq!(nav.current(), Screen::Statistics);
        assert!(nav.can_go_back());
        assert!(nav.back());
        assert_eq!(nav.current(), Screen::Home);
    }

    #[test]
    fn test_navigate_unwinds_to_existing() {
        let nav = Navigation::new();
        nav.navigate("Statistics");
        nav.navigate("Profile");
        nav.navigate("Home");
        assert_eq!(nav.current(), Screen::Home);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_unknown_screen_is_ignored() {
        let nav = Navigation::new();
        nav.navigate("Alarm");
        assert_eq!(nav.current(), Screen::Home);
    }
}
