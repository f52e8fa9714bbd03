//! Common types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A selectable entry of the grab deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub screen: String, // navigation target, parsed into Screen by the navigator
    pub visible: bool,
}

impl MenuItem {
    pub fn new(id: &str, title: &str, icon: &str, screen: Screen) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            icon: icon.to_string(),
            screen: screen.as_str().to_string(),
            visible: true,
        }
    }
}

/// Items shown in the grab deck, in array order
pub fn visible_items(items: &[MenuItem]) -> Vec<MenuItem> {
    items.iter().filter(|item| item.visible).cloned().collect()
}

/// Measured size of the interactive surface, 0x0 until the first measurement
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerDimensions {
    pub width: f32,
    pub height: f32,
}

impl ContainerDimensions {
    /// A container with a zero or non-finite side has no layout yet
    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Absolute screen position of the container's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerOrigin {
    pub x: f32,
    pub y: f32,
}

/// Absolute screen coordinates of the current pointer position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub page_x: f32,
    pub page_y: f32,
}

impl PointerSample {
    pub fn new(page_x: f32, page_y: f32) -> Self {
        Self { page_x, page_y }
    }
}

/// A point in container-relative coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Host layout report for the container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub page_x: f32,
    pub page_y: f32,
}

/// Placement of a single card inside the container
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub rotate_deg: f32,
    pub index: usize,
    pub total_cards: usize,
}

/// Navigation targets of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Statistics,
    Profile,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Statistics => "Statistics",
            Screen::Profile => "Profile",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "SleepWell",
            Screen::Statistics => "Sleep Statistics",
            Screen::Profile => "Profile",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown screen: {0}")]
pub struct UnknownScreen(pub String);

impl FromStr for Screen {
    type Err = UnknownScreen;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "home" => Ok(Screen::Home),
            "statistics" => Ok(Screen::Statistics),
            "profile" => Ok(Screen::Profile),
            _ => Err(UnknownScreen(s.to_string())),
        }
    }
}

/// Notification permission as reported to the profile screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPermission {
    Granted,
    Denied,
}

impl NotificationPermission {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            Self::Granted
        } else {
            Self::Denied
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_parse() {
        assert_eq!("Statistics".parse::<Screen>().unwrap(), Screen::Statistics);
        assert_eq!("profile".parse::<Screen>().unwrap(), Screen::Profile);
        assert!("Alarm".parse::<Screen>().is_err());
    }

    #[test]
    fn test_visible_items_keeps_order() {
        let mut items = vec![
            MenuItem::new("a", "A", "moon", Screen::Home),
            MenuItem::new("b", "B", "moon", Screen::Home),
            MenuItem::new("c", "C", "moon", Screen::Home),
        ];
        items[1].visible = false;
        let ids: Vec<String> = visible_items(&items).into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_unmeasured_container() {
        assert!(!ContainerDimensions::default().is_measured());
        assert!(!ContainerDimensions { width: 390.0, height: 0.0 }.is_measured());
        assert!(ContainerDimensions { width: 390.0, height: 844.0 }.is_measured());
    }
}
