//! App module - application state shared by all screens

mod grab_view;
mod navigation;
mod screens;

use navigation::Navigation;

use crate::grab::{GrabDeck, HoverPolicy, Navigator};
use crate::settings::Settings;
use crate::theme::{self, ThemeName};
use crate::types::{MenuItem, Screen};
use eframe::egui;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, info};

/// Screen size the deck policy starts from before the first frame reports one
const INITIAL_SCREEN: egui::Vec2 = egui::vec2(390.0, 844.0);

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) navigation: Rc<Navigation>,
    // Home deck
    pub(crate) menu_items: Vec<MenuItem>,
    pub(crate) deck: GrabDeck,
    pub(crate) deck_mounted: bool,
    // Window geometry, saved on exit
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
}

/// Cards offered on the home screen, in fan order
pub fn default_menu_items() -> Vec<MenuItem> {
    vec![
        MenuItem::new("statistics", "Statistics", "stats-chart", Screen::Statistics),
        MenuItem::new("profile", "Profile", "person", Screen::Profile),
        MenuItem::new("trends", "Sleep Trends", "moon", Screen::Statistics),
        MenuItem::new("settings", "Settings", "settings", Screen::Profile),
        MenuItem::new("about", "About", "information-circle", Screen::Profile),
    ]
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        // Phosphor glyphs for card icons and the top bar
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::install(&cc.egui_ctx, settings.theme);

        let mut menu_items = default_menu_items();
        for item in menu_items.iter_mut() {
            item.visible = !settings.is_card_hidden(&item.id);
        }

        let navigation = Rc::new(Navigation::new());
        let navigator: Rc<dyn Navigator> = navigation.clone();
        let policy = HoverPolicy::for_screen(
            INITIAL_SCREEN.x,
            INITIAL_SCREEN.y,
            settings.selection_threshold_ratio,
            settings.hover_stickiness,
        );

        info!(
            cards = menu_items.len(),
            hidden = settings.hidden_cards.len(),
            theme = ?settings.theme,
            "App initialized"
        );

        Self {
            deck: GrabDeck::new(navigator, policy),
            deck_mounted: false,
            menu_items,
            navigation,
            settings,
            data_dir,
            window_pos: None,
            window_size: None,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            ..self.settings.clone()
        };
        settings.save(&self.data_dir);
    }

    pub(crate) fn set_theme(&mut self, ctx: &egui::Context, name: ThemeName) {
        theme::install(ctx, name);
        self.settings.theme = name;
        debug!(theme = ?name, "Theme changed");
        self.save_settings();
    }

    /// Route the central panel to the current screen. Leaving home tears the
    /// deck down so cards come back fresh.
    pub(crate) fn render_screen(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let screen = self.navigation.current();
        if screen != Screen::Home && self.deck_mounted {
            self.deck.unmount();
            self.deck_mounted = false;
        }
        match screen {
            Screen::Home => {
                self.deck_mounted = true;
                self.render_home(ui, ctx);
            }
            Screen::Statistics => self.render_statistics(ui, ctx),
            Screen::Profile => self.render_profile(ui, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::visible_items;

    #[test]
    fn test_default_menu_items() {
        let items = default_menu_items();
        assert_eq!(items.len(), 5);
        assert!(items.iter().all(|i| i.visible));
        assert_eq!(items[0].screen, "Statistics");
        assert_eq!(items[1].screen, "Profile");

        let mut ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_hidden_cards_filtered() {
        let mut settings = Settings::default();
        settings.set_card_hidden("profile", true);
        let mut items = default_menu_items();
        for item in items.iter_mut() {
            item.visible = !settings.is_card_hidden(&item.id);
        }
        let visible = visible_items(&items);
        assert_eq!(visible.len(), 4);
        assert!(visible.iter().all(|i| i.id != "profile"));
    }
}
