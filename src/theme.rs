//! Centralized theme for SleepWell
//! Palettes, sizes and styling helpers. Screens read the active palette with
//! [`palette`] after [`install`] has put it into the egui context.

use egui::Color32;
use serde::{Deserialize, Serialize};

// =============================================================================
// PALETTES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

impl ThemeName {
    pub fn toggle(self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeName::Dark
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color32,
    pub primary: Color32,
    pub secondary: Color32,
    pub card: Color32,
    pub text: Color32,
    pub text_secondary: Color32,
    pub accent: Color32,
    pub tip_background: Color32,
    pub tip_title: Color32,
    pub tip_text: Color32,
}

pub const LIGHT: Palette = Palette {
    background: Color32::from_rgb(0xff, 0xff, 0xff),
    primary: Color32::from_rgb(0x4a, 0x90, 0xe2),
    secondary: Color32::from_rgb(0xe8, 0xf4, 0xf8),
    card: Color32::from_rgb(0xf5, 0xf5, 0xf5),
    text: Color32::from_rgb(0x00, 0x00, 0x00),
    text_secondary: Color32::from_rgb(0x7f, 0x8c, 0x8d),
    accent: Color32::from_rgb(0xf3, 0x9c, 0x12),
    tip_background: Color32::from_rgb(0xe8, 0xf4, 0xf8),
    tip_title: Color32::from_rgb(0x4a, 0x90, 0xe2),
    tip_text: Color32::from_rgb(0x2c, 0x3e, 0x50),
};

pub const DARK: Palette = Palette {
    background: Color32::from_rgb(0x1a, 0x1a, 0x1a),
    primary: Color32::from_rgb(0x5d, 0xad, 0xe2),
    secondary: Color32::from_rgb(0x2c, 0x3e, 0x50),
    card: Color32::from_rgb(0x2c, 0x2c, 0x2c),
    text: Color32::from_rgb(0xff, 0xff, 0xff),
    text_secondary: Color32::from_rgb(0xbd, 0xc3, 0xc7),
    accent: Color32::from_rgb(0xf3, 0x9c, 0x12),
    tip_background: Color32::from_rgb(0x2c, 0x3e, 0x50),
    tip_title: Color32::from_rgb(0x5d, 0xad, 0xe2),
    tip_text: Color32::from_rgb(0xbd, 0xc3, 0xc7),
};

impl Palette {
    pub fn for_theme(name: ThemeName) -> Self {
        match name {
            ThemeName::Light => LIGHT,
            ThemeName::Dark => DARK,
        }
    }
}

// =============================================================================
// COLORS - Fixed
// =============================================================================
pub const STATUS_SUCCESS: Color32 = Color32::from_rgb(0x4c, 0xaf, 0x50);
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xe5, 0x39, 0x35);
pub const CARD_SHADOW: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 26);

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_DISPLAY: f32 = 28.0;
pub const FONT_STAT: f32 = 24.0;
pub const FONT_TITLE: f32 = 18.0;
pub const FONT_HEADING: f32 = 16.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_SMALL: f32 = 12.0;
pub const FONT_CARD_ICON: f32 = 40.0;

// =============================================================================
// DIMENSIONS
// =============================================================================
pub const TOP_BAR_HEIGHT: f32 = 48.0;
pub const AVATAR_SIZE: f32 = 80.0;
pub const CHART_HEIGHT: f32 = 200.0;
pub const CONTENT_MAX_WIDTH: f32 = 560.0;

// =============================================================================
// CORNER RADIUS
// =============================================================================
pub const RADIUS_DEFAULT: f32 = 8.0;
pub const RADIUS_LARGE: f32 = 12.0;
pub const RADIUS_CARD: f32 = 16.0;

// =============================================================================
// SPACING
// =============================================================================
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 15.0;
pub const SPACING_XL: f32 = 20.0;

// =============================================================================
// CONTEXT - Active palette
// =============================================================================

fn theme_id() -> egui::Id {
    egui::Id::new("sleepwell_theme")
}

/// Make `name` the active theme for every screen drawn with `ctx`.
pub fn install(ctx: &egui::Context, name: ThemeName) {
    ctx.data_mut(|d| d.insert_temp(theme_id(), name));
    apply_visuals(ctx, &Palette::for_theme(name));
}

/// Active theme name. Panics if [`install`] was never called on `ctx`.
pub fn current(ctx: &egui::Context) -> ThemeName {
    ctx.data(|d| d.get_temp::<ThemeName>(theme_id()))
        .unwrap_or_else(|| panic!("theme::current called before theme::install"))
}

/// Active palette. Panics if [`install`] was never called on `ctx`.
pub fn palette(ctx: &egui::Context) -> Palette {
    Palette::for_theme(current(ctx))
}

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context, palette: &Palette) {
    let dark = palette.background.r() < 0x80;
    let base = if dark { egui::Visuals::dark() } else { egui::Visuals::light() };

    let mut visuals = egui::Visuals {
        dark_mode: dark,
        panel_fill: palette.background,
        window_fill: palette.card,
        extreme_bg_color: palette.background,
        faint_bg_color: palette.card,
        hyperlink_color: palette.primary,
        override_text_color: Some(palette.text),
        window_corner_radius: egui::CornerRadius::same(RADIUS_DEFAULT as u8),
        menu_corner_radius: egui::CornerRadius::same(RADIUS_DEFAULT as u8),
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        ..base
    };
    visuals.selection.bg_fill = palette.primary.gamma_multiply(0.4);
    visuals.widgets.inactive.weak_bg_fill = palette.card;
    visuals.widgets.hovered.weak_bg_fill = lighten(palette.card, 0.08);
    visuals.widgets.active.weak_bg_fill = palette.secondary;
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
    });
}

// =============================================================================
// HELPER - Frames
// =============================================================================

/// Rounded surface used for list rows and stat tiles
pub fn card_frame(palette: &Palette) -> egui::Frame {
    egui::Frame::new()
        .fill(palette.card)
        .corner_radius(RADIUS_LARGE)
        .inner_margin(egui::Margin::same(SPACING_LG as i8))
        .shadow(egui::epaint::Shadow {
            offset: [0, 2],
            blur: 4,
            spread: 0,
            color: CARD_SHADOW,
        })
}

pub fn top_bar_frame(palette: &Palette) -> egui::Frame {
    egui::Frame::new()
        .fill(palette.background)
        .inner_margin(egui::Margin::symmetric(12, 8))
}

// =============================================================================
// HELPER - Colors
// =============================================================================

/// Text color at reduced strength, as used for labels and descriptions
pub fn faded(c: Color32, alpha: f32) -> Color32 {
    c.gamma_multiply(alpha)
}

pub fn lighten(c: Color32, amount: f32) -> Color32 {
    let r = (c.r() as f32 + (255.0 - c.r() as f32) * amount) as u8;
    let g = (c.g() as f32 + (255.0 - c.g() as f32) * amount) as u8;
    let b = (c.b() as f32 + (255.0 - c.b() as f32) * amount) as u8;
    Color32::from_rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle() {
        assert_eq!(ThemeName::Light.toggle(), ThemeName::Dark);
        assert_eq!(ThemeName::Dark.toggle(), ThemeName::Light);
        assert_eq!(ThemeName::default(), ThemeName::Light);
    }

    #[test]
    fn test_install_then_read() {
        let ctx = egui::Context::default();
        install(&ctx, ThemeName::Dark);
        assert_eq!(palette(&ctx), DARK);
        assert!(ctx.style().visuals.dark_mode);

        install(&ctx, ThemeName::Light);
        assert_eq!(palette(&ctx).background, Color32::WHITE);
        assert!(!ctx.style().visuals.dark_mode);
    }

    #[test]
    #[should_panic(expected = "before theme::install")]
    fn test_palette_without_install_panics() {
        let ctx = egui::Context::default();
        palette(&ctx);
    }

    #[test]
    fn test_lighten() {
        assert_eq!(lighten(Color32::BLACK, 1.0), Color32::WHITE);
        assert_eq!(lighten(Color32::from_rgb(100, 100, 100), 0.0), Color32::from_rgb(100, 100, 100));
    }
}
