//! Reusable UI components
//!
//! Standalone widgets shared by the screens. All of them take the active
//! palette explicitly so they can be drawn on any surface.

use crate::theme::{self, Palette};
use eframe::egui;
use egui_phosphor::regular as icons;

/// Resolve a menu icon name to a glyph. Named icons map to Phosphor glyphs;
/// anything else (typically an emoji) is drawn as-is.
pub fn icon_glyph(icon: &str) -> &str {
    match icon {
        "moon" | "moon-outline" => icons::MOON,
        "stats-chart" | "stats-chart-outline" | "bar-chart" => icons::CHART_BAR,
        "person" | "person-outline" | "person-circle" => icons::USER,
        "bulb" | "bulb-outline" => icons::LIGHTBULB,
        "information-circle" | "information-circle-outline" => icons::INFO,
        "settings" | "settings-outline" => icons::GEAR,
        "notifications" | "notifications-outline" => icons::BELL,
        "alarm" | "alarm-outline" => icons::ALARM,
        "logo-github" => icons::GITHUB_LOGO,
        "folder-open-outline" => icons::FOLDER_OPEN,
        other => other,
    }
}

/// Section heading above a group of rows
pub fn section_title(ui: &mut egui::Ui, palette: &Palette, text: &str) {
    ui.add_space(theme::SPACING_MD);
    ui.label(
        egui::RichText::new(text)
            .size(theme::FONT_TITLE)
            .strong()
            .color(palette.text),
    );
    ui.add_space(theme::SPACING_SM);
}

/// Label on the left, value on the right, inside a card surface
pub fn info_row(ui: &mut egui::Ui, palette: &Palette, label: &str, value: &str, value_color: egui::Color32) {
    theme::card_frame(palette).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(label)
                    .size(theme::FONT_BODY)
                    .color(theme::faded(palette.text, 0.5)),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(value)
                        .size(theme::FONT_HEADING)
                        .strong()
                        .color(value_color),
                );
            });
        });
    });
    ui.add_space(theme::SPACING_MD);
}

/// Clickable settings row with a label, a description and a trailing icon.
/// Returns true if clicked.
pub fn setting_row(
    ui: &mut egui::Ui,
    palette: &Palette,
    label: &str,
    description: &str,
    trailing: &str,
) -> bool {
    let inner = theme::card_frame(palette).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new(label)
                        .size(theme::FONT_HEADING)
                        .color(palette.text),
                );
                ui.label(
                    egui::RichText::new(description)
                        .size(theme::FONT_SMALL)
                        .color(theme::faded(palette.text, 0.4)),
                );
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(trailing).size(theme::FONT_TITLE).color(palette.primary));
            });
        });
    });
    ui.add_space(theme::SPACING_MD);

    let response = inner.response.interact(egui::Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response.clicked()
}

/// Big number with a caption, used on the statistics screen
pub fn stat_card(ui: &mut egui::Ui, palette: &Palette, value: &str, label: &str, width: f32) {
    theme::card_frame(palette).show(ui, |ui| {
        ui.set_width(width);
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(value)
                    .size(theme::FONT_STAT)
                    .strong()
                    .color(palette.text),
            );
            ui.add_space(theme::SPACING_SM);
            ui.label(
                egui::RichText::new(label)
                    .size(theme::FONT_BODY)
                    .color(theme::faded(palette.text, 0.5)),
            );
        });
    });
}

/// Custom checkbox row. Returns true if toggled.
pub fn checkbox_row(ui: &mut egui::Ui, palette: &Palette, checked: bool, label: &str) -> bool {
    let full_width = ui.available_width();
    let (row_rect, row_resp) =
        ui.allocate_exact_size(egui::vec2(full_width, 22.0), egui::Sense::click());
    if row_resp.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    let painter = ui.painter();
    let cb_size = 16.0;
    let cb_rect = egui::Rect::from_min_size(
        egui::pos2(row_rect.min.x, row_rect.center().y - cb_size / 2.0),
        egui::vec2(cb_size, cb_size),
    );
    if checked {
        painter.rect_filled(cb_rect, 3.0, palette.primary);
        painter.text(
            cb_rect.center(),
            egui::Align2::CENTER_CENTER,
            icons::CHECK,
            egui::FontId::proportional(cb_size * 0.7),
            palette.background,
        );
    } else {
        painter.rect_stroke(
            cb_rect,
            3.0,
            egui::Stroke::new(1.5, palette.text_secondary),
            egui::StrokeKind::Inside,
        );
    }
    painter.text(
        egui::pos2(cb_rect.max.x + 8.0, row_rect.center().y),
        egui::Align2::LEFT_CENTER,
        label,
        egui::FontId::proportional(theme::FONT_BODY),
        palette.text,
    );
    row_resp.clicked()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_glyph() {
        assert_eq!(icon_glyph("moon"), icons::MOON);
        assert_eq!(icon_glyph("logo-github"), icons::GITHUB_LOGO);
        assert_eq!(icon_glyph("😴"), "😴");
    }
}
