//! Statistics and profile screens

use super::App;
use crate::constants::APP_VERSION;
use crate::theme::{self, Palette};
use crate::types::NotificationPermission;
use crate::ui::components::{info_row, section_title, setting_row, stat_card};
use chrono::{Duration, Local, NaiveDate};
use eframe::egui;
use egui_phosphor::regular as icons;
use tracing::debug;

/// Placeholder figures until sleep tracking feeds real data
const STATS: [(&str, &str); 5] = [
    ("45", "Total sleep days"),
    ("7.2 h", "Average sleep"),
    ("12", "Best streak"),
    ("6.8 h", "This week's average"),
    ("45%", "Deep sleep ratio"),
];

const SLEEP_TIP: &str = "Keep a consistent bedtime, even on weekends. A steady rhythm makes falling asleep easier.";

/// Weekday labels for the week ending on `today`, oldest first
pub(crate) fn last_seven_days(today: NaiveDate) -> Vec<String> {
    (0..7)
        .rev()
        .map(|offset| (today - Duration::days(offset)).format("%a").to_string())
        .collect()
}

fn screen_title(ui: &mut egui::Ui, palette: &Palette, title: &str) {
    ui.label(
        egui::RichText::new(title)
            .size(theme::FONT_DISPLAY)
            .strong()
            .color(palette.text),
    );
    ui.add_space(theme::SPACING_XL);
}

impl App {
    pub(crate) fn render_statistics(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let palette = theme::palette(ctx);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .id_salt("statistics_scroll")
            .show(ui, |ui| {
                ui.set_max_width(theme::CONTENT_MAX_WIDTH);
                screen_title(ui, &palette, "Sleep Statistics");

                let spacing = theme::SPACING_LG;
                let tile_width = ((ui.available_width() - spacing) / 2.0 - 2.0 * theme::SPACING_LG).max(60.0);
                for row in STATS.chunks(2) {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = spacing;
                        for (value, label) in row {
                            stat_card(ui, &palette, value, label, tile_width);
                        }
                    });
                    ui.add_space(spacing);
                }

                theme::card_frame(&palette).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(
                        egui::RichText::new("Sleep trend, last 7 days")
                            .size(theme::FONT_TITLE)
                            .strong()
                            .color(palette.text),
                    );
                    ui.add_space(theme::SPACING_XL);
                    render_chart_placeholder(ui, &palette);
                });

                ui.add_space(theme::SPACING_XL);
                egui::Frame::new()
                    .fill(palette.tip_background)
                    .corner_radius(theme::RADIUS_LARGE)
                    .inner_margin(egui::Margin::same(theme::SPACING_LG as i8))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(
                            egui::RichText::new(format!("{}  Sleep tip", icons::LIGHTBULB))
                                .size(theme::FONT_HEADING)
                                .strong()
                                .color(palette.tip_title),
                        );
                        ui.add_space(theme::SPACING_SM);
                        ui.label(egui::RichText::new(SLEEP_TIP).size(theme::FONT_BODY).color(palette.tip_text));
                    });
            });
    }

    pub(crate) fn render_profile(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let palette = theme::palette(ctx);
        let dark = theme::current(ctx).is_dark();
        let permission = NotificationPermission::from_enabled(self.settings.notifications_enabled);

        let mut toggle_theme = false;
        let mut toggle_notifications = false;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .id_salt("profile_scroll")
            .show(ui, |ui| {
                ui.set_max_width(theme::CONTENT_MAX_WIDTH);
                ui.vertical_centered(|ui| {
                    screen_title(ui, &palette, "Profile");
                    let (rect, _) = ui.allocate_exact_size(
                        egui::vec2(theme::AVATAR_SIZE, theme::AVATAR_SIZE),
                        egui::Sense::hover(),
                    );
                    ui.painter().circle_filled(rect.center(), theme::AVATAR_SIZE / 2.0, palette.primary);
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        icons::USER,
                        egui::FontId::proportional(theme::AVATAR_SIZE * 0.5),
                        egui::Color32::WHITE,
                    );
                });
                ui.add_space(theme::SPACING_XL);

                section_title(ui, &palette, "Account");
                info_row(ui, &palette, "Username", "SleepWell user", palette.text);
                info_row(ui, &palette, "Membership", "Standard", theme::STATUS_SUCCESS);
                info_row(ui, &palette, "Points", "1250", palette.text);

                section_title(ui, &palette, "Settings");
                let (mode_text, mode_icon) = if dark { ("On", icons::MOON) } else { ("Off", icons::SUN) };
                if setting_row(ui, &palette, "Dark mode", mode_text, mode_icon) {
                    toggle_theme = true;
                }

                let (perm_text, perm_color, action) = if permission.is_granted() {
                    ("Allowed", theme::STATUS_SUCCESS, "Tap to turn off bedtime reminders")
                } else {
                    ("Not allowed", theme::STATUS_ERROR, "Tap to allow bedtime reminders")
                };
                info_row(ui, &palette, "Notification permission", perm_text, perm_color);
                if setting_row(ui, &palette, "Notifications", action, icons::BELL) {
                    toggle_notifications = true;
                }

                setting_row(
                    ui,
                    &palette,
                    "About",
                    &format!("Version {}", APP_VERSION),
                    icons::INFO,
                );
                if setting_row(ui, &palette, "Help & feedback", "Get help or report a problem", icons::QUESTION) {
                    debug!("Help requested");
                }
            });

        if toggle_theme {
            self.set_theme(ctx, theme::current(ctx).toggle());
        }
        if toggle_notifications {
            self.settings.notifications_enabled = !self.settings.notifications_enabled;
            debug!(enabled = self.settings.notifications_enabled, "Notification permission toggled");
            self.save_settings();
        }
    }
}

fn render_chart_placeholder(ui: &mut egui::Ui, palette: &Palette) {
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), theme::CHART_HEIGHT),
        egui::Sense::hover(),
    );
    let painter = ui.painter();
    painter.rect_filled(rect, theme::RADIUS_DEFAULT, theme::faded(palette.text, 0.05));
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        format!("{}  Sleep trend chart", icons::CHART_BAR),
        egui::FontId::proportional(theme::FONT_BODY),
        theme::faded(palette.text, 0.4),
    );

    let labels = last_seven_days(Local::now().date_naive());
    let slot = rect.width() / labels.len() as f32;
    for (i, label) in labels.iter().enumerate() {
        painter.text(
            egui::pos2(rect.left() + slot * (i as f32 + 0.5), rect.bottom() - theme::SPACING_MD),
            egui::Align2::CENTER_BOTTOM,
            label,
            egui::FontId::proportional(theme::FONT_SMALL),
            palette.text_secondary,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_seven_days_ends_today() {
        // 2024-01-07 was a Sunday
        let today = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let labels = last_seven_days(today);
        assert_eq!(labels, vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
    }
}
