//! Home screen: the grab deck container
//!
//! Measures the container, turns raw egui pointer events into gesture session
//! events, advances card animations and paints the fan.

use super::App;
use crate::constants::{CARD_HEIGHT, CARD_WIDTH};
use crate::grab::container::RenderedCard;
use crate::grab::{CardVisual, HoverPolicy, SessionEvent};
use crate::theme::{self, Palette};
use crate::types::{CardLayout, Measurement, PointerSample, Screen};
use crate::ui::components::{checkbox_row, icon_glyph};
use eframe::egui;
use tracing::debug;

const CORNER_SEGMENTS: usize = 4;

impl App {
    pub(crate) fn render_home(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let palette = theme::palette(ctx);

        ui.horizontal(|ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                self.render_card_menu(ui, &palette);
            });
        });

        self.deck.set_items(&self.menu_items);
        if self.deck.is_empty() {
            render_empty_state(ui, &palette);
            return;
        }

        let screen = ctx.screen_rect();
        self.deck.set_policy(HoverPolicy::for_screen(
            screen.width(),
            screen.height(),
            self.settings.selection_threshold_ratio,
            self.settings.hover_stickiness,
        ));

        let rect = ui.available_rect_before_wrap();
        let parent = ui.max_rect().min;
        ui.allocate_rect(rect, egui::Sense::drag());
        self.deck.measure(Measurement {
            x: rect.min.x - parent.x,
            y: rect.min.y - parent.y,
            width: rect.width(),
            height: rect.height(),
            page_x: rect.min.x,
            page_y: rect.min.y,
        });

        let tracking = self.deck.coordinator().is_tracking();
        let layer = ui.layer_id();
        let raw = ctx.input(|i| i.events.clone());
        let events = session_events(&raw, rect, tracking, |pos| {
            ctx.layer_id_at(pos).map_or(true, |top| top == layer)
        });
        for event in events {
            self.deck.handle(event);
        }

        let dt = ctx.input(|i| i.stable_dt);
        if self.deck.tick(dt) {
            ctx.request_repaint();
        }
        if self.navigation.current() != Screen::Home {
            // A release completed this frame; the next frame draws the target
            ctx.request_repaint();
            return;
        }

        let painter = ui.painter_at(rect);
        for card in self.deck.cards() {
            paint_card(&painter, rect.min, &card, &palette);
        }
    }

    fn render_card_menu(&mut self, ui: &mut egui::Ui, palette: &Palette) {
        let label = format!("{}  Cards", egui_phosphor::regular::SLIDERS_HORIZONTAL);
        ui.menu_button(label, |ui| {
            ui.set_min_width(180.0);
            let mut changed = false;
            for item in self.menu_items.iter_mut() {
                if checkbox_row(ui, palette, item.visible, &item.title) {
                    item.visible = !item.visible;
                    self.settings.set_card_hidden(&item.id, !item.visible);
                    debug!(card = %item.id, visible = item.visible, "Card visibility toggled");
                    changed = true;
                }
            }
            if changed {
                self.save_settings();
            }
        });
    }
}

fn render_empty_state(ui: &mut egui::Ui, palette: &Palette) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        ui.label(
            egui::RichText::new(icon_glyph("folder-open-outline"))
                .size(60.0)
                .color(palette.text_secondary),
        );
        ui.add_space(16.0);
        ui.label(
            egui::RichText::new("No cards available to grab")
                .size(theme::FONT_TITLE)
                .color(palette.text_secondary),
        );
    });
}

/// Translate raw pointer events into session events for a container at
/// `container`. `tracking` is whether a session is already open. Presses for
/// which `accepts_press` is false (covered by a popup or another window) are
/// left alone.
pub(crate) fn session_events(
    events: &[egui::Event],
    container: egui::Rect,
    mut tracking: bool,
    accepts_press: impl Fn(egui::Pos2) -> bool,
) -> Vec<SessionEvent> {
    let sample = |pos: egui::Pos2| PointerSample::new(pos.x, pos.y);
    let mut out = Vec::new();
    for event in events {
        match event {
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed: true,
                ..
            } if !tracking && container.contains(*pos) && accepts_press(*pos) => {
                tracking = true;
                out.push(SessionEvent::Start(sample(*pos)));
            }
            egui::Event::PointerButton {
                button: egui::PointerButton::Primary,
                pressed: false,
                ..
            } if tracking => {
                tracking = false;
                out.push(SessionEvent::End);
            }
            egui::Event::PointerMoved(pos) if tracking => {
                out.push(SessionEvent::Move(sample(*pos)));
            }
            egui::Event::PointerGone | egui::Event::WindowFocused(false) if tracking => {
                tracking = false;
                out.push(SessionEvent::Cancelled);
            }
            _ => {}
        }
    }
    out
}

/// Maps card-local points (origin at the card center) to screen space:
/// lift, then scale, then the depth squash, then the planar rotation.
struct CardTransform {
    center: egui::Pos2,
    sin: f32,
    cos: f32,
    squash: f32,
    scale: f32,
    lift: f32,
}

impl CardTransform {
    fn new(origin: egui::Pos2, layout: &CardLayout, visual: CardVisual) -> Self {
        let angle = layout.rotate_deg.to_radians();
        let (sin, cos) = angle.sin_cos();
        Self {
            center: origin + egui::vec2(layout.x + CARD_WIDTH / 2.0, layout.y + CARD_HEIGHT / 2.0),
            sin,
            cos,
            // rotateY by the same angle, seen head-on
            squash: cos,
            scale: visual.scale,
            lift: visual.lift,
        }
    }

    fn apply(&self, local: egui::Vec2) -> egui::Pos2 {
        let x = local.x * self.scale * self.squash;
        let y = (local.y + self.lift) * self.scale;
        self.center + self.rotate(egui::vec2(x, y))
    }

    fn rotate(&self, v: egui::Vec2) -> egui::Vec2 {
        egui::vec2(v.x * self.cos - v.y * self.sin, v.x * self.sin + v.y * self.cos)
    }

    fn angle(&self) -> f32 {
        self.sin.atan2(self.cos)
    }
}

/// Card outline in local coordinates, clockwise from the top-left arc
fn rounded_outline(width: f32, height: f32, radius: f32) -> Vec<egui::Vec2> {
    let (hw, hh) = (width / 2.0, height / 2.0);
    let r = radius.min(hw).min(hh);
    let corners = [
        (egui::vec2(-hw + r, -hh + r), std::f32::consts::PI),
        (egui::vec2(hw - r, -hh + r), std::f32::consts::PI * 1.5),
        (egui::vec2(hw - r, hh - r), 0.0),
        (egui::vec2(-hw + r, hh - r), std::f32::consts::FRAC_PI_2),
    ];
    let mut points = Vec::with_capacity(corners.len() * (CORNER_SEGMENTS + 1));
    for (center, start) in corners {
        for step in 0..=CORNER_SEGMENTS {
            let a = start + std::f32::consts::FRAC_PI_2 * step as f32 / CORNER_SEGMENTS as f32;
            points.push(center + egui::vec2(a.cos(), a.sin()) * r);
        }
    }
    points
}

fn paint_card(painter: &egui::Painter, origin: egui::Pos2, card: &RenderedCard<'_>, palette: &Palette) {
    let visual = card.visual;
    if visual.opacity <= 0.0 {
        return;
    }
    let transform = CardTransform::new(origin, card.layout, visual);
    let outline: Vec<egui::Pos2> = rounded_outline(CARD_WIDTH, CARD_HEIGHT, theme::RADIUS_CARD)
        .into_iter()
        .map(|p| transform.apply(p))
        .collect();

    let shadow: Vec<egui::Pos2> = outline.iter().map(|p| *p + egui::vec2(0.0, 2.0)).collect();
    painter.add(egui::Shape::convex_polygon(
        shadow,
        theme::CARD_SHADOW.gamma_multiply(visual.opacity),
        egui::Stroke::NONE,
    ));

    let stroke = if card.selected {
        egui::Stroke::new(2.0, palette.primary.gamma_multiply(visual.opacity))
    } else {
        egui::Stroke::NONE
    };
    painter.add(egui::Shape::convex_polygon(
        outline,
        palette.card.gamma_multiply(visual.opacity),
        stroke,
    ));

    let text_color = palette.text.gamma_multiply(visual.opacity);
    paint_card_text(
        painter,
        &transform,
        egui::vec2(0.0, -22.0),
        icon_glyph(&card.item.icon),
        theme::FONT_CARD_ICON,
        text_color,
    );
    paint_card_text(
        painter,
        &transform,
        egui::vec2(0.0, 28.0),
        &card.item.title,
        theme::FONT_HEADING,
        text_color,
    );
}

/// Draw `text` centered on a card-local point, rotated with the card
fn paint_card_text(
    painter: &egui::Painter,
    transform: &CardTransform,
    local: egui::Vec2,
    text: &str,
    size: f32,
    color: egui::Color32,
) {
    let galley = painter.layout(
        text.to_string(),
        egui::FontId::proportional(size * transform.scale),
        color,
        (CARD_WIDTH - 30.0) * transform.scale,
    );
    let half = galley.size() / 2.0;
    let pos = transform.apply(local) + transform.rotate(-half);
    painter.add(egui::epaint::TextShape::new(pos, galley, color).with_angle(transform.angle()));
}
