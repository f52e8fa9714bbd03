//! Hover resolution: which card is under the pointer

use super::layout::LayoutMap;
use crate::constants::{CARD_HEIGHT, CARD_WIDTH};
use crate::types::{ContainerOrigin, Point, PointerSample};

/// Selection radius and release band for hover resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverPolicy {
    pub threshold: f32,
    /// Multiplier on `threshold` a selected card may drift before it is dropped
    pub stickiness: f32,
}

impl HoverPolicy {
    pub fn for_screen(screen_width: f32, screen_height: f32, ratio: f32, stickiness: f32) -> Self {
        Self {
            threshold: selection_threshold(screen_width, screen_height, ratio),
            stickiness,
        }
    }

    pub fn release_distance(&self) -> f32 {
        self.threshold * self.stickiness
    }
}

pub fn selection_threshold(screen_width: f32, screen_height: f32, ratio: f32) -> f32 {
    screen_width.min(screen_height) * ratio
}

/// Convert an absolute pointer sample into container-relative coordinates.
pub fn to_container_relative(sample: PointerSample, origin: ContainerOrigin) -> Point {
    Point {
        x: sample.page_x - origin.x,
        y: sample.page_y - origin.y,
    }
}

fn distance_to_center(pointer: Point, x: f32, y: f32) -> f32 {
    let cx = x + CARD_WIDTH / 2.0;
    let cy = y + CARD_HEIGHT / 2.0;
    ((pointer.x - cx).powi(2) + (pointer.y - cy).powi(2)).sqrt()
}

/// Resolve the selection target for `pointer`.
///
/// The nearest card center wins if it is strictly inside the threshold. When
/// nothing qualifies, a previous selection is kept until the nearest center is
/// farther than `threshold * stickiness`.
pub fn resolve_hover(
    pointer: Point,
    layout: &LayoutMap,
    policy: HoverPolicy,
    previous: Option<&str>,
) -> Option<String> {
    let mut nearest: Option<(&str, f32)> = None;
    for card in layout.iter() {
        let distance = distance_to_center(pointer, card.x, card.y);
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((card.id.as_str(), distance)),
        }
    }

    let (id, distance) = nearest?;
    if distance < policy.threshold {
        return Some(id.to_string());
    }

    match previous {
        Some(prev) if distance <= policy.release_distance() && layout.get(prev).is_some() => {
            Some(prev.to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grab::layout::compute_layout;
    use crate::types::{CardLayout, MenuItem, Screen};

    fn policy() -> HoverPolicy {
        // 390 x 844 phone: threshold = 58.5
        HoverPolicy::for_screen(390.0, 844.0, 0.15, 1.5)
    }

    fn layout() -> LayoutMap {
        let items: Vec<MenuItem> = ["sleep", "stats", "profile"]
            .iter()
            .map(|id| MenuItem::new(id, id, "moon", Screen::Home))
            .collect();
        compute_layout(&items, 390.0, 844.0)
    }

    fn center_of(layout: &LayoutMap, id: &str) -> Point {
        let card = layout.get(id).unwrap();
        Point {
            x: card.x + CARD_WIDTH / 2.0,
            y: card.y + CARD_HEIGHT / 2.0,
        }
    }

    #[test]
    fn test_threshold_uses_short_side() {
        assert!((policy().threshold - 58.5).abs() < 1e-4);
        assert!((policy().release_distance() - 87.75).abs() < 1e-3);
    }

    #[test]
    fn test_pointer_on_center_selects() {
        let layout = layout();
        let pointer = center_of(&layout, "stats");
        assert_eq!(resolve_hover(pointer, &layout, policy(), None).as_deref(), Some("stats"));
    }

    #[test]
    fn test_far_pointer_without_previous() {
        let layout = layout();
        let pointer = Point { x: 5.0, y: 5.0 };
        assert_eq!(resolve_hover(pointer, &layout, policy(), None), None);
    }

    #[test]
    fn test_empty_layout() {
        let pointer = Point { x: 100.0, y: 100.0 };
        assert_eq!(resolve_hover(pointer, &LayoutMap::default(), policy(), Some("x")), None);
    }

    #[test]
    fn test_hysteresis_band() {
        let layout = layout();
        let center = center_of(&layout, "stats");
        let policy = policy();

        // Move straight up so the middle card stays the nearest one
        let inside_band = Point { x: center.x, y: center.y - policy.threshold * 1.2 };
        assert_eq!(resolve_hover(inside_band, &layout, policy, None), None);
        assert_eq!(
            resolve_hover(inside_band, &layout, policy, Some("stats")).as_deref(),
            Some("stats")
        );

        let beyond_band = Point { x: center.x, y: center.y - policy.threshold * 1.6 };
        assert_eq!(resolve_hover(beyond_band, &layout, policy, Some("stats")), None);
    }

    #[test]
    fn test_nearest_card_replaces_previous() {
        let layout = layout();
        let pointer = center_of(&layout, "profile");
        assert_eq!(
            resolve_hover(pointer, &layout, policy(), Some("sleep")).as_deref(),
            Some("profile")
        );
    }

    #[test]
    fn test_tie_goes_to_first_card() {
        let card = |id: &str, index| CardLayout {
            id: id.to_string(),
            x: 100.0,
            y: 100.0,
            rotate_deg: 0.0,
            index,
            total_cards: 2,
        };
        let layout: LayoutMap = vec![card("a", 0), card("b", 1)].into_iter().collect();
        let pointer = Point { x: 160.0, y: 200.0 };
        assert_eq!(resolve_hover(pointer, &layout, policy(), None).as_deref(), Some("a"));
    }

    #[test]
    fn test_container_relative() {
        let origin = ContainerOrigin { x: 10.0, y: 90.0 };
        let p = to_container_relative(PointerSample::new(110.0, 100.0), origin);
        assert_eq!(p, Point { x: 100.0, y: 10.0 });
    }
}
