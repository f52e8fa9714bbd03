//! Fan layout for the grab deck
//!
//! Cards are spread over a fixed fan angle around the horizontal centre of the
//! container. Array order of the visible items decides each card's index, so
//! reordering the items changes the layout.

use crate::constants::*;
use crate::types::{CardLayout, ContainerDimensions, MenuItem};

/// Layout of every visible card, in visible-item order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutMap {
    entries: Vec<CardLayout>,
}

impl LayoutMap {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, id: &str) -> Option<&CardLayout> {
        self.entries.iter().find(|l| l.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardLayout> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|l| l.id.as_str())
    }
}

impl FromIterator<CardLayout> for LayoutMap {
    fn from_iter<I: IntoIterator<Item = CardLayout>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Compute the fan placement of `visible` inside a `width` x `height` container.
pub fn compute_layout(visible: &[MenuItem], width: f32, height: f32) -> LayoutMap {
    let dims = ContainerDimensions { width, height };
    if visible.is_empty() || !dims.is_measured() {
        return LayoutMap::default();
    }

    if let [item] = visible {
        return LayoutMap {
            entries: vec![CardLayout {
                id: item.id.clone(),
                x: width / 2.0 - CARD_WIDTH / 2.0,
                y: height * FAN_ANCHOR_RATIO,
                rotate_deg: 0.0,
                index: 0,
                total_cards: 1,
            }],
        };
    }

    let total = visible.len();
    let center_index = (total - 1) as f32 / 2.0;
    let step = FAN_ANGLE / (total - 1) as f32;
    let max_radians = MAX_ROTATE_DEG.to_radians();

    visible
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let offset = index as f32 - center_index;
            let angle = (offset * step).clamp(-max_radians, max_radians);

            let x = width / 2.0 + angle.sin() * FAN_RADIUS - CARD_WIDTH / 2.0;
            let y = height * FAN_ANCHOR_RATIO - angle.cos() * (FAN_RADIUS * 0.3)
                + offset.abs() * FAN_DROP_PER_STEP;

            CardLayout {
                id: item.id.clone(),
                x,
                y,
                rotate_deg: angle.to_degrees(),
                index,
                total_cards: total,
            }
        })
        .collect()
}

/// Stacking order: the selected card is always on top, otherwise earlier cards
/// stack above later ones.
pub fn z_index(layout: &CardLayout, selected: bool) -> i32 {
    if selected {
        SELECTED_Z_INDEX
    } else {
        2 * (layout.total_cards as i32 - layout.index as i32)
    }
}

/// Memoized layout, recomputed only when the visible ids or the container size change
#[derive(Debug, Default)]
pub struct LayoutCache {
    key: Option<(Vec<String>, ContainerDimensions)>,
    layout: LayoutMap,
}

impl LayoutCache {
    pub fn get(&mut self, visible: &[MenuItem], dims: ContainerDimensions) -> &LayoutMap {
        let stale = match &self.key {
            Some((cached_ids, cached_dims)) => {
                *cached_dims != dims
                    || !cached_ids.iter().map(String::as_str).eq(visible.iter().map(|item| item.id.as_str()))
            }
            None => true,
        };
        if stale {
            self.layout = compute_layout(visible, dims.width, dims.height);
            tracing::debug!(
                cards = self.layout.len(),
                width = dims.width,
                height = dims.height,
                "Card layout recomputed"
            );
            self.key = Some((visible.iter().map(|item| item.id.clone()).collect(), dims));
        }
        &self.layout
    }

    pub fn current(&self) -> &LayoutMap {
        &self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Screen;

    fn items(n: usize) -> Vec<MenuItem> {
        (0..n)
            .map(|i| MenuItem::new(&format!("card-{}", i), "Card", "moon", Screen::Home))
            .collect()
    }

    #[test]
    fn test_empty_and_unmeasured() {
        assert!(compute_layout(&[], 390.0, 844.0).is_empty());
        assert!(compute_layout(&items(3), 0.0, 0.0).is_empty());
        assert!(compute_layout(&items(3), 390.0, 0.0).is_empty());
        assert!(compute_layout(&items(1), f32::NAN, 844.0).is_empty());
    }

    #[test]
    fn test_single_card_centered() {
        let layout = compute_layout(&items(1), 390.0, 844.0);
        let card = layout.get("card-0").unwrap();
        assert_eq!(card.x, 390.0 / 2.0 - CARD_WIDTH / 2.0);
        assert_eq!(card.y, 844.0 * 0.4);
        assert_eq!(card.rotate_deg, 0.0);
        assert_eq!(card.total_cards, 1);
    }

    #[test]
    fn test_keys_match_visible_ids() {
        for n in 2..12 {
            let visible = items(n);
            let layout = compute_layout(&visible, 390.0, 844.0);
            assert_eq!(layout.len(), n);
            let ids: Vec<&str> = layout.ids().collect();
            let expected: Vec<&str> = visible.iter().map(|i| i.id.as_str()).collect();
            assert_eq!(ids, expected);
            for card in layout.iter() {
                assert!(card.x.is_finite() && card.y.is_finite() && card.rotate_deg.is_finite());
            }
        }
    }

    #[test]
    fn test_rotation_never_exceeds_max() {
        for n in 2..20 {
            let layout = compute_layout(&items(n), 1024.0, 768.0);
            for card in layout.iter() {
                assert!(card.rotate_deg.abs() <= MAX_ROTATE_DEG + 1e-4);
            }
        }
    }

    #[test]
    fn test_five_cards_phone_size() {
        let layout = compute_layout(&items(5), 390.0, 844.0);
        let rot = |i: usize| layout.get(&format!("card-{}", i)).unwrap().rotate_deg;

        assert!(rot(2).abs() < 1e-4);
        assert!((rot(0) + 30.0).abs() < 1e-3);
        assert!((rot(4) - 30.0).abs() < 1e-3);
        assert!((rot(1) + 25.0).abs() < 1e-3);
        assert!((rot(3) - 25.0).abs() < 1e-3);
        assert!(rot(0).abs() >= rot(1).abs());

        // Outer cards sit lower than the middle one
        let y = |i: usize| layout.get(&format!("card-{}", i)).unwrap().y;
        assert!(y(0) > y(2));
        assert!((y(0) - y(4)).abs() < 1e-3);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let visible = items(4);
        assert_eq!(
            compute_layout(&visible, 390.0, 844.0),
            compute_layout(&visible, 390.0, 844.0)
        );
    }

    #[test]
    fn test_reordering_changes_layout() {
        let visible = items(3);
        let mut reversed = visible.clone();
        reversed.reverse();
        let a = compute_layout(&visible, 390.0, 844.0);
        let b = compute_layout(&reversed, 390.0, 844.0);
        assert_ne!(a.get("card-0"), b.get("card-0"));
    }

    #[test]
    fn test_z_index_order() {
        let layout = compute_layout(&items(3), 390.0, 844.0);
        let first = layout.get("card-0").unwrap();
        let last = layout.get("card-2").unwrap();
        assert!(z_index(first, false) > z_index(last, false));
        assert_eq!(z_index(last, true), SELECTED_Z_INDEX);
    }

    #[test]
    fn test_cache_recomputes_on_change() {
        let mut cache = LayoutCache::default();
        let dims = ContainerDimensions { width: 390.0, height: 844.0 };
        assert!(cache.get(&[], dims).is_empty());
        assert_eq!(cache.get(&items(2), dims).len(), 2);
        assert_eq!(cache.get(&items(4), dims).len(), 4);
        let resized = ContainerDimensions { width: 800.0, height: 600.0 };
        let x = cache.get(&items(4), resized).get("card-0").unwrap().x;
        assert_eq!(x, compute_layout(&items(4), 800.0, 600.0).get("card-0").unwrap().x);
    }

    #[test]
    fn test_cache_follows_reorder_at_same_size() {
        let mut cache = LayoutCache::default();
        let dims = ContainerDimensions { width: 390.0, height: 844.0 };
        let forward = items(3);
        let mut reversed = items(3);
        reversed.reverse();

        let first = cache.get(&forward, dims).get("card-0").unwrap().rotate_deg;
        let flipped = cache.get(&reversed, dims).get("card-0").unwrap().rotate_deg;
        assert_eq!(first, -flipped);
        assert_eq!(cache.current().ids().next(), Some("card-2"));
    }
}
