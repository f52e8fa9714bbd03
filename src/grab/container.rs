//! Container state: measurement and the deck that ties the engine together

use super::animation::{CardAnimator, CardVisual};
use super::gesture::{GestureCoordinator, Navigator, SessionEvent, Surface};
use super::hover::HoverPolicy;
use super::layout::{z_index, LayoutCache};
use crate::types::{
    visible_items, CardLayout, ContainerDimensions, ContainerOrigin, Measurement, MenuItem,
};
use std::rc::Rc;
use tracing::debug;

/// Single writer of the container's size and absolute origin
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ContainerMetrics {
    dims: ContainerDimensions,
    origin: ContainerOrigin,
}

impl ContainerMetrics {
    /// Apply a host measurement. The origin is always refreshed; the size only
    /// for a non-empty rect. Returns true if the size changed.
    pub fn apply(&mut self, m: Measurement) -> bool {
        self.origin = ContainerOrigin { x: m.page_x, y: m.page_y };
        let dims = ContainerDimensions { width: m.width, height: m.height };
        if !dims.is_measured() || dims == self.dims {
            return false;
        }
        debug!(width = m.width, height = m.height, x = m.page_x, y = m.page_y, "Container measured");
        self.dims = dims;
        true
    }

    pub fn dimensions(&self) -> ContainerDimensions {
        self.dims
    }

    pub fn origin(&self) -> ContainerOrigin {
        self.origin
    }
}

/// One card ready to paint
pub struct RenderedCard<'a> {
    pub item: &'a MenuItem,
    pub layout: &'a CardLayout,
    pub visual: CardVisual,
    pub z_index: i32,
    pub selected: bool,
}

/// The grab deck: visible items, layout, gesture session and card animators
pub struct GrabDeck {
    metrics: ContainerMetrics,
    layout: LayoutCache,
    visible: Vec<MenuItem>,
    coordinator: GestureCoordinator<CardAnimator>,
}

impl GrabDeck {
    pub fn new(navigator: Rc<dyn Navigator>, policy: HoverPolicy) -> Self {
        Self {
            metrics: ContainerMetrics::default(),
            layout: LayoutCache::default(),
            visible: Vec::new(),
            coordinator: GestureCoordinator::new(navigator, policy),
        }
    }

    pub fn metrics(&self) -> ContainerMetrics {
        self.metrics
    }

    pub fn coordinator(&self) -> &GestureCoordinator<CardAnimator> {
        &self.coordinator
    }

    pub fn set_policy(&mut self, policy: HoverPolicy) {
        self.coordinator.set_policy(policy);
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.coordinator.selection().get()
    }

    /// Take the current menu items; mounts and unmounts card animators to match.
    pub fn set_items(&mut self, items: &[MenuItem]) {
        if items.iter().filter(|item| item.visible).eq(self.visible.iter()) {
            return;
        }
        self.visible = visible_items(items);
        debug!(visible = self.visible.len(), "Visible cards changed");
        self.coordinator
            .sync_cards(self.visible.iter().map(|item| item.id.as_str()), CardAnimator::new);
        self.layout.get(&self.visible, self.metrics.dimensions());
    }

    pub fn measure(&mut self, m: Measurement) {
        if self.metrics.apply(m) {
            self.layout.get(&self.visible, self.metrics.dimensions());
        }
    }

    pub fn handle(&mut self, event: SessionEvent) {
        let layout = self.layout.get(&self.visible, self.metrics.dimensions());
        let surface = Surface {
            origin: self.metrics.origin(),
            layout,
            items: &self.visible,
        };
        self.coordinator.handle(event, &surface);
    }

    /// Advance card animations. Returns true while any card is still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        let selected = self.coordinator.selection().get().map(str::to_owned);
        let mut animating = false;
        for (id, card) in self.coordinator.cards_mut() {
            card.set_selected(selected.as_deref() == Some(id));
            animating |= card.tick(dt);
        }
        animating
    }

    /// Cards in paint order (lowest z first). Items without a layout are skipped.
    pub fn cards(&self) -> Vec<RenderedCard<'_>> {
        let layout = self.layout.current();
        let selected = self.coordinator.selection().get();
        let mut cards: Vec<RenderedCard<'_>> = self
            .visible
            .iter()
            .filter_map(|item| {
                let card_layout = layout.get(&item.id)?;
                let is_selected = selected == Some(item.id.as_str());
                let visual = self
                    .coordinator
                    .card(&item.id)
                    .map(|card| card.visual())
                    .unwrap_or_default();
                Some(RenderedCard {
                    item,
                    layout: card_layout,
                    visual,
                    z_index: z_index(card_layout, is_selected),
                    selected: is_selected,
                })
            })
            .collect();
        cards.sort_by_key(|card| card.z_index);
        cards
    }

    /// Tear down all cards, e.g. when navigating away from the deck
    pub fn unmount(&mut self) {
        self.coordinator.unmount_all();
        self.visible.clear();
    }
}
