//! Gesture coordinator: pointer sessions, selection state and commit
//!
//! A session runs from the first contact to release or cancellation. Every
//! pointer sample is resolved against the current layout; on release the
//! selected card plays its release animation and the navigator is called once
//! that animation completes.

use super::animation::{CardAnimator, ReleaseAnimation};
use super::hover::{resolve_hover, to_container_relative, HoverPolicy};
use super::layout::LayoutMap;
use crate::types::{ContainerOrigin, MenuItem, PointerSample};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Navigation capability used to commit a selection
pub trait Navigator {
    fn navigate(&self, screen: &str);
}

/// Host pointer callbacks, in arrival order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    Start(PointerSample),
    Move(PointerSample),
    End,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Tracking,
}

/// The currently targeted card, at most one
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionState {
    selected_id: Option<String>,
}

impl SelectionState {
    pub fn get(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.get() == Some(id)
    }

    /// Returns true if the selection changed
    pub fn set(&mut self, id: Option<String>) -> bool {
        if self.selected_id == id {
            return false;
        }
        self.selected_id = id;
        true
    }

    pub fn take(&mut self) -> Option<String> {
        self.selected_id.take()
    }
}

/// What the coordinator reads from the container on each event
pub struct Surface<'a> {
    pub origin: ContainerOrigin,
    pub layout: &'a LayoutMap,
    pub items: &'a [MenuItem],
}

pub struct GestureCoordinator<H: ReleaseAnimation = CardAnimator> {
    phase: SessionPhase,
    selection: SelectionState,
    policy: HoverPolicy,
    cards: HashMap<String, H>,
    navigator: Rc<dyn Navigator>,
}

impl<H: ReleaseAnimation> GestureCoordinator<H> {
    pub fn new(navigator: Rc<dyn Navigator>, policy: HoverPolicy) -> Self {
        Self {
            phase: SessionPhase::Idle,
            selection: SelectionState::default(),
            policy,
            cards: HashMap::new(),
            navigator,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_tracking(&self) -> bool {
        self.phase == SessionPhase::Tracking
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn policy(&self) -> HoverPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: HoverPolicy) {
        self.policy = policy;
    }

    // ========== CARD REGISTRY ==========

    pub fn register(&mut self, id: &str, card: H) {
        self.cards.insert(id.to_string(), card);
    }

    pub fn unregister(&mut self, id: &str) -> Option<H> {
        self.cards.remove(id)
    }

    pub fn card(&self, id: &str) -> Option<&H> {
        self.cards.get(id)
    }

    pub fn cards_mut(&mut self) -> impl Iterator<Item = (&str, &mut H)> {
        self.cards.iter_mut().map(|(id, card)| (id.as_str(), card))
    }

    /// Mount cards for new ids and unmount the ones no longer visible.
    pub fn sync_cards<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>, mut mount: impl FnMut() -> H) {
        let ids: Vec<&str> = ids.into_iter().collect();
        let stale: Vec<String> = self
            .cards
            .keys()
            .filter(|id| !ids.contains(&id.as_str()))
            .cloned()
            .collect();
        for id in stale {
            if let Some(mut card) = self.unregister(&id) {
                card.cancel_release();
            }
        }
        for id in ids {
            if !self.cards.contains_key(id) {
                self.register(id, mount());
            }
        }
    }

    /// Unmount every card and close any open session. Pending releases are
    /// cancelled, so they never navigate.
    pub fn unmount_all(&mut self) {
        for card in self.cards.values_mut() {
            card.cancel_release();
        }
        self.cards.clear();
        self.phase = SessionPhase::Idle;
        self.selection.take();
    }

    // ========== SESSION EVENTS ==========

    pub fn handle(&mut self, event: SessionEvent, surface: &Surface<'_>) {
        match event {
            SessionEvent::Start(sample) => self.on_session_start(sample, surface),
            SessionEvent::Move(sample) => self.on_session_move(sample, surface),
            SessionEvent::End => self.on_session_end(surface.items),
            SessionEvent::Cancelled => self.on_session_cancelled(),
        }
    }

    pub fn on_session_start(&mut self, sample: PointerSample, surface: &Surface<'_>) {
        self.phase = SessionPhase::Tracking;
        self.update_hover(sample, surface);
    }

    pub fn on_session_move(&mut self, sample: PointerSample, surface: &Surface<'_>) {
        if self.phase != SessionPhase::Tracking {
            return;
        }
        self.update_hover(sample, surface);
    }

    pub fn on_session_end(&mut self, items: &[MenuItem]) {
        if self.phase != SessionPhase::Tracking {
            return;
        }
        self.phase = SessionPhase::Idle;

        let Some(id) = self.selection.take() else {
            return;
        };
        let Some(item) = items.iter().find(|item| item.id == id) else {
            debug!(card = %id, "Selected card is no longer visible");
            return;
        };

        let screen = item.screen.clone();
        match self.cards.get_mut(&id) {
            Some(card) => {
                let navigator = Rc::clone(&self.navigator);
                let target = screen.clone();
                if card.play_release_animation(Box::new(move || navigator.navigate(&target))) {
                    info!(card = %id, screen = %screen, "Committing selection");
                } else {
                    warn!(card = %id, "Release already playing, committing without animation");
                    self.navigator.navigate(&screen);
                }
            }
            None => {
                warn!(card = %id, "No card controller registered, committing without animation");
                self.navigator.navigate(&screen);
            }
        }
    }

    /// Close the open session without committing. Releases committed by
    /// earlier sessions keep playing.
    pub fn on_session_cancelled(&mut self) {
        if self.phase == SessionPhase::Tracking {
            debug!("Gesture session cancelled");
        }
        self.phase = SessionPhase::Idle;
        self.selection.take();
    }

    fn update_hover(&mut self, sample: PointerSample, surface: &Surface<'_>) {
        let pointer = to_container_relative(sample, surface.origin);
        let next = resolve_hover(pointer, surface.layout, self.policy, self.selection.get());
        if self.selection.set(next) {
            debug!(selected = ?self.selection.get(), "Selection changed");
        }
    }
}
