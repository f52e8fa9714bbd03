//! Grab deck engine
//!
//! Fan layout, hover resolution with hysteresis, per-card animation and the
//! gesture session that commits a selection. Nothing in here talks to egui;
//! the view in `app::grab_view` feeds it measurements and pointer events.

pub mod animation;
pub mod container;
pub mod gesture;
pub mod hover;
pub mod layout;

pub use animation::CardVisual;
pub use container::GrabDeck;
pub use gesture::{Navigator, SessionEvent};
pub use hover::HoverPolicy;
