//! Application constants and configuration

pub const APP_NAME: &str = "SleepWell";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// GRAB DECK - Card geometry
// =============================================================================
pub const CARD_WIDTH: f32 = 120.0;
pub const CARD_HEIGHT: f32 = 200.0;
pub const FAN_RADIUS: f32 = 240.0;
/// Total fan spread (100 degrees)
pub const FAN_ANGLE: f32 = std::f32::consts::PI / 1.8;
pub const MAX_ROTATE_DEG: f32 = 30.0;
/// Vertical anchor of the fan as a fraction of container height
pub const FAN_ANCHOR_RATIO: f32 = 0.4;
/// Outer cards sink this many points per index step away from the middle
pub const FAN_DROP_PER_STEP: f32 = 20.0;
pub const SELECTED_Z_INDEX: i32 = 9999;

// =============================================================================
// GRAB DECK - Hover selection
// =============================================================================
pub const SELECTION_THRESHOLD_RATIO: f32 = 0.15;
pub const HOVER_STICKINESS: f32 = 1.5;

// =============================================================================
// GRAB DECK - Animation
// =============================================================================
pub const SELECTED_SCALE: f32 = 1.2;
pub const SELECTED_LIFT: f32 = -30.0;
pub const SELECT_FRICTION: f32 = 5.0;
pub const RELEASE_SCALE: f32 = 1.5;
pub const RELEASE_LIFT: f32 = -50.0;
pub const RELEASE_FRICTION: f32 = 3.0;
pub const RELEASE_FADE_SECS: f32 = 0.2;
pub const SPRING_TENSION: f32 = 40.0;
