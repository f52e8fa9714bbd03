//! Card animation: springs, timed fades and the per-card state machine
//!
//! An [`AnimationScript`] is an ordered list of stages. Every stage holds a set
//! of concurrent transitions; the next stage starts only once all transitions of
//! the current one have settled, and the completion callback fires after the
//! last stage.

use crate::constants::*;
use std::collections::VecDeque;
use tracing::debug;

/// Completion callback of a script
pub type OnComplete = Box<dyn FnOnce()>;

/// Longest frame the integrator will advance in one call
const MAX_FRAME_SECS: f32 = 0.064;
/// Fixed integration step for springs
const SPRING_STEP_SECS: f32 = 0.001;
const REST_DISPLACEMENT: f32 = 0.001;
const REST_SPEED: f32 = 0.001;

/// Capability exposed by every rendered card to the gesture coordinator
pub trait ReleaseAnimation {
    /// Play the commit animation and call `on_complete` once it has finished.
    /// Returns false if a release is already playing; `on_complete` is dropped
    /// without being called in that case.
    fn play_release_animation(&mut self, on_complete: OnComplete) -> bool;

    /// Abort a pending release. Its completion callback never fires.
    fn cancel_release(&mut self);
}

/// Animated card properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Scale,
    Lift,
    Opacity,
}

impl Param {
    fn slot(self) -> usize {
        match self {
            Param::Scale => 0,
            Param::Lift => 1,
            Param::Opacity => 2,
        }
    }
}

/// Damped spring with unit mass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub stiffness: f32,
    pub damping: f32,
}

impl Spring {
    /// Spring with the default tension and the given friction
    pub fn with_friction(friction: f32) -> Self {
        Self::from_tension_friction(SPRING_TENSION, friction)
    }

    /// Convert the tension/friction pair into stiffness and damping
    pub fn from_tension_friction(tension: f32, friction: f32) -> Self {
        Self {
            stiffness: (tension - 30.0) * 3.62 + 194.0,
            damping: (friction - 8.0) * 3.0 + 25.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Spring(Spring),
    /// Ease-in-out over a fixed duration in seconds
    Timing { duration: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub param: Param,
    pub to: f32,
    pub motion: Motion,
}

impl Transition {
    pub fn spring(param: Param, to: f32, friction: f32) -> Self {
        Self { param, to, motion: Motion::Spring(Spring::with_friction(friction)) }
    }

    pub fn timing(param: Param, to: f32, duration: f32) -> Self {
        Self { param, to, motion: Motion::Timing { duration } }
    }
}

/// Transitions that run concurrently
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stage {
    pub transitions: Vec<Transition>,
}

impl Stage {
    pub fn parallel(transitions: impl IntoIterator<Item = Transition>) -> Self {
        Self { transitions: transitions.into_iter().collect() }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimationScript {
    pub stages: Vec<Stage>,
}

impl AnimationScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Lift toward the selected pose, or settle back to rest
    pub fn selection(selected: bool) -> Self {
        let (scale, lift) = if selected { (SELECTED_SCALE, SELECTED_LIFT) } else { (1.0, 0.0) };
        Self::new().then(Stage::parallel([
            Transition::spring(Param::Scale, scale, SELECT_FRICTION),
            Transition::spring(Param::Lift, lift, SELECT_FRICTION),
        ]))
    }

    /// Pop out, then fade away
    pub fn release() -> Self {
        Self::new()
            .then(Stage::parallel([
                Transition::spring(Param::Scale, RELEASE_SCALE, RELEASE_FRICTION),
                Transition::spring(Param::Lift, RELEASE_LIFT, RELEASE_FRICTION),
            ]))
            .then(Stage::parallel([Transition::timing(Param::Opacity, 0.0, RELEASE_FADE_SECS)]))
    }
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct AnimatedValue {
    value: f32,
    velocity: f32,
}

struct Track {
    transition: Transition,
    from: f32,
    elapsed: f32,
    done: bool,
}

impl Track {
    /// Advance by `dt`; returns true once settled.
    fn step(&mut self, value: &mut AnimatedValue, dt: f32) -> bool {
        if self.done {
            return true;
        }
        let to = self.transition.to;
        match self.transition.motion {
            Motion::Spring(spring) => {
                let steps = (dt / SPRING_STEP_SECS).ceil().max(1.0) as u32;
                let h = dt / steps as f32;
                for _ in 0..steps {
                    let force = -spring.stiffness * (value.value - to) - spring.damping * value.velocity;
                    value.velocity += force * h;
                    value.value += value.velocity * h;
                }
                if value.velocity.abs() <= REST_SPEED && (value.value - to).abs() <= REST_DISPLACEMENT {
                    value.value = to;
                    value.velocity = 0.0;
                    self.done = true;
                }
            }
            Motion::Timing { duration } => {
                self.elapsed += dt;
                let t = if duration > 0.0 { (self.elapsed / duration).min(1.0) } else { 1.0 };
                value.value = self.from + (to - self.from) * ease_in_out(t);
                value.velocity = 0.0;
                if t >= 1.0 {
                    value.value = to;
                    self.done = true;
                }
            }
        }
        self.done
    }
}

struct Running {
    pending: VecDeque<Stage>,
    active: Vec<Track>,
    on_complete: Option<OnComplete>,
}

/// Visual state read by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardVisual {
    pub scale: f32,
    pub lift: f32,
    pub opacity: f32,
}

impl Default for CardVisual {
    fn default() -> Self {
        Self { scale: 1.0, lift: 0.0, opacity: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Resting,
    Selected,
    Releasing,
}

/// Per-card animation controller
pub struct CardAnimator {
    values: [AnimatedValue; 3],
    state: CardState,
    running: Option<Running>,
}

impl Default for CardAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl CardAnimator {
    pub fn new() -> Self {
        let rest = CardVisual::default();
        Self {
            values: [
                AnimatedValue { value: rest.scale, velocity: 0.0 },
                AnimatedValue { value: rest.lift, velocity: 0.0 },
                AnimatedValue { value: rest.opacity, velocity: 0.0 },
            ],
            state: CardState::Resting,
            running: None,
        }
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn visual(&self) -> CardVisual {
        CardVisual {
            scale: self.values[Param::Scale.slot()].value,
            lift: self.values[Param::Lift.slot()].value,
            opacity: self.values[Param::Opacity.slot()].value,
        }
    }

    /// Follow selection membership. Ignored while a release is playing.
    pub fn set_selected(&mut self, selected: bool) {
        let target = if selected { CardState::Selected } else { CardState::Resting };
        match self.state {
            CardState::Releasing => return,
            current if current == target => return,
            _ => {}
        }
        self.state = target;
        self.run(AnimationScript::selection(selected), None);
    }

    /// Replace whatever is running with `script`. Velocities carry over so an
    /// interrupted spring continues smoothly.
    pub fn run(&mut self, script: AnimationScript, on_complete: Option<OnComplete>) {
        self.running = Some(Running {
            pending: script.stages.into(),
            active: Vec::new(),
            on_complete,
        });
    }

    /// Advance running animations by `dt` seconds. Returns true while animating.
    pub fn tick(&mut self, dt: f32) -> bool {
        let dt = dt.clamp(0.0, MAX_FRAME_SECS);
        let Some(running) = self.running.as_mut() else {
            return false;
        };

        if running.active.iter().all(|track| track.done) {
            match running.pending.pop_front() {
                Some(stage) => {
                    running.active = stage
                        .transitions
                        .into_iter()
                        .map(|transition| Track {
                            transition,
                            from: self.values[transition.param.slot()].value,
                            elapsed: 0.0,
                            done: false,
                        })
                        .collect();
                }
                None => {
                    self.finish();
                    return false;
                }
            }
        }

        let mut settled = true;
        for track in running.active.iter_mut() {
            let slot = track.transition.param.slot();
            settled &= track.step(&mut self.values[slot], dt);
        }

        if settled && running.pending.is_empty() {
            self.finish();
            return false;
        }
        true
    }

    /// End the running script. A finished release puts the card back at rest
    /// before its callback fires, so the next commit can play again.
    fn finish(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };
        if self.state == CardState::Releasing {
            *self = Self::new();
        }
        if let Some(on_complete) = running.on_complete {
            on_complete();
        }
    }
}

impl ReleaseAnimation for CardAnimator {
    fn play_release_animation(&mut self, on_complete: OnComplete) -> bool {
        if self.state == CardState::Releasing {
            debug!("Release already playing, ignoring");
            return false;
        }
        self.state = CardState::Releasing;
        self.run(AnimationScript::release(), Some(on_complete));
        true
    }

    fn cancel_release(&mut self) {
        if self.state != CardState::Releasing {
            return;
        }
        debug!("Release animation cancelled");
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const FRAME: f32 = 1.0 / 60.0;

    fn run_until_idle(animator: &mut CardAnimator, max_secs: f32) -> f32 {
        let mut elapsed = 0.0;
        while animator.tick(FRAME) {
            elapsed += FRAME;
            assert!(elapsed < max_secs, "animation did not settle in {}s", max_secs);
        }
        elapsed
    }

    fn counter() -> (Rc<Cell<u32>>, OnComplete) {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        (count, Box::new(move || inner.set(inner.get() + 1)))
    }

    #[test]
    fn test_spring_parameters() {
        let spring = Spring::with_friction(5.0);
        assert!((spring.stiffness - 230.2).abs() < 1e-3);
        assert!((spring.damping - 16.0).abs() < 1e-3);
        assert!((Spring::with_friction(3.0).damping - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_select_and_deselect() {
        let mut card = CardAnimator::new();
        card.set_selected(true);
        assert_eq!(card.state(), CardState::Selected);
        run_until_idle(&mut card, 5.0);
        assert_eq!(card.visual().scale, SELECTED_SCALE);
        assert_eq!(card.visual().lift, SELECTED_LIFT);

        card.set_selected(false);
        run_until_idle(&mut card, 5.0);
        assert_eq!(card.visual(), CardVisual::default());
        assert_eq!(card.state(), CardState::Resting);
    }

    #[test]
    fn test_selection_is_springy() {
        let mut card = CardAnimator::new();
        card.set_selected(true);
        let mut peak = 1.0_f32;
        while card.tick(FRAME) {
            peak = peak.max(card.visual().scale);
        }
        assert!(peak > SELECTED_SCALE, "underdamped spring should overshoot");
    }

    #[test]
    fn test_release_fires_once_after_fade() {
        let mut card = CardAnimator::new();
        let (count, on_complete) = counter();
        assert!(card.play_release_animation(on_complete));

        let mut faded_before_done = false;
        let mut min_opacity = 1.0_f32;
        while card.tick(FRAME) {
            assert_eq!(count.get(), 0);
            if card.visual().opacity < 1.0 {
                // Fade only starts once the pop-out spring settled
                assert_eq!(card.visual().scale, RELEASE_SCALE);
                faded_before_done = true;
            }
            min_opacity = min_opacity.min(card.visual().opacity);
        }
        assert!(faded_before_done);
        assert!(min_opacity < 0.05, "card should be nearly gone before completing");
        assert_eq!(count.get(), 1);
        assert_eq!(card.state(), CardState::Resting);
        assert_eq!(card.visual(), CardVisual::default());

        for _ in 0..10 {
            card.tick(FRAME);
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_second_release_is_rejected() {
        let mut card = CardAnimator::new();
        let (first, a) = counter();
        let (second, b) = counter();
        assert!(card.play_release_animation(a));
        assert!(!card.play_release_animation(b));
        run_until_idle(&mut card, 10.0);
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
    }

    #[test]
    fn test_release_plays_again_after_completion() {
        let mut card = CardAnimator::new();
        let (first, a) = counter();
        let (second, b) = counter();
        assert!(card.play_release_animation(a));
        run_until_idle(&mut card, 10.0);
        assert_eq!(first.get(), 1);

        assert!(card.play_release_animation(b));
        assert_eq!(card.state(), CardState::Releasing);
        run_until_idle(&mut card, 10.0);
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_selection_ignored_while_releasing() {
        let mut card = CardAnimator::new();
        let (_, on_complete) = counter();
        card.play_release_animation(on_complete);
        card.set_selected(true);
        assert_eq!(card.state(), CardState::Releasing);
    }

    #[test]
    fn test_drop_before_completion_never_fires() {
        let (count, on_complete) = counter();
        {
            let mut card = CardAnimator::new();
            card.play_release_animation(on_complete);
            card.tick(FRAME);
        }
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_cancel_release() {
        let mut card = CardAnimator::new();
        let (count, on_complete) = counter();
        card.play_release_animation(on_complete);
        card.tick(FRAME);
        card.cancel_release();
        assert!(!card.tick(FRAME));
        assert_eq!(count.get(), 0);
        assert_eq!(card.state(), CardState::Resting);
        assert_eq!(card.visual(), CardVisual::default());
    }

    #[test]
    fn test_timing_stage_duration() {
        let mut card = CardAnimator::new();
        let script = AnimationScript::new()
            .then(Stage::parallel([Transition::timing(Param::Opacity, 0.0, 0.2)]));
        card.run(script, None);
        let elapsed = run_until_idle(&mut card, 1.0);
        assert!(elapsed >= 0.18 && elapsed <= 0.25, "fade took {}s", elapsed);
    }
}
