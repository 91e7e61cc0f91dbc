//! What the character controller hands the appendages each tick.
//!
//! Everything here is a plain value sampled after the host's own update; the
//! appendages never hold on to it across ticks.

use glam::Vec2;

use crate::render::color::ColorSpace;

/// Horizontal facing of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn from_sign(sign: f32) -> Self {
        if sign < 0.0 { Facing::Left } else { Facing::Right }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// World-space reference points an appendage may pin its root to.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnchorPoints {
    pub right: Option<Vec2>,
    pub left: Option<Vec2>,
    /// Position of the appendage whose color this one follows, if any.
    pub master: Option<Vec2>,
    pub visuals_root: Option<Vec2>,
}

impl AnchorPoints {
    pub fn directional(right: Vec2, left: Vec2) -> Self {
        Self { right: Some(right), left: Some(left), ..Default::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostSnapshot {
    pub facing: Facing,
    pub crouching: bool,
    pub dashing: bool,
    pub dead: bool,
    /// Hidden hosts get no geometry.
    pub visible: bool,
    pub stamina: f32,
    pub tired_threshold: f32,
    pub can_dash: bool,
    /// Dash charges left; two or more selects the "double" hair color.
    pub dash_charges: u8,
    pub golden: bool,
    pub velocity: Vec2,
    /// Local scale of the host's visual root.
    pub visual_scale: Vec2,
}

impl Default for HostSnapshot {
    fn default() -> Self {
        Self {
            facing: Facing::Right,
            crouching: false,
            dashing: false,
            dead: false,
            visible: true,
            stamina: 110.0,
            tired_threshold: 20.0,
            can_dash: true,
            dash_charges: 1,
            golden: false,
            velocity: Vec2::ZERO,
            visual_scale: Vec2::ONE,
        }
    }
}

impl HostSnapshot {
    pub fn is_tired(&self) -> bool {
        self.stamina < self.tired_threshold
    }

    /// Mean of the visual root's X/Y scale, used to keep chain thickness in
    /// step with squash-and-stretch applied to the body sprite.
    pub fn scale_correction(&self) -> f32 {
        (self.visual_scale.x + self.visual_scale.y) * 0.5
    }
}

/// Per-tick inputs that used to come from engine globals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationContext {
    pub dt: f32,
    /// Monotonic time in seconds, drives wave and blink phases.
    pub time: f32,
    pub color_space: ColorSpace,
}

impl SimulationContext {
    pub fn new(dt: f32, time: f32, color_space: ColorSpace) -> Self {
        Self { dt, time, color_space }
    }

    /// The context for the tick after this one.
    pub fn next(self) -> Self {
        Self { time: self.time + self.dt, ..self }
    }
}

impl Default for SimulationContext {
    fn default() -> Self {
        Self { dt: 1.0 / 60.0, time: 0.0, color_space: ColorSpace::Gamma }
    }
}

/// `1 - exp(-rate * dt)`: frame-rate independent smoothing weight.
pub fn ease_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

/// Move `current` toward `target` by at most `max_delta`.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}
