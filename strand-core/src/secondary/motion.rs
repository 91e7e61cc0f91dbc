//! Per-appendage force models fed to [`Chain::step`](super::Chain::step).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{self, ConfigError};
use crate::host::{HostSnapshot, SimulationContext};

/// Force hook of a chain. Node 0 is never asked for.
pub trait Motion {
    /// Follow rate to use this tick, given the configured base rate.
    fn follow_rate(&self, base: f32, _host: &HostSnapshot) -> f32 { base }

    /// Force pulling node `index` (1..count) away from its predecessor.
    fn force(&self, index: usize, count: usize, ctx: &SimulationContext, host: &HostSnapshot) -> Vec2;
}

/// Idle jitter travelling down the hair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wave {
    pub frequency: f32,
    pub amplitude: f32,
    /// Phase offset between neighbouring nodes, in radians.
    pub phase_step: f32,
    /// Amplitude to force conversion.
    pub gain: f32,
}

impl Default for Wave {
    fn default() -> Self { Self { frequency: 6.0, amplitude: 0.06, phase_step: 0.8, gain: 50.0 } }
}

impl Wave {
    pub fn sample(&self, index: usize, count: usize, time: f32) -> f32 {
        let along = index as f32 / count as f32;
        (time * self.frequency + index as f32 * self.phase_step).sin() * self.amplitude * along * self.gain
    }
}

/// Slower, heavier hair once the host is dead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeadProfile {
    pub follow_rate: f32,
    pub drag: f32,
    pub gravity: f32,
}

impl Default for DeadProfile {
    fn default() -> Self { Self { follow_rate: 5.0, drag: 1.0, gravity: 25.0 } }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HairMotion {
    pub gravity: f32,
    /// Horizontal pull opposite to facing.
    pub drag: f32,
    pub wave: Wave,
    pub dead: DeadProfile,
}

impl Default for HairMotion {
    fn default() -> Self {
        Self { gravity: 12.0, drag: 4.0, wave: Wave::default(), dead: DeadProfile::default() }
    }
}

impl HairMotion {
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::finite("hair.gravity", self.gravity)?;
        error::finite("hair.drag", self.drag)?;
        error::finite("hair.wave.frequency", self.wave.frequency)?;
        error::finite("hair.wave.amplitude", self.wave.amplitude)?;
        error::finite("hair.wave.phase_step", self.wave.phase_step)?;
        error::finite("hair.wave.gain", self.wave.gain)?;
        error::non_negative("hair.dead.follow_rate", self.dead.follow_rate)?;
        error::finite("hair.dead.drag", self.dead.drag)?;
        error::finite("hair.dead.gravity", self.dead.gravity)?;
        Ok(())
    }
}

impl Motion for HairMotion {
    fn follow_rate(&self, base: f32, host: &HostSnapshot) -> f32 {
        if host.dead { self.dead.follow_rate } else { base }
    }

    fn force(&self, index: usize, count: usize, ctx: &SimulationContext, host: &HostSnapshot) -> Vec2 {
        let (drag, gravity) = if host.dead {
            (self.dead.drag, self.dead.gravity)
        } else {
            (self.drag, self.gravity)
        };
        let mut force = Vec2::new(-host.facing.sign() * drag, -gravity);
        force.y += self.wave.sample(index, count, ctx.time);
        force
    }
}

/// Lazy idle curl of the tail while the host stands still.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sway {
    /// Lift multiplier at the root; reduced by `lift_step` per node.
    pub lift_base: f32,
    pub lift_step: f32,
    pub y_frequency: f32,
    pub y_amplitude: f32,
    pub x_frequency: f32,
    pub x_amplitude: f32,
}

impl Default for Sway {
    fn default() -> Self {
        Self { lift_base: 1.2, lift_step: 0.1, y_frequency: 2.0, y_amplitude: 1.5, x_frequency: 1.5, x_amplitude: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailMotion {
    pub gravity: f32,
    pub drag: f32,
    /// Upward curl while idle.
    pub idle_lift: f32,
    /// Backward spread while idle.
    pub idle_spread: f32,
    /// Speed on either axis above which the host counts as moving.
    pub moving_threshold: f32,
    pub sway: Sway,
}

impl Default for TailMotion {
    fn default() -> Self {
        Self { gravity: 5.0, drag: 4.0, idle_lift: 15.0, idle_spread: 5.0, moving_threshold: 0.1, sway: Sway::default() }
    }
}

impl TailMotion {
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::finite("tail.gravity", self.gravity)?;
        error::finite("tail.drag", self.drag)?;
        error::finite("tail.idle_lift", self.idle_lift)?;
        error::finite("tail.idle_spread", self.idle_spread)?;
        error::non_negative("tail.moving_threshold", self.moving_threshold)?;
        for (field, v) in [
            ("tail.sway.lift_base", self.sway.lift_base),
            ("tail.sway.lift_step", self.sway.lift_step),
            ("tail.sway.y_frequency", self.sway.y_frequency),
            ("tail.sway.y_amplitude", self.sway.y_amplitude),
            ("tail.sway.x_frequency", self.sway.x_frequency),
            ("tail.sway.x_amplitude", self.sway.x_amplitude),
        ] {
            error::finite(field, v)?;
        }
        Ok(())
    }

    pub fn is_moving(&self, host: &HostSnapshot) -> bool {
        host.velocity.x.abs() > self.moving_threshold || host.velocity.y.abs() > self.moving_threshold
    }
}

impl Motion for TailMotion {
    fn force(&self, index: usize, _count: usize, ctx: &SimulationContext, host: &HostSnapshot) -> Vec2 {
        let back = -host.facing.sign();
        if self.is_moving(host) {
            return Vec2::new(back * self.drag, -self.gravity);
        }
        let i = index as f32;
        let s = &self.sway;
        Vec2::new(
            back * self.idle_spread + (ctx.time * s.x_frequency + i).cos() * s.x_amplitude,
            self.idle_lift * (s.lift_base - i * s.lift_step) + (ctx.time * s.y_frequency + i).sin() * s.y_amplitude,
        )
    }
}
