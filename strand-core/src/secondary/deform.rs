use serde::{Deserialize, Serialize};

use crate::error::{self, ConfigError};
use crate::host::{ease_factor, move_towards};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquashParams {
    /// Vertical scale reached while crouching.
    pub crouch_ratio: f32,
    /// Smoothing rate toward the target, in 1/s.
    pub speed: f32,
    /// Share of the lost height given back as width.
    pub x_compensation: f32,
}

impl Default for SquashParams {
    fn default() -> Self { Self { crouch_ratio: 0.6, speed: 15.0, x_compensation: 0.5 } }
}

impl SquashParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::in_range("squash.crouch_ratio", self.crouch_ratio, 0.0, 1.0)?;
        error::non_negative("squash.speed", self.speed)?;
        error::non_negative("squash.x_compensation", self.x_compensation)?;
        Ok(())
    }
}

/// Smoothed crouch compression, 1 at rest.
#[derive(Debug, Clone, Copy)]
pub struct Squash {
    params: SquashParams,
    current: f32,
}

impl Squash {
    pub fn new(params: SquashParams) -> Self { Self { params, current: 1.0 } }

    pub fn update(&mut self, crouching: bool, dt: f32) -> f32 {
        let target = if crouching { self.params.crouch_ratio } else { 1.0 };
        self.current += (target - self.current) * ease_factor(self.params.speed, dt);
        self.current
    }

    pub fn value(&self) -> f32 { self.current }
    pub fn x_compensation(&self) -> f32 { self.params.x_compensation }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseParams {
    /// Radius multiplier right after a refill.
    pub peak: f32,
    /// Pulse decay toward 1, per second.
    pub pulse_decay: f32,
    /// Flash weight decay toward 0, per second.
    pub flash_decay: f32,
}

impl Default for PulseParams {
    fn default() -> Self { Self { peak: 1.35, pulse_decay: 4.0, flash_decay: 5.0 } }
}

impl PulseParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::in_range("refill.peak", self.peak, 1.0, f32::MAX)?;
        error::positive("refill.pulse_decay", self.pulse_decay)?;
        error::positive("refill.flash_decay", self.flash_decay)?;
        Ok(())
    }
}

/// Refill burst: a radius pulse and a color flash, both decaying linearly to
/// their rest values and staying there.
#[derive(Debug, Clone, Copy)]
pub struct RefillPulse {
    params: PulseParams,
    pulse: f32,
    flash: f32,
}

impl RefillPulse {
    pub fn new(params: PulseParams) -> Self { Self { params, pulse: 1.0, flash: 0.0 } }

    pub fn trigger(&mut self) {
        self.pulse = self.params.peak;
        self.flash = 1.0;
    }

    pub fn update(&mut self, dt: f32) {
        if self.flash > 0.0 {
            self.flash = move_towards(self.flash, 0.0, dt * self.params.flash_decay);
        }
        if self.pulse > 1.0 {
            self.pulse = move_towards(self.pulse, 1.0, dt * self.params.pulse_decay);
        }
    }

    pub fn pulse(&self) -> f32 { self.pulse }
    pub fn flash_weight(&self) -> f32 { self.flash }
    pub fn is_resting(&self) -> bool { self.pulse == 1.0 && self.flash == 0.0 }
}
