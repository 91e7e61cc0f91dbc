//! Hair color selection: a strict priority over host states picks the target,
//! the displayed color eases toward it, and a refill flash overlays it.

use serde::{Deserialize, Serialize};

use crate::error::{self, ConfigError};
use crate::host::{ease_factor, HostSnapshot};
use crate::render::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HairPalette {
    /// Dash available.
    pub normal: Color,
    /// Dash spent.
    pub used: Color,
    /// Two or more dash charges.
    pub double: Color,
    pub dash: Color,
    pub golden: Color,
    pub dead: Color,
    /// Overlay shown right after a refill.
    pub refill: Color,
    /// Easing rate of the displayed color, in 1/s.
    pub lerp_rate: f32,
    /// Period of the low-stamina warning blink, in seconds.
    pub blink_period: f32,
}

impl Default for HairPalette {
    fn default() -> Self {
        Self {
            normal: Color::from_rgba8(158, 132, 133, 255),
            used: Color::from_rgba8(158, 158, 158, 255),
            double: Color::from_rgba8(158, 90, 126, 255),
            dash: Color::from_rgba8(158, 41, 41, 255),
            golden: Color::from_rgba8(168, 144, 81, 255),
            dead: Color::from_rgba8(133, 133, 133, 255),
            refill: Color::from_rgba8(126, 173, 189, 255),
            lerp_rate: 15.0,
            blink_period: 0.2,
        }
    }
}

impl HairPalette {
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::non_negative("palette.lerp_rate", self.lerp_rate)?;
        error::positive("palette.blink_period", self.blink_period)?;
        Ok(())
    }

    /// First match wins: dead, dashing, tired blink, dash ready, spent.
    pub fn target(&self, host: &HostSnapshot, time: f32) -> Color {
        if host.dead {
            return self.dead;
        }
        if host.dashing {
            return self.dash;
        }
        if host.is_tired() {
            return if self.blink_on(time) { self.dash } else { self.used };
        }
        if host.can_dash {
            return self.ready(host);
        }
        self.used
    }

    fn ready(&self, host: &HostSnapshot) -> Color {
        if host.golden {
            self.golden
        } else if host.dash_charges >= 2 {
            self.double
        } else {
            self.normal
        }
    }

    /// First half of every period.
    pub fn blink_on(&self, time: f32) -> bool {
        time.rem_euclid(self.blink_period) < self.blink_period * 0.5
    }
}

/// Flash weights at or below this no longer tint the hair.
pub const FLASH_VISIBLE: f32 = 0.01;

/// The displayed hair color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorState {
    current: Color,
}

impl ColorState {
    pub fn new(initial: Color) -> Self { Self { current: initial } }

    pub fn current(&self) -> Color { self.current }

    /// Ease toward `target`, then pull toward `refill` by `flash` while the
    /// flash is still visible.
    pub fn update(&mut self, target: Color, rate: f32, dt: f32, flash: f32, refill: Color) -> Color {
        self.current = self.current.lerp(target, ease_factor(rate, dt));
        if flash > FLASH_VISIBLE {
            self.current = self.current.lerp(refill, flash);
        }
        self.current
    }
}
