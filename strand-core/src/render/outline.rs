//! Outline pass: every node drawn once, enlarged and solid, behind the fill.

use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::error::{self, ConfigError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineParams {
    /// Added to each node radius, world units.
    pub margin: f32,
    pub color: Color,
}

impl Default for OutlineParams {
    fn default() -> Self {
        Self { margin: 0.125, color: Color::BLACK }
    }
}

impl OutlineParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::non_negative("outline.margin", self.margin)
    }
}
