use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::fx::{Darken, HairPalette};
use crate::render::{Color, OutlineParams, RibbonParams};
use crate::secondary::{AnchorResolver, ChainParams, HairMotion, PulseParams, SquashParams, TailMotion};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigProfile {
    pub id: String,
    #[serde(default)]
    pub hair: Option<HairProfile>,
    #[serde(default)]
    pub tail: Option<TailProfile>,
}

impl RigProfile {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(h) = &self.hair { h.validate()?; }
        if let Some(t) = &self.tail { t.validate()?; }
        Ok(())
    }
}

impl Default for RigProfile {
    fn default() -> Self {
        Self { id: "default".into(), hair: Some(HairProfile::default()), tail: Some(TailProfile::default()) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HairProfile {
    pub chain: ChainParams,
    pub anchor: AnchorResolver,
    pub motion: HairMotion,
    pub squash: SquashParams,
    pub ribbon: RibbonParams,
    pub outline: OutlineParams,
    pub palette: HairPalette,
    pub refill: PulseParams,
}

impl HairProfile {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chain.validate()?;
        self.motion.validate()?;
        self.squash.validate()?;
        self.ribbon.validate()?;
        self.outline.validate()?;
        self.palette.validate()?;
        self.refill.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailProfile {
    pub chain: ChainParams,
    pub anchor: AnchorResolver,
    pub motion: TailMotion,
    pub squash: SquashParams,
    pub ribbon: RibbonParams,
    pub outline: OutlineParams,
    /// Used when no hair is there to follow.
    pub fallback_color: Color,
    pub darken: Darken,
}

impl Default for TailProfile {
    fn default() -> Self {
        Self {
            chain: ChainParams { segment_count: 8, node_distance: 0.15, follow_rate: 15.0 },
            anchor: AnchorResolver::default(),
            motion: TailMotion::default(),
            squash: SquashParams { crouch_ratio: 0.7, speed: 15.0, x_compensation: 0.3 },
            ribbon: RibbonParams { base_radius: 0.25, radius_decay: 0.95, min_radius: 0.05, stretch: None },
            outline: OutlineParams::default(),
            fallback_color: Color::WHITE,
            darken: Darken::default(),
        }
    }
}

impl TailProfile {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chain.validate()?;
        self.motion.validate()?;
        self.squash.validate()?;
        self.ribbon.validate()?;
        self.outline.validate()?;
        self.darken.validate()?;
        Ok(())
    }
}
