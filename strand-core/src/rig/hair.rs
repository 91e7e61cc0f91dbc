use glam::{Affine2, Vec2};

use super::appendage::{Appendage, AppendageConfig};
use crate::error::ConfigError;
use crate::fx::{sync_accessories, ColorSource, ColorState, HairPalette, TintTarget};
use crate::host::{AnchorPoints, Facing, HostSnapshot, SimulationContext};
use crate::profile::schema::HairProfile;
use crate::render::{Color, RibbonMesh};
use crate::secondary::{HairMotion, RefillPulse};

/// Hair: a chain with state-driven color and the refill pulse.
#[derive(Debug, Clone)]
pub struct HairRig {
    body: Appendage<HairMotion>,
    palette: HairPalette,
    color: ColorState,
    refill: RefillPulse,
}

impl HairRig {
    pub fn new(profile: &HairProfile, transform: Affine2, facing: Facing) -> Result<Self, ConfigError> {
        profile.validate()?;
        let config = AppendageConfig {
            chain: profile.chain,
            anchor: profile.anchor,
            squash: profile.squash,
            ribbon: profile.ribbon,
            outline: profile.outline,
        };
        let mut body = Appendage::new("hair", &config, profile.motion, transform, facing)?;
        body.set_fill(profile.palette.normal);
        Ok(Self {
            body,
            palette: profile.palette,
            color: ColorState::new(profile.palette.normal),
            refill: RefillPulse::new(profile.refill),
        })
    }

    /// Color and refill only run on ticks that produce geometry.
    pub fn advance(&mut self, ctx: &SimulationContext, host: &HostSnapshot, anchors: &AnchorPoints) -> bool {
        if self.body.is_enabled() && host.visible {
            let target = self.palette.target(host, ctx.time);
            self.color.update(target, self.palette.lerp_rate, ctx.dt, self.refill.flash_weight(), self.palette.refill);
            self.refill.update(ctx.dt);
        }
        let fill = self.color.current().for_space(ctx.color_space);
        self.body.advance(ctx, host, anchors, fill, self.refill.pulse())
    }

    /// Start the dash-refill pulse and flash.
    pub fn trigger_refill_effect(&mut self) {
        self.refill.trigger();
        log::debug!("hair: refill effect triggered");
    }

    /// Push the displayed color onto dependent sprites.
    pub fn sync_accessories<T: TintTarget>(&self, ctx: &SimulationContext, targets: &mut [T]) {
        sync_accessories(self.color.current(), ctx.color_space, targets);
    }

    pub fn warp(&mut self, position: Vec2) { self.body.warp(position); }
    pub fn set_enabled(&mut self, enabled: bool) { self.body.set_enabled(enabled); }
    pub fn set_transform(&mut self, transform: Affine2) { self.body.set_transform(transform); }

    pub fn body(&self) -> &Appendage<HairMotion> { &self.body }
    pub fn mesh(&self) -> &RibbonMesh { self.body.mesh() }
    pub fn palette(&self) -> &HairPalette { &self.palette }
    pub fn flash_weight(&self) -> f32 { self.refill.flash_weight() }
}

impl ColorSource for HairRig {
    fn current_color(&self) -> Color { self.color.current() }

    fn pulse_scale(&self) -> f32 { self.refill.pulse() }
}
