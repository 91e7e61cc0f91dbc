//! Owns the appendages of one character and ticks them in dependency order.

pub mod appendage;
pub mod hair;
pub mod tail;

pub use appendage::{Appendage, AppendageConfig};
pub use hair::HairRig;
pub use tail::TailRig;

use glam::{Affine2, Vec2};

use crate::error::ConfigError;
use crate::fx::ColorSource;
use crate::host::{AnchorPoints, Facing, HostSnapshot, SimulationContext};
use crate::profile::schema::RigProfile;

/// Anchor points sampled from the host, per appendage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RigAnchors {
    pub hair: AnchorPoints,
    pub tail: AnchorPoints,
}

#[derive(Debug, Clone)]
pub struct Rig {
    id: String,
    hair: Option<HairRig>,
    tail: Option<TailRig>,
}

impl Rig {
    /// Both appendages share the owner's transform at spawn.
    pub fn from_profile(profile: &RigProfile, transform: Affine2, facing: Facing) -> Result<Self, ConfigError> {
        let hair = profile.hair.as_ref().map(|h| HairRig::new(h, transform, facing)).transpose()?;
        let mut tail = profile.tail.as_ref().map(|t| TailRig::new(t, transform, facing)).transpose()?;
        if let (Some(h), Some(t)) = (hair.as_ref(), tail.as_mut()) {
            t.follow(h);
        }
        log::debug!("rig '{}': hair={} tail={}", profile.id, hair.is_some(), tail.is_some());
        Ok(Self { id: profile.id.clone(), hair, tail })
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn hair(&self) -> Option<&HairRig> { self.hair.as_ref() }
    pub fn tail(&self) -> Option<&TailRig> { self.tail.as_ref() }
    pub fn hair_mut(&mut self) -> Option<&mut HairRig> { self.hair.as_mut() }
    pub fn tail_mut(&mut self) -> Option<&mut TailRig> { self.tail.as_mut() }

    /// Hair first, then the tail with the hair as its color master. When the
    /// tail has no master anchor of its own it falls back to the hair origin.
    pub fn advance(&mut self, ctx: &SimulationContext, host: &HostSnapshot, anchors: &RigAnchors) {
        if let Some(hair) = self.hair.as_mut() {
            hair.advance(ctx, host, &anchors.hair);
        }
        if let Some(tail) = self.tail.as_mut() {
            let mut tail_anchors = anchors.tail;
            let master = self.hair.as_ref().map(|h| h as &dyn ColorSource);
            if tail_anchors.master.is_none() {
                tail_anchors.master = self.hair.as_ref().map(|h| h.body().origin());
            }
            tail.advance(ctx, host, &tail_anchors, master);
        }
    }

    /// Teleport: collapse every chain onto `position`.
    pub fn warp(&mut self, position: Vec2) {
        if let Some(h) = self.hair.as_mut() { h.warp(position); }
        if let Some(t) = self.tail.as_mut() { t.warp(position); }
    }

    /// No-op without hair.
    pub fn trigger_refill_effect(&mut self) {
        if let Some(h) = self.hair.as_mut() {
            h.trigger_refill_effect();
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if let Some(h) = self.hair.as_mut() { h.set_enabled(enabled); }
        if let Some(t) = self.tail.as_mut() { t.set_enabled(enabled); }
    }

    pub fn set_transform(&mut self, transform: Affine2) {
        if let Some(h) = self.hair.as_mut() { h.set_transform(transform); }
        if let Some(t) = self.tail.as_mut() { t.set_transform(transform); }
    }
}
