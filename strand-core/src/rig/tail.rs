use glam::{Affine2, Vec2};

use super::appendage::{Appendage, AppendageConfig};
use crate::error::ConfigError;
use crate::fx::{ColorSource, Darken};
use crate::host::{AnchorPoints, Facing, HostSnapshot, SimulationContext};
use crate::profile::schema::TailProfile;
use crate::render::{Color, RibbonMesh};
use crate::secondary::TailMotion;

/// Tail: a chain that borrows its color from a master appendage.
#[derive(Debug, Clone)]
pub struct TailRig {
    body: Appendage<TailMotion>,
    fallback_color: Color,
    darken: Darken,
    warned_no_master: bool,
}

impl TailRig {
    pub fn new(profile: &TailProfile, transform: Affine2, facing: Facing) -> Result<Self, ConfigError> {
        profile.validate()?;
        let config = AppendageConfig {
            chain: profile.chain,
            anchor: profile.anchor,
            squash: profile.squash,
            ribbon: profile.ribbon,
            outline: profile.outline,
        };
        let mut body = Appendage::new("tail", &config, profile.motion, transform, facing)?;
        body.set_fill(profile.darken.apply(profile.fallback_color));
        Ok(Self {
            body,
            fallback_color: profile.fallback_color,
            darken: profile.darken,
            warned_no_master: false,
        })
    }

    /// Seed the fill from `master` so a rebuild before the first tick
    /// already matches it.
    pub fn follow(&mut self, master: &dyn ColorSource) {
        self.body.set_fill(self.darken.apply(master.current_color()));
    }

    /// Authored-space color for this tick, before color space conversion.
    pub fn color(&mut self, master: Option<&dyn ColorSource>) -> Color {
        let base = match master {
            Some(m) => m.current_color(),
            None => {
                if !self.warned_no_master {
                    log::warn!("tail: no master color source, using fallback {}", self.fallback_color.to_hex());
                    self.warned_no_master = true;
                }
                self.fallback_color
            }
        };
        self.darken.apply(base)
    }

    pub fn advance(
        &mut self,
        ctx: &SimulationContext,
        host: &HostSnapshot,
        anchors: &AnchorPoints,
        master: Option<&dyn ColorSource>,
    ) -> bool {
        let fill = self.color(master).for_space(ctx.color_space);
        self.body.advance(ctx, host, anchors, fill, 1.0)
    }

    pub fn warp(&mut self, position: Vec2) { self.body.warp(position); }
    pub fn set_enabled(&mut self, enabled: bool) { self.body.set_enabled(enabled); }
    pub fn set_transform(&mut self, transform: Affine2) { self.body.set_transform(transform); }

    pub fn body(&self) -> &Appendage<TailMotion> { &self.body }
    pub fn mesh(&self) -> &RibbonMesh { self.body.mesh() }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Color);

    impl ColorSource for Fixed {
        fn current_color(&self) -> Color { self.0 }
    }

    fn rig() -> TailRig {
        TailRig::new(&TailProfile::default(), Affine2::IDENTITY, Facing::Right).unwrap()
    }

    #[test]
    fn darkens_the_master_color() {
        let mut t = rig();
        let master = Fixed(Color::rgba(1.0, 0.5, 0.2, 1.0));
        let c = t.color(Some(&master));
        assert!((c.r - 0.85).abs() < 1e-6);
        assert!((c.g - 0.425).abs() < 1e-6);
        assert!((c.b - 0.17).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn falls_back_without_master() {
        let mut t = rig();
        let c = t.color(None);
        assert!((c.r - 0.85).abs() < 1e-6);
        assert!(t.warned_no_master);
    }

    #[test]
    fn undarkened_tail_matches_master() {
        let profile = TailProfile { darken: Darken { enabled: false, ..Default::default() }, ..Default::default() };
        let mut t = TailRig::new(&profile, Affine2::IDENTITY, Facing::Right).unwrap();
        let master = Fixed(Color::from_rgba8(10, 20, 30, 255));
        assert_eq!(t.color(Some(&master)), master.0);
    }

    #[test]
    fn warp_before_first_tick_uses_darkened_colors() {
        let mut t = rig();
        t.warp(Vec2::ZERO);
        let m = t.mesh();
        assert_eq!(m.vertices[m.vertices.len() - 1].color, Color::WHITE.scale_rgb(0.85).to_array());

        let master = Fixed(Color::rgba(0.4, 0.6, 0.8, 1.0));
        t.follow(&master);
        t.warp(Vec2::ONE);
        let m = t.mesh();
        assert_eq!(m.vertices[m.vertices.len() - 1].color, master.0.scale_rgb(0.85).to_array());
    }

    #[test]
    fn idle_tail_curls_up_and_back() {
        let mut t = rig();
        let mut ctx = SimulationContext::default();
        let host = HostSnapshot::default();
        for _ in 0..300 {
            t.advance(&ctx, &host, &AnchorPoints::default(), None);
            ctx = ctx.next();
        }
        let nodes = t.body().chain().nodes();
        let tip = nodes[nodes.len() - 1];
        assert!(tip.y > 0.0, "tip {:?}", tip);
        assert!(tip.x < 0.0, "tip {:?}", tip);
    }
}
