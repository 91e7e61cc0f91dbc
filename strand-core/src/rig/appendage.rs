use glam::{Affine2, Vec2};

use crate::error::ConfigError;
use crate::host::{AnchorPoints, Facing, HostSnapshot, SimulationContext};
use crate::render::{Color, OutlineParams, RibbonBuilder, RibbonFrame, RibbonMesh, RibbonParams};
use crate::secondary::{AnchorResolver, Chain, ChainParams, Motion, Squash, SquashParams};

/// Shared tuning of one appendage, whatever its motion model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppendageConfig {
    pub chain: ChainParams,
    pub anchor: AnchorResolver,
    pub squash: SquashParams,
    pub ribbon: RibbonParams,
    pub outline: OutlineParams,
}

impl AppendageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chain.validate()?;
        self.squash.validate()?;
        self.ribbon.validate()?;
        self.outline.validate()
    }
}

/// Per-tick look inputs that the generic part does not own.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Look {
    fill: Color,
    pulse: f32,
    scale_correction: f32,
}

/// One trailing chain with its deformation and mesh, generic over how its
/// nodes are pushed around.
#[derive(Debug, Clone)]
pub struct Appendage<M: Motion> {
    name: &'static str,
    motion: M,
    anchor: AnchorResolver,
    chain: Chain,
    squash: Squash,
    builder: RibbonBuilder,
    mesh: RibbonMesh,
    transform: Affine2,
    look: Look,
    enabled: bool,
    active: bool,
}

impl<M: Motion> Appendage<M> {
    /// All nodes start at the translation of `transform`, the owner's
    /// world transform.
    pub fn new(
        name: &'static str,
        config: &AppendageConfig,
        motion: M,
        transform: Affine2,
        facing: Facing,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let chain = Chain::new(config.chain, transform.translation, facing)?;
        Ok(Self {
            name,
            motion,
            anchor: config.anchor,
            chain,
            squash: Squash::new(config.squash),
            builder: RibbonBuilder::new(config.ribbon, config.outline),
            mesh: RibbonMesh::with_quad_capacity(config.chain.segment_count * 2),
            transform,
            look: Look { fill: Color::WHITE, pulse: 1.0, scale_correction: 1.0 },
            enabled: true,
            active: true,
        })
    }

    pub fn name(&self) -> &'static str { self.name }
    pub fn chain(&self) -> &Chain { &self.chain }
    pub fn mesh(&self) -> &RibbonMesh { &self.mesh }
    pub fn motion(&self) -> &M { &self.motion }
    pub fn squash(&self) -> f32 { self.squash.value() }
    pub fn transform(&self) -> Affine2 { self.transform }
    /// World position of the owner.
    pub fn origin(&self) -> Vec2 { self.transform.translation }
    pub fn is_enabled(&self) -> bool { self.enabled }
    /// Whether the last tick produced geometry.
    pub fn is_active(&self) -> bool { self.active }

    pub fn set_transform(&mut self, transform: Affine2) { self.transform = transform; }

    /// Fill used by rebuilds that happen outside `advance`, such as a warp
    /// before the first tick.
    pub fn set_fill(&mut self, fill: Color) { self.look.fill = fill; }

    /// Disabling clears geometry right away; re-enabling resumes on the next
    /// tick.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            self.deactivate();
        }
        log::debug!("{}: {}", self.name, if enabled { "enabled" } else { "disabled" });
    }

    pub fn resolve_anchor(&self, host: &HostSnapshot, anchors: &AnchorPoints) -> Vec2 {
        self.anchor.resolve(host.facing, anchors, self.origin())
    }

    /// Run one tick. Returns false, with the mesh cleared, when disabled or
    /// when the host is hidden.
    pub fn advance(
        &mut self,
        ctx: &SimulationContext,
        host: &HostSnapshot,
        anchors: &AnchorPoints,
        fill: Color,
        pulse: f32,
    ) -> bool {
        if !self.enabled || !host.visible {
            self.deactivate();
            return false;
        }
        self.active = true;
        self.squash.update(host.crouching, ctx.dt);
        let anchor = self.resolve_anchor(host, anchors);
        self.chain.step(anchor, &self.motion, ctx, host);
        self.look = Look { fill, pulse, scale_correction: host.scale_correction() };
        self.rebuild();
        true
    }

    /// Collapse the chain onto `position` and rebuild the mesh immediately
    /// with the last look.
    pub fn warp(&mut self, position: Vec2) {
        self.chain.warp(position);
        log::debug!("{}: warped to {:?}", self.name, position);
        if self.enabled && self.active {
            self.rebuild();
        }
    }

    pub fn rebuild(&mut self) {
        let frame = RibbonFrame {
            nodes: self.chain.nodes(),
            node_distance: self.chain.node_distance(),
            squash: self.squash.value(),
            x_compensation: self.squash.x_compensation(),
            pulse: self.look.pulse,
            scale_correction: self.look.scale_correction,
            fill: self.look.fill,
            world_to_local: self.transform.inverse(),
        };
        self.builder.build(&frame, &mut self.mesh);
    }

    fn deactivate(&mut self) {
        if self.active {
            self.mesh.clear();
            self.active = false;
            log::debug!("{}: inactive, geometry cleared", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secondary::TailMotion;

    fn config(segments: usize) -> AppendageConfig {
        AppendageConfig {
            chain: ChainParams { segment_count: segments, node_distance: 0.15, follow_rate: 15.0 },
            anchor: AnchorResolver::default(),
            squash: SquashParams::default(),
            ribbon: RibbonParams::default(),
            outline: OutlineParams::default(),
        }
    }

    fn appendage(segments: usize) -> Appendage<TailMotion> {
        Appendage::new("test", &config(segments), TailMotion::default(), Affine2::IDENTITY, Facing::Right).unwrap()
    }

    #[test]
    fn hidden_host_clears_geometry_then_resumes() {
        let mut a = appendage(4);
        let ctx = SimulationContext::default();
        let anchors = AnchorPoints::default();
        assert!(a.advance(&ctx, &HostSnapshot::default(), &anchors, Color::WHITE, 1.0));
        assert_eq!(a.mesh().quad_count(), 8);
        let hidden = HostSnapshot { visible: false, ..Default::default() };
        assert!(!a.advance(&ctx, &hidden, &anchors, Color::WHITE, 1.0));
        assert!(a.mesh().is_empty());
        assert!(a.advance(&ctx, &HostSnapshot::default(), &anchors, Color::WHITE, 1.0));
        assert_eq!(a.mesh().quad_count(), 8);
    }

    #[test]
    fn disabling_clears_immediately() {
        let mut a = appendage(3);
        a.advance(&SimulationContext::default(), &HostSnapshot::default(), &AnchorPoints::default(), Color::WHITE, 1.0);
        a.set_enabled(false);
        assert!(a.mesh().is_empty());
        assert!(!a.advance(&SimulationContext::default(), &HostSnapshot::default(), &AnchorPoints::default(), Color::WHITE, 1.0));
        assert!(a.mesh().is_empty());
    }

    #[test]
    fn warp_rebuilds_a_collapsed_mesh() {
        let mut a = appendage(5);
        let mut ctx = SimulationContext::default();
        let anchors = AnchorPoints::directional(Vec2::new(1.0, 1.0), Vec2::new(-1.0, 1.0));
        for _ in 0..30 {
            a.advance(&ctx, &HostSnapshot::default(), &anchors, Color::WHITE, 1.0);
            ctx = ctx.next();
        }
        let p = Vec2::new(20.0, -3.0);
        a.warp(p);
        assert!(a.chain().nodes().iter().all(|n| *n == p));
        for q in 0..a.mesh().quad_count() {
            assert!(a.mesh().quad_center(q).unwrap().abs_diff_eq(p, 1e-4));
        }
    }

    #[test]
    fn zero_segments_is_an_empty_mesh() {
        let mut a = appendage(0);
        assert!(a.advance(&SimulationContext::default(), &HostSnapshot::default(), &AnchorPoints::default(), Color::WHITE, 1.0));
        assert_eq!(a.mesh().vertices.len(), 0);
        assert_eq!(a.mesh().triangle_count(), 0);
    }

    #[test]
    fn owner_position_is_the_last_resort_anchor() {
        let owner = Affine2::from_translation(Vec2::new(4.0, 2.0));
        let mut a = Appendage::new("t", &config(3), TailMotion::default(), owner, Facing::Right).unwrap();
        a.advance(&SimulationContext::default(), &HostSnapshot::default(), &AnchorPoints::default(), Color::WHITE, 1.0);
        assert_eq!(a.chain().nodes()[0], Vec2::new(4.0, 2.0));
        // Mesh is local to the owner.
        assert!(a.mesh().quad_center(3).unwrap().abs_diff_eq(Vec2::ZERO, 1e-5));
    }

    #[test]
    fn warp_before_first_tick_uses_seeded_fill() {
        let mut a = appendage(3);
        let seed = Color::from_rgba8(10, 200, 30, 255);
        a.set_fill(seed);
        a.warp(Vec2::new(1.0, 1.0));
        assert_eq!(a.mesh().quad_count(), 6);
        let m = a.mesh();
        assert!(m.vertices[12..].iter().all(|v| v.color == seed.to_array()));
        assert!(m.vertices[..12].iter().all(|v| v.color == Color::BLACK.to_array()));
    }
}
