//! Turns a node chain into the two-pass ribbon mesh: a solid outline layer
//! first, then the colored fill, one quad per node in each pass.

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::mesh::RibbonMesh;
use super::outline::OutlineParams;
use crate::error::{self, ConfigError};

/// Widens fast-moving segments and thins them vertically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StretchParams {
    /// How much of the segment's over/under length turns into width.
    pub strength: f32,
    /// Weight of the stretch in the height divisor `s * bias + (1 - bias)`.
    pub bias: f32,
}

impl Default for StretchParams {
    fn default() -> Self { Self { strength: 0.35, bias: 0.7 } }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonParams {
    pub base_radius: f32,
    /// Per-node taper; node i gets `base_radius * radius_decay^i`.
    pub radius_decay: f32,
    pub min_radius: f32,
    pub stretch: Option<StretchParams>,
}

impl Default for RibbonParams {
    fn default() -> Self {
        Self { base_radius: 0.45, radius_decay: 0.65, min_radius: 0.05, stretch: Some(StretchParams::default()) }
    }
}

impl RibbonParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::non_negative("ribbon.base_radius", self.base_radius)?;
        error::in_range("ribbon.radius_decay", self.radius_decay, 0.0, 1.0)?;
        error::non_negative("ribbon.min_radius", self.min_radius)?;
        if let Some(s) = &self.stretch {
            // Keeps the stretch factor and the height divisor positive.
            error::in_range("ribbon.stretch.strength", s.strength, 0.0, 0.9)?;
            error::in_range("ribbon.stretch.bias", s.bias, 0.0, 1.0)?;
        }
        Ok(())
    }

    /// Tapered radius of node `index` before scale, pulse and squash.
    pub fn node_radius(&self, index: usize) -> f32 {
        (self.base_radius * self.radius_decay.powi(index as i32)).max(self.min_radius)
    }
}

/// Everything one rebuild needs besides the builder's own tuning.
#[derive(Debug, Clone, Copy)]
pub struct RibbonFrame<'a> {
    pub nodes: &'a [Vec2],
    pub node_distance: f32,
    pub squash: f32,
    pub x_compensation: f32,
    pub pulse: f32,
    pub scale_correction: f32,
    /// Fill color, already in the render target's color space.
    pub fill: Color,
    /// Inverse of the mesh owner's world transform.
    pub world_to_local: Affine2,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RibbonBuilder {
    pub params: RibbonParams,
    pub outline: OutlineParams,
}

impl RibbonBuilder {
    pub fn new(params: RibbonParams, outline: OutlineParams) -> Self { Self { params, outline } }

    /// Clear `mesh` and rebuild it from `frame`. Outline quads come first so
    /// they rasterize behind the fill.
    pub fn build(&self, frame: &RibbonFrame<'_>, mesh: &mut RibbonMesh) {
        mesh.clear();
        self.pass(frame, self.outline.margin, self.outline.color, mesh);
        self.pass(frame, 0.0, frame.fill, mesh);
    }

    fn pass(&self, frame: &RibbonFrame<'_>, margin: f32, color: Color, mesh: &mut RibbonMesh) {
        for (i, node) in frame.nodes.iter().enumerate() {
            let radius = self.params.node_radius(i) * frame.scale_correction * frame.pulse + margin;
            let stretch = if i > 0 { self.stretch(frame.nodes[i - 1].distance(*node), frame.node_distance) } else { 1.0 };
            let half = self.half_extents(radius, stretch, frame.squash, frame.x_compensation);
            mesh.push_quad(frame.world_to_local.transform_point2(*node), half, color);
        }
    }

    /// 1 at nominal spacing, larger when the segment is over-extended.
    pub fn stretch(&self, segment: f32, node_distance: f32) -> f32 {
        match &self.params.stretch {
            Some(s) => 1.0 + (segment / node_distance - 1.0) * s.strength,
            None => 1.0,
        }
    }

    fn half_extents(&self, radius: f32, stretch: f32, squash: f32, x_compensation: f32) -> Vec2 {
        let bias = self.params.stretch.map_or(1.0, |s| s.bias);
        let half_x = radius * stretch * (1.0 + (1.0 - squash) * x_compensation);
        let half_y = radius / (stretch * bias + (1.0 - bias)) * squash;
        Vec2::new(half_x, half_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(nodes: &[Vec2]) -> RibbonFrame<'_> {
        RibbonFrame {
            nodes,
            node_distance: 0.16,
            squash: 1.0,
            x_compensation: 0.5,
            pulse: 1.0,
            scale_correction: 1.0,
            fill: Color::WHITE,
            world_to_local: Affine2::IDENTITY,
        }
    }

    fn half(mesh: &RibbonMesh, q: usize) -> Vec2 {
        let v = &mesh.vertices[q * 4 + 3].pos;
        Vec2::new(v[0], v[1]) - mesh.quad_center(q).unwrap()
    }

    #[test]
    fn node_radius_tapers_and_floors() {
        let p = RibbonParams::default();
        assert!((p.node_radius(3) - 0.45 * 0.65f32.powi(3)).abs() < 1e-6);
        assert!((p.node_radius(3) - 0.1236).abs() < 1e-4);
        assert_eq!(p.node_radius(10), 0.05);
    }

    #[test]
    fn outline_pass_precedes_fill_pass() {
        let nodes: Vec<Vec2> = (0..6).map(|i| Vec2::new(0.0, -0.16 * i as f32)).collect();
        let b = RibbonBuilder::default();
        let mut mesh = RibbonMesh::default();
        b.build(&frame(&nodes), &mut mesh);
        assert_eq!(mesh.quad_count(), 12);
        assert_eq!(mesh.triangle_count(), 24);
        assert!(mesh.vertices[..24].iter().all(|v| v.color == Color::BLACK.to_array()));
        assert!(mesh.vertices[24..].iter().all(|v| v.color == Color::WHITE.to_array()));
        for i in 0..6 {
            let outline = half(&mesh, i);
            let fill = half(&mesh, i + 6);
            assert!((outline.x - fill.x - 0.125).abs() < 1e-5);
            assert!(mesh.quad_center(i).unwrap().abs_diff_eq(mesh.quad_center(i + 6).unwrap(), 1e-5));
        }
    }

    #[test]
    fn rebuild_is_bit_identical() {
        let nodes = [Vec2::ZERO, Vec2::new(-0.1, -0.12), Vec2::new(-0.2, -0.2)];
        let b = RibbonBuilder::default();
        let mut a = RibbonMesh::default();
        let mut c = RibbonMesh::default();
        b.build(&frame(&nodes), &mut a);
        b.build(&frame(&nodes), &mut c);
        b.build(&frame(&nodes), &mut c);
        assert_eq!(a.vertex_bytes(), c.vertex_bytes());
        assert_eq!(a.indices, c.indices);
    }

    #[test]
    fn squash_flattens_and_widens() {
        let nodes = [Vec2::ZERO];
        let b = RibbonBuilder::default();
        let mut mesh = RibbonMesh::default();
        let mut f = frame(&nodes);
        f.squash = 0.6;
        b.build(&f, &mut mesh);
        let h = half(&mesh, 1);
        assert!((h.y - 0.45 * 0.6).abs() < 1e-5);
        assert!((h.x - 0.45 * 1.2).abs() < 1e-5);
    }

    #[test]
    fn stretch_widens_over_extended_segments() {
        let b = RibbonBuilder::default();
        assert_eq!(b.stretch(0.16, 0.16), 1.0);
        assert!(b.stretch(0.32, 0.16) > b.stretch(0.2, 0.16));
        let tail = RibbonBuilder::new(RibbonParams { stretch: None, ..Default::default() }, OutlineParams::default());
        assert_eq!(tail.stretch(0.5, 0.16), 1.0);
    }

    #[test]
    fn pulse_and_scale_grow_every_quad() {
        let nodes = [Vec2::ZERO];
        let b = RibbonBuilder::default();
        let mut mesh = RibbonMesh::default();
        let mut f = frame(&nodes);
        f.pulse = 1.35;
        f.scale_correction = 2.0;
        b.build(&f, &mut mesh);
        assert!((half(&mesh, 1).x - 0.45 * 1.35 * 2.0).abs() < 1e-5);
    }

    #[test]
    fn positions_are_written_in_local_space() {
        let nodes = [Vec2::new(5.0, 3.0)];
        let b = RibbonBuilder::default();
        let mut mesh = RibbonMesh::default();
        let mut f = frame(&nodes);
        f.world_to_local = Affine2::from_translation(Vec2::new(5.0, 2.0)).inverse();
        b.build(&f, &mut mesh);
        assert!(mesh.quad_center(1).unwrap().abs_diff_eq(Vec2::new(0.0, 1.0), 1e-5));
    }

    #[test]
    fn empty_chain_emits_nothing() {
        let b = RibbonBuilder::default();
        let mut mesh = RibbonMesh::default();
        mesh.push_quad(Vec2::ZERO, Vec2::ONE, Color::WHITE);
        b.build(&frame(&[]), &mut mesh);
        assert!(mesh.is_empty());
        assert!(mesh.indices.is_empty());
    }

    #[test]
    fn strength_that_would_invert_quads_is_rejected() {
        let p = RibbonParams { stretch: Some(StretchParams { strength: 1.5, bias: 0.7 }), ..Default::default() };
        assert!(p.validate().is_err());
    }
}
