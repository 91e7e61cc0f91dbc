use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::color::Color;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

// Full-texture UVs in vertex order: bottom-left, bottom-right, top-left, top-right.
const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
// Two counter-clockwise triangles sharing the 1-2 diagonal.
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 1, 3, 2];

/// Triangle mesh of flat-colored quads, rebuilt from scratch every tick.
/// Storage is kept between rebuilds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RibbonMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl RibbonMesh {
    pub fn with_quad_capacity(quads: usize) -> Self {
        Self { vertices: Vec::with_capacity(quads * 4), indices: Vec::with_capacity(quads * 6) }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool { self.vertices.is_empty() }
    pub fn quad_count(&self) -> usize { self.vertices.len() / 4 }
    pub fn triangle_count(&self) -> usize { self.indices.len() / 3 }

    /// Append an axis-aligned quad centred on `center` (mesh-local space).
    pub fn push_quad(&mut self, center: Vec2, half: Vec2, color: Color) {
        let base = self.vertices.len() as u32;
        let corners = [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(-half.x, half.y),
            Vec2::new(half.x, half.y),
        ];
        let color = color.to_array();
        for (corner, uv) in corners.iter().zip(QUAD_UVS) {
            let p = center + *corner;
            self.vertices.push(Vertex { pos: [p.x, p.y, 0.0], uv, color });
        }
        self.indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    /// Centre of quad `q`.
    pub fn quad_center(&self, q: usize) -> Option<Vec2> {
        let v = self.vertices.get(q * 4..q * 4 + 4)?;
        let sum = v.iter().fold(Vec2::ZERO, |acc, v| acc + Vec2::new(v.pos[0], v.pos[1]));
        Some(sum / 4.0)
    }

    pub fn vertex_bytes(&self) -> &[u8] { bytemuck::cast_slice(&self.vertices) }
    pub fn index_bytes(&self) -> &[u8] { bytemuck::cast_slice(&self.indices) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_area(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> f32 {
        (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])
    }

    #[test]
    fn quad_has_two_ccw_triangles_and_flat_color() {
        let mut m = RibbonMesh::default();
        m.push_quad(Vec2::new(1.0, 1.0), Vec2::new(0.5, 0.25), Color::BLACK);
        m.push_quad(Vec2::ZERO, Vec2::splat(0.1), Color::WHITE);
        assert_eq!(m.vertices.len(), 8);
        assert_eq!(m.indices, vec![0, 1, 2, 1, 3, 2, 4, 5, 6, 5, 7, 6]);
        for tri in m.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| m.vertices[i as usize].pos);
            assert!(signed_area(a, b, c) > 0.0);
        }
        assert!(m.vertices[4..].iter().all(|v| v.color == [1.0; 4]));
        assert_eq!(m.vertices[3].uv, [1.0, 1.0]);
        assert_eq!(m.quad_center(0), Some(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn byte_views_match_buffer_sizes() {
        let mut m = RibbonMesh::with_quad_capacity(1);
        m.push_quad(Vec2::ZERO, Vec2::ONE, Color::WHITE);
        assert_eq!(m.vertex_bytes().len(), 4 * std::mem::size_of::<Vertex>());
        assert_eq!(m.index_bytes().len(), 6 * 4);
        m.clear();
        assert!(m.is_empty());
        assert_eq!(m.triangle_count(), 0);
    }
}
