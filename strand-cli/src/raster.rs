//! CPU preview: draws every quad of a ribbon mesh as a filled ellipse, the
//! way a circle sprite textured onto it would look.

use glam::{Affine2, Vec2};
use image::{Rgba, RgbaImage};
use strand_core::render::{Color, RibbonMesh};

const BACKGROUND: Rgba<u8> = Rgba([236, 232, 226, 255]);

/// Maps world units to pixels, centred on a world point, Y up.
#[derive(Debug, Clone, Copy)]
pub struct View {
    pub center: Vec2,
    pub pixels_per_unit: f32,
    pub width: u32,
    pub height: u32,
}

impl View {
    pub fn to_pixel(&self, world: Vec2) -> Vec2 {
        let d = (world - self.center) * self.pixels_per_unit;
        Vec2::new(self.width as f32 * 0.5 + d.x, self.height as f32 * 0.5 - d.y)
    }
}

pub fn blank(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, BACKGROUND)
}

/// Quads are drawn in buffer order, so outlines land behind fills.
pub fn draw_mesh(img: &mut RgbaImage, view: &View, mesh: &RibbonMesh, owner: Affine2) {
    for quad in mesh.vertices.chunks_exact(4) {
        let lo = Vec2::new(quad[0].pos[0], quad[0].pos[1]);
        let hi = Vec2::new(quad[3].pos[0], quad[3].pos[1]);
        let center = owner.transform_point2((lo + hi) * 0.5);
        let half = owner.transform_vector2((hi - lo) * 0.5).abs() * view.pixels_per_unit;
        let c = quad[0].color;
        let rgba = Color::rgba(c[0], c[1], c[2], c[3]).to_rgba8();
        fill_ellipse(img, view.to_pixel(center), half, Rgba(rgba));
    }
}

fn fill_ellipse(img: &mut RgbaImage, center: Vec2, half: Vec2, color: Rgba<u8>) {
    if half.x <= 0.0 || half.y <= 0.0 {
        return;
    }
    let (w, h) = (img.width() as i64, img.height() as i64);
    let x0 = ((center.x - half.x).floor() as i64).max(0);
    let x1 = ((center.x + half.x).ceil() as i64).min(w - 1);
    let y0 = ((center.y - half.y).floor() as i64).max(0);
    let y1 = ((center.y + half.y).ceil() as i64).min(h - 1);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let d = (Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center) / half;
            if d.length_squared() <= 1.0 {
                blend(img.get_pixel_mut(x as u32, y as u32), color);
            }
        }
    }
}

fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let a = src.0[3] as f32 / 255.0;
    for k in 0..3 {
        dst.0[k] = (src.0[k] as f32 * a + dst.0[k] as f32 * (1.0 - a)).round() as u8;
    }
    dst.0[3] = dst.0[3].max(src.0[3]);
}
