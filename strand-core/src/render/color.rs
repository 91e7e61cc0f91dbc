//! RGBA color in authored (sRGB) space plus the linear conversion the mesh and
//! accessory tints need on linear pipelines.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// How the render target interprets vertex and tint colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    #[default]
    Gamma,
    Linear,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Some(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, a))
    }

    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Component-wise interpolation, `t` clamped to 0..=1.
    pub fn lerp(self, to: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color::rgba(
            self.r + (to.r - self.r) * t,
            self.g + (to.g - self.g) * t,
            self.b + (to.b - self.b) * t,
            self.a + (to.a - self.a) * t,
        )
    }

    /// Multiply RGB, alpha untouched.
    pub fn scale_rgb(self, k: f32) -> Color {
        Color::rgba(self.r * k, self.g * k, self.b * k, self.a)
    }

    /// sRGB transfer function applied to RGB; alpha is already linear.
    pub fn to_linear(self) -> Color {
        Color::rgba(srgb_to_linear(self.r), srgb_to_linear(self.g), srgb_to_linear(self.b), self.a)
    }

    /// The color to hand to a target using `space`.
    pub fn for_space(self, space: ColorSpace) -> Color {
        match space {
            ColorSpace::Gamma => self,
            ColorSpace::Linear => self.to_linear(),
        }
    }
}

impl Default for Color {
    fn default() -> Self { Color::WHITE }
}

impl TryFrom<String> for Color {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::from_hex(&s).ok_or_else(|| format!("invalid color '{}', expected #RRGGBB or #RRGGBBAA", s))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self { c.to_hex() }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parses_with_and_without_alpha() {
        let c = Color::from_hex("#9e8485").unwrap();
        assert_eq!(c.to_rgba8(), [158, 132, 133, 255]);
        let c = Color::from_hex("7eadbd80").unwrap();
        assert_eq!(c.to_rgba8(), [126, 173, 189, 128]);
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#zzzzzz").is_none());
    }

    #[test]
    fn linear_conversion_darkens_midtones_and_keeps_extremes() {
        let mid = Color::rgba(0.5, 0.5, 0.5, 0.5).to_linear();
        assert!((mid.r - 0.2140).abs() < 1e-3);
        assert_eq!(mid.a, 0.5);
        assert_eq!(Color::BLACK.to_linear(), Color::BLACK);
        let white = Color::WHITE.to_linear();
        assert!((white.r - 1.0).abs() < 1e-6);
        assert_eq!(Color::WHITE.for_space(ColorSpace::Gamma), Color::WHITE);
    }

    #[test]
    fn lerp_clamps_its_weight() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(a.lerp(b, 2.0), b);
        assert_eq!(a.lerp(b, -1.0), a);
        assert!((a.lerp(b, 0.25).g - 0.25).abs() < 1e-6);
    }

    #[test]
    fn yaml_uses_hex_strings() {
        let c: Color = serde_yaml::from_str("\"#ff0000\"").unwrap();
        assert_eq!(c, Color::rgba(1.0, 0.0, 0.0, 1.0));
        let s = serde_yaml::to_string(&c).unwrap();
        assert!(s.contains("#ff0000"));
    }
}
