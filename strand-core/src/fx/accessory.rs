//! Pushing the resolved appendage color to decorative renderers (ears, bangs,
//! tail tint) that do not simulate anything themselves.

use serde::{Deserialize, Serialize};

use crate::error::{self, ConfigError};
use crate::render::color::{Color, ColorSpace};

/// Anything that can be tinted with a color.
pub trait TintTarget {
    fn set_tint(&mut self, color: Color);
}

impl TintTarget for Color {
    fn set_tint(&mut self, color: Color) { *self = color; }
}

/// Unassigned slots are skipped.
impl<T: TintTarget> TintTarget for Option<T> {
    fn set_tint(&mut self, color: Color) {
        if let Some(t) = self {
            t.set_tint(color);
        }
    }
}

impl<T: TintTarget + ?Sized> TintTarget for &mut T {
    fn set_tint(&mut self, color: Color) { (**self).set_tint(color) }
}

impl<T: TintTarget + ?Sized> TintTarget for Box<T> {
    fn set_tint(&mut self, color: Color) { (**self).set_tint(color) }
}

/// Tint every target with `color`, converted for `space`.
pub fn sync_accessories<T: TintTarget>(color: Color, space: ColorSpace, targets: &mut [T]) {
    let tint = color.for_space(space);
    for t in targets.iter_mut() {
        t.set_tint(tint);
    }
}

/// Slightly darker tail than the hair it follows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Darken {
    pub enabled: bool,
    /// 1 keeps the source color, lower is darker.
    pub multiplier: f32,
}

impl Default for Darken {
    fn default() -> Self { Self { enabled: true, multiplier: 0.85 } }
}

impl Darken {
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::in_range("darken.multiplier", self.multiplier, 0.0, 1.0)
    }

    pub fn apply(&self, color: Color) -> Color {
        if self.enabled { color.scale_rgb(self.multiplier) } else { color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sprite {
        tint: Option<Color>,
    }

    impl TintTarget for Sprite {
        fn set_tint(&mut self, color: Color) { self.tint = Some(color); }
    }

    #[test]
    fn missing_targets_are_skipped() {
        let mut slots = [Some(Sprite::default()), None, Some(Sprite::default())];
        sync_accessories(Color::WHITE, ColorSpace::Gamma, &mut slots);
        assert_eq!(slots[0].as_ref().unwrap().tint, Some(Color::WHITE));
        assert!(slots[1].is_none());
        assert_eq!(slots[2].as_ref().unwrap().tint, Some(Color::WHITE));
    }

    #[test]
    fn linear_space_targets_get_linear_colors() {
        let c = Color::rgba(0.5, 0.25, 0.75, 1.0);
        let mut plain = [Color::BLACK; 2];
        sync_accessories(c, ColorSpace::Linear, &mut plain);
        assert_eq!(plain[0], c.to_linear());
        assert_eq!(plain[1], c.to_linear());
        assert_ne!(plain[0], c);
    }

    #[test]
    fn boxed_trait_objects_receive_the_tint() {
        let c = Color::rgba(0.5, 0.25, 0.75, 1.0);
        let (mut ears, mut bangs) = (Sprite::default(), Sprite::default());
        {
            let mut boxed: Vec<Box<dyn TintTarget + '_>> = vec![Box::new(&mut ears), Box::new(Some(&mut bangs))];
            sync_accessories(c, ColorSpace::Linear, &mut boxed);
        }
        assert_eq!(ears.tint, Some(c.to_linear()));
        assert_eq!(bangs.tint, Some(c.to_linear()));
    }

    #[test]
    fn darken_scales_rgb_only() {
        let d = Darken::default();
        let c = d.apply(Color::rgba(1.0, 0.5, 0.0, 0.5));
        assert!((c.r - 0.85).abs() < 1e-6);
        assert!((c.g - 0.425).abs() < 1e-6);
        assert_eq!(c.a, 0.5);
        let off = Darken { enabled: false, ..d };
        assert_eq!(off.apply(Color::WHITE), Color::WHITE);
    }
}
