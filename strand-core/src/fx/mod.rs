//! Color effects layered on the chains: state-driven palette, refill flash,
//! and tinting of dependent renderers.

pub mod accessory;
pub mod palette;

pub use accessory::{sync_accessories, Darken, TintTarget};
pub use palette::{ColorState, HairPalette};

use crate::render::color::Color;

/// Read side of an appendage that owns its color, polled by dependents
/// (tail, bangs overlay) once per tick.
pub trait ColorSource {
    /// Authored-space color; dependents convert for their own target.
    fn current_color(&self) -> Color;

    fn pulse_scale(&self) -> f32 { 1.0 }
}
