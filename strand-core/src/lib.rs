//! Secondary-motion appendages (hair, tail) for 2D characters: trailing node
//! chains, state-driven color, and per-tick ribbon meshes.

pub mod error;
pub mod host;
pub mod profile;
pub mod secondary;
pub mod fx;
pub mod render;
pub mod rig;
pub mod export;

pub use error::ConfigError;
pub use host::{AnchorPoints, Facing, HostSnapshot, SimulationContext};
pub use profile::schema::{HairProfile, RigProfile, TailProfile};
pub use rig::{HairRig, Rig, RigAnchors, TailRig};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
