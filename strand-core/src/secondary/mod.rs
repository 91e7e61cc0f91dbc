//! Secondary motion: trailing chains pinned to an anchor, plus the crouch
//! squash and refill pulse that deform them.

pub mod anchor;
pub mod chain;
pub mod deform;
pub mod motion;

pub use anchor::AnchorResolver;
pub use chain::Chain;
pub use deform::{PulseParams, RefillPulse, Squash, SquashParams};
pub use motion::{DeadProfile, HairMotion, Motion, TailMotion, Wave};

use serde::{Deserialize, Serialize};

use crate::error::{self, ConfigError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainParams {
    /// Number of nodes, root included. Zero is a valid empty chain.
    pub segment_count: usize,
    /// Maximum spacing between neighbouring nodes.
    pub node_distance: f32,
    /// Exponential follow rate toward the per-node target, in 1/s.
    pub follow_rate: f32,
}

impl Default for ChainParams {
    fn default() -> Self { Self { segment_count: 6, node_distance: 0.16, follow_rate: 22.0 } }
}

impl ChainParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::positive("node_distance", self.node_distance)?;
        error::non_negative("follow_rate", self.follow_rate)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_node_distance_is_rejected() {
        let params = ChainParams { node_distance: 0.0, ..Default::default() };
        assert!(matches!(params.validate(), Err(ConfigError::NotPositive { field: "node_distance", .. })));
        let params = ChainParams { node_distance: -0.1, ..Default::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn empty_chain_is_valid_config() {
        let params = ChainParams { segment_count: 0, ..Default::default() };
        assert!(params.validate().is_ok());
    }
}
