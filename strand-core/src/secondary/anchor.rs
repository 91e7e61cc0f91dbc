use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::host::{AnchorPoints, Facing};

/// Picks the root position of a chain for the current facing.
///
/// Falls back from the directional anchor to the master appendage, then the
/// visuals root, then the owner itself, so an unassigned anchor never leaves
/// the chain detached.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorResolver {
    /// Static offset applied to whichever point wins.
    pub offset: Vec2,
}

impl AnchorResolver {
    pub fn new(offset: Vec2) -> Self { Self { offset } }

    pub fn resolve(&self, facing: Facing, anchors: &AnchorPoints, owner: Vec2) -> Vec2 {
        let directional = match facing {
            Facing::Right => anchors.right,
            Facing::Left => anchors.left,
        };
        let base = directional
            .or_else(|| {
                log::trace!("no {:?} anchor, falling back to master/visuals/owner", facing);
                anchors.master
            })
            .or(anchors.visuals_root)
            .unwrap_or(owner);
        base + self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: Vec2 = Vec2::new(9.0, 9.0);

    #[test]
    fn directional_anchor_follows_facing() {
        let r = AnchorResolver::new(Vec2::new(0.0, 0.1));
        let anchors = AnchorPoints::directional(Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0));
        assert_eq!(r.resolve(Facing::Right, &anchors, OWNER), Vec2::new(1.0, 0.1));
        assert_eq!(r.resolve(Facing::Left, &anchors, OWNER), Vec2::new(-1.0, 0.1));
    }

    #[test]
    fn fallback_order_is_master_then_visuals_then_owner() {
        let r = AnchorResolver::new(Vec2::X);
        let mut anchors = AnchorPoints {
            right: Some(Vec2::ZERO),
            left: None,
            master: Some(Vec2::new(2.0, 0.0)),
            visuals_root: Some(Vec2::new(3.0, 0.0)),
        };
        assert_eq!(r.resolve(Facing::Left, &anchors, OWNER), Vec2::new(3.0, 0.0));
        anchors.master = None;
        assert_eq!(r.resolve(Facing::Left, &anchors, OWNER), Vec2::new(4.0, 0.0));
        anchors.visuals_root = None;
        assert_eq!(r.resolve(Facing::Left, &anchors, OWNER), OWNER + Vec2::X);
    }
}
