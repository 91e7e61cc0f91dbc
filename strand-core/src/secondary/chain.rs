use glam::Vec2;

use super::motion::Motion;
use super::ChainParams;
use crate::error::ConfigError;
use crate::host::{ease_factor, Facing, HostSnapshot, SimulationContext};

/// Ordered node positions of one trailing appendage. Node 0 is the root.
#[derive(Debug, Clone)]
pub struct Chain {
    nodes: Vec<Vec2>,
    params: ChainParams,
    last_facing: Facing,
}

impl Chain {
    /// Every node starts on `origin` so the first frame does not snap in.
    pub fn new(params: ChainParams, origin: Vec2, facing: Facing) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { nodes: vec![origin; params.segment_count], params, last_facing: facing })
    }

    pub fn nodes(&self) -> &[Vec2] { &self.nodes }
    pub fn len(&self) -> usize { self.nodes.len() }
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }
    pub fn params(&self) -> &ChainParams { &self.params }
    pub fn node_distance(&self) -> f32 { self.params.node_distance }
    pub fn last_facing(&self) -> Facing { self.last_facing }

    /// Full per-tick update: flip handling, root pin, then integration.
    pub fn step<M: Motion + ?Sized>(
        &mut self,
        anchor: Vec2,
        motion: &M,
        ctx: &SimulationContext,
        host: &HostSnapshot,
    ) {
        self.handle_facing(host.facing, anchor);
        self.pin_root(anchor);
        self.integrate(motion, ctx, host);
    }

    /// Mirror every node's X offset from the old root around `anchor.x` when
    /// the facing changed, so the chain swings over instead of snapping.
    /// Returns whether a flip happened.
    pub fn handle_facing(&mut self, facing: Facing, anchor: Vec2) -> bool {
        if facing == self.last_facing {
            return false;
        }
        self.last_facing = facing;
        let Some(&root) = self.nodes.first() else { return true };
        for node in self.nodes.iter_mut().skip(1) {
            node.x = anchor.x - (node.x - root.x);
        }
        log::debug!("chain flipped to {:?}", facing);
        true
    }

    pub fn pin_root(&mut self, anchor: Vec2) {
        if let Some(root) = self.nodes.first_mut() {
            *root = anchor;
        }
    }

    /// Ease nodes 1.. toward their force-displaced targets, then clamp each to
    /// `node_distance` from its predecessor. One forward pass.
    pub fn integrate<M: Motion + ?Sized>(&mut self, motion: &M, ctx: &SimulationContext, host: &HostSnapshot) {
        let count = self.nodes.len();
        let t = ease_factor(motion.follow_rate(self.params.follow_rate, host), ctx.dt);
        let max = self.params.node_distance;
        for i in 1..count {
            let prev = self.nodes[i - 1];
            let target = prev + motion.force(i, count, ctx, host) * ctx.dt;
            let mut node = self.nodes[i].lerp(target, t);
            let offset = node - prev;
            if offset.length() > max {
                node = prev + offset.normalize() * max;
            }
            self.nodes[i] = node;
        }
    }

    /// Collapse the whole chain onto `position`.
    pub fn warp(&mut self, position: Vec2) {
        self.nodes.fill(position);
    }
}
