//! Built-in scripted host: idle, run, turn, crouch, dash, tired, refill,
//! warp, death.

use glam::{Affine2, Vec2};
use strand_core::{AnchorPoints, Facing, HostSnapshot, RigAnchors};

const RUN_SPEED: f32 = 6.0;
const DASH_SPEED: f32 = 18.0;
const REFILL_AT: f32 = 4.5;
const WARP_AT: f32 = 5.0;
const WARP_BY: Vec2 = Vec2::new(3.0, 1.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Refill,
    Warp(Vec2),
}

#[derive(Debug, Clone)]
pub struct Step {
    pub host: HostSnapshot,
    pub anchors: RigAnchors,
    pub transform: Affine2,
    pub events: Vec<Event>,
}

/// Head and hip points relative to the body origin, mirrored by facing.
fn anchors_at(pos: Vec2) -> RigAnchors {
    RigAnchors {
        hair: AnchorPoints::directional(pos + Vec2::new(-0.1, 0.6), pos + Vec2::new(0.1, 0.6)),
        tail: AnchorPoints::directional(pos + Vec2::new(-0.2, 0.1), pos + Vec2::new(0.2, 0.1)),
    }
}

#[derive(Debug, Clone)]
pub struct Scenario {
    dt: f32,
    time: f32,
    position: Vec2,
}

impl Scenario {
    pub fn new(dt: f32) -> Self { Self { dt, time: 0.0, position: Vec2::ZERO } }

    pub fn position(&self) -> Vec2 { self.position }

    fn crossed(&self, mark: f32) -> bool { self.time <= mark && mark < self.time + self.dt }

    /// Host state for the current tick; moves the body and advances time.
    pub fn step(&mut self) -> Step {
        let t = self.time;
        let mut host = HostSnapshot::default();
        let mut events = Vec::new();
        match t {
            t if t < 1.0 => {}
            t if t < 2.0 => host.velocity.x = RUN_SPEED,
            t if t < 2.5 => {
                host.facing = Facing::Left;
                host.velocity.x = -RUN_SPEED;
            }
            t if t < 3.5 => {
                host.facing = Facing::Left;
                host.crouching = true;
            }
            t if t < 3.7 => {
                host.dashing = true;
                host.can_dash = false;
                host.dash_charges = 0;
                host.velocity.x = DASH_SPEED;
            }
            t if t < REFILL_AT => {
                host.can_dash = false;
                host.dash_charges = 0;
                host.stamina = 10.0;
            }
            t if t < 5.5 => host.dash_charges = 2,
            _ => host.dead = true,
        }
        if self.crossed(REFILL_AT) {
            events.push(Event::Refill);
        }
        if self.crossed(WARP_AT) {
            self.position += WARP_BY;
            events.push(Event::Warp(self.position));
        }
        self.position += host.velocity * self.dt;
        self.time += self.dt;
        Step { host, anchors: anchors_at(self.position), transform: Affine2::from_translation(self.position), events }
    }
}
