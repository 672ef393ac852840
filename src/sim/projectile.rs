//! Projectile motion: straight-line flight, homing correction, bounds culling

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Body, Rect};
use super::state::Arena;
use crate::consts::*;

/// Something a homing projectile can lock onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetId {
    Boss,
}

/// Narrow read-only view of the world handed to projectiles each tick
pub trait TargetProvider {
    /// Pick a fresh target, if any valid one exists
    fn acquire_target(&self) -> Option<TargetId>;
    /// Centre of `id` while it is still a valid (alive) target
    fn target_center(&self, id: TargetId) -> Option<Vec2>;
}

/// A projectile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub from_player: bool,
    pub alive: bool,
    /// Survives hits
    pub piercing: bool,
    /// Steers toward `homing_target`
    pub homing: bool,
    /// Not owned; re-acquired whenever it stops being valid
    pub homing_target: Option<TargetId>,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, from_player: bool) -> Self {
        Self {
            id: 0,
            pos,
            vel,
            size: Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            from_player,
            alive: true,
            piercing: false,
            homing: false,
            homing_target: None,
        }
    }

    /// Advance one step: homing correction, integration, culling
    pub fn advance(&mut self, dt: f32, arena: &Arena, targets: &impl TargetProvider) {
        if self.homing && self.from_player {
            self.steer(dt, targets);
        }

        self.pos += self.vel * dt;

        // Cull once fully outside the arena by more than our own size
        if self.pos.x < -self.size.x
            || self.pos.x > arena.width + self.size.x
            || self.pos.y < -self.size.y
            || self.pos.y > arena.height + self.size.y
        {
            self.alive = false;
        }
    }

    fn steer(&mut self, dt: f32, targets: &impl TargetProvider) {
        let still_valid = self
            .homing_target
            .is_some_and(|id| targets.target_center(id).is_some());
        if !still_valid {
            self.homing_target = targets.acquire_target();
        }

        let Some(target) = self.homing_target.and_then(|id| targets.target_center(id)) else {
            return;
        };

        let to_target = target - self.center();
        let distance = to_target.length();
        if distance > 0.0 {
            let factor = (HOMING_STRENGTH * dt / distance).min(1.0);
            self.vel += to_target * factor;
            self.vel = self.vel.clamp_length_max(HOMING_MAX_SPEED);
        }
    }
}

impl Body for Projectile {
    fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
