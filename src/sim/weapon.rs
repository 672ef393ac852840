//! Player weapon: rate-limited projectile spawning

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::events::{EntityRef, EventHub, GameEvent};
use super::projectile::Projectile;
use crate::consts::*;

/// Modifiers stamped onto each projectile at spawn time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShotFlags {
    pub piercing: bool,
    pub homing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Minimum seconds between shots
    pub cooldown: f32,
    /// Fire a three-way spread instead of a single shot
    pub triple_shot: bool,
    /// Clock time of the last successful shot
    last_fired: Option<f64>,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            cooldown: WEAPON_COOLDOWN,
            triple_shot: false,
            last_fired: None,
        }
    }
}

impl Weapon {
    /// Whether a shot at clock time `now` would go out
    pub fn ready(&self, now: f64) -> bool {
        self.last_fired.is_none_or(|t| now - t >= f64::from(self.cooldown))
    }

    /// Fire from `owner` if the cooldown allows; returns the spawned projectiles
    pub fn fire(
        &mut self,
        now: f64,
        owner: Rect,
        flags: ShotFlags,
        hub: &mut EventHub,
    ) -> Vec<Projectile> {
        if !self.ready(now) {
            return Vec::new();
        }
        self.last_fired = Some(now);
        hub.publish(GameEvent::Attack {
            source: EntityRef::Player,
        });

        let muzzle = Vec2::new(
            owner.center().x - PROJECTILE_WIDTH / 2.0,
            owner.pos.y - PROJECTILE_HEIGHT,
        );
        let lanes: &[f32] = if self.triple_shot { &[-1.0, 0.0, 1.0] } else { &[0.0] };

        lanes
            .iter()
            .map(|&lane| {
                let pos = muzzle + Vec2::new(lane * TRIPLE_SHOT_SPACING, 0.0);
                let vel = Vec2::new(lane * TRIPLE_SHOT_SPREAD, -PLAYER_SHOT_SPEED);
                let mut proj = Projectile::new(pos, vel, true);
                proj.piercing = flags.piercing;
                proj.homing = flags.homing;
                proj
            })
            .collect()
    }
}
