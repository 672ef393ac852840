//! The player ship: movement, damage mitigation, power-up timers, weapon

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Body, Rect};
use super::events::{EntityRef, EventHub, GameEvent};
use super::powerup::{self, PowerUpKind, PowerUpTimers};
use super::projectile::Projectile;
use super::state::Arena;
use super::tick::TickInput;
use super::weapon::{ShotFlags, Weapon};
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub hp: f32,
    pub max_hp: f32,
    /// Absorbs damage before hp (0..=SHIELD_MAX)
    pub shield: f32,

    // Power-up modifiers (neutral values: 1.0 / false)
    pub speed_multiplier: f32,
    pub damage_multiplier: f32,
    pub score_multiplier: f32,
    pub piercing_shots: bool,
    pub homing_missiles: bool,
    pub shield_regen: bool,
    pub invincible: bool,

    /// Active timed power-ups
    pub timers: PowerUpTimers,
    pub weapon: Weapon,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::splat(PLAYER_SIZE),
            speed: PLAYER_SPEED,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            shield: 0.0,
            speed_multiplier: 1.0,
            damage_multiplier: 1.0,
            score_multiplier: 1.0,
            piercing_shots: false,
            homing_missiles: false,
            shield_regen: false,
            invincible: false,
            timers: PowerUpTimers::default(),
            weapon: Weapon::default(),
        }
    }
}

impl Player {
    /// Fresh player at the default spawn point, pulled inside `arena`
    pub fn new(arena: &Arena) -> Self {
        let mut player = Self::default();
        player.pos = arena.clamp_inside(player.pos, player.size);
        player
    }

    /// Restore every field to its start-of-match value
    pub fn reset(&mut self, arena: &Arena) {
        *self = Self::new(arena);
    }

    pub fn shot_flags(&self) -> ShotFlags {
        ShotFlags {
            piercing: self.piercing_shots,
            homing: self.homing_missiles,
        }
    }

    /// Apply a power-up; `duration` overrides the kind's default timer
    pub fn apply_power_up(&mut self, kind: PowerUpKind, duration: Option<f32>) {
        log::debug!("Power-up applied: {}", kind.as_str());
        powerup::apply_effect(self, kind, duration);
    }

    /// Apply a power-up by name; unknown names do nothing
    pub fn apply_power_up_named(&mut self, name: &str) {
        match PowerUpKind::from_str(name) {
            Some(kind) => self.apply_power_up(kind, None),
            None => log::debug!("Ignoring unknown power-up '{}'", name),
        }
    }

    /// Restore hp, saturating at max
    pub fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Take a hit. Returns true if this hit was fatal.
    ///
    /// Invincibility blocks everything. Otherwise the shield soaks what it can
    /// and the rest comes off hp. Every hit that gets through (even one fully
    /// absorbed by the shield) grants a short immunity window.
    pub fn take_damage(&mut self, amount: f32, hub: &mut EventHub) -> bool {
        if self.invincible {
            return false;
        }

        let absorbed = self.shield.min(amount);
        self.shield -= absorbed;
        let amount = amount - absorbed;

        self.hp = (self.hp - amount).max(0.0);
        hub.publish(GameEvent::Damage {
            target: EntityRef::Player,
            amount,
        });
        self.apply_power_up(PowerUpKind::Invincibility, Some(HIT_IMMUNITY));

        if self.hp <= 0.0 {
            hub.publish(GameEvent::Death {
                entity: EntityRef::Player,
            });
            return true;
        }
        false
    }

    /// Advance one tick.
    ///
    /// `dt` is scaled gameplay time, `now` the real-time clock the weapon
    /// cooldown is measured against. Returns any projectiles fired.
    pub fn update(
        &mut self,
        dt: f32,
        now: f64,
        input: &TickInput,
        arena: &Arena,
        hub: &mut EventHub,
    ) -> Vec<Projectile> {
        for kind in self.timers.advance(dt) {
            log::debug!("Power-up expired: {}", kind.as_str());
            powerup::expire_effect(self, kind);
            hub.publish(GameEvent::PowerUpExpired { kind });
        }

        let step = self.speed * self.speed_multiplier * dt;
        let dir = input.direction();
        if dir != Vec2::ZERO {
            self.pos += dir * step;
        }

        if self.shield_regen && self.shield < SHIELD_MAX {
            self.shield = (self.shield + SHIELD_REGEN_RATE * dt).min(SHIELD_MAX);
        }

        self.pos = arena.clamp_inside(self.pos, self.size);

        if input.has_movement() {
            hub.publish(GameEvent::Move {
                entity: EntityRef::Player,
                pos: self.pos,
            });
        }

        if input.fire {
            let flags = self.shot_flags();
            self.weapon.fire(now, self.rect(), flags, hub)
        } else {
            Vec::new()
        }
    }
}

impl Body for Player {
    fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    fn is_alive(&self) -> bool {
        self.hp > 0.0
    }
}
