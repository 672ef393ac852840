//! Power-up kinds, collectibles, and the effect table
//!
//! Each kind either changes the player instantly (health, shield) or flips a
//! stat for a limited time. Expiry restores the neutral value of exactly the
//! fields the kind touched.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Body, Rect};
use super::player::Player;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    RapidFire,
    Shield,
    TripleShot,
    Health,
    SpeedBoost,
    DamageBoost,
    PiercingShot,
    HomingMissiles,
    ShieldRegen,
    Invincibility,
    DoubleScore,
}

impl PowerUpKind {
    /// Every kind, in random-spawn order
    pub const ALL: [PowerUpKind; 11] = [
        PowerUpKind::RapidFire,
        PowerUpKind::Shield,
        PowerUpKind::TripleShot,
        PowerUpKind::Health,
        PowerUpKind::SpeedBoost,
        PowerUpKind::DamageBoost,
        PowerUpKind::PiercingShot,
        PowerUpKind::HomingMissiles,
        PowerUpKind::ShieldRegen,
        PowerUpKind::Invincibility,
        PowerUpKind::DoubleScore,
    ];

    /// Kinds dropped when the boss comes back for another life
    pub const RESPAWN_POOL: [PowerUpKind; 8] = [
        PowerUpKind::Health,
        PowerUpKind::Shield,
        PowerUpKind::RapidFire,
        PowerUpKind::TripleShot,
        PowerUpKind::SpeedBoost,
        PowerUpKind::DamageBoost,
        PowerUpKind::PiercingShot,
        PowerUpKind::HomingMissiles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::RapidFire => "rapid_fire",
            PowerUpKind::Shield => "shield",
            PowerUpKind::TripleShot => "triple_shot",
            PowerUpKind::Health => "health",
            PowerUpKind::SpeedBoost => "speed_boost",
            PowerUpKind::DamageBoost => "damage_boost",
            PowerUpKind::PiercingShot => "piercing_shot",
            PowerUpKind::HomingMissiles => "homing_missiles",
            PowerUpKind::ShieldRegen => "shield_regen",
            PowerUpKind::Invincibility => "invincibility",
            PowerUpKind::DoubleScore => "double_score",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// Default timer length, None for one-shot kinds
    pub fn default_duration(&self) -> Option<f32> {
        match self {
            PowerUpKind::Health | PowerUpKind::Shield => None,
            PowerUpKind::Invincibility => Some(INVINCIBILITY_DURATION),
            _ => Some(POWER_UP_DURATION),
        }
    }

    /// RGB tint for presentation
    pub fn tint(&self) -> u32 {
        match self {
            PowerUpKind::RapidFire => 0xffff44,
            PowerUpKind::Shield => 0x44ffff,
            PowerUpKind::TripleShot => 0xff44ff,
            PowerUpKind::Health => 0x44ff44,
            PowerUpKind::SpeedBoost => 0x88ff88,
            PowerUpKind::DamageBoost => 0xff8844,
            PowerUpKind::PiercingShot => 0x8844ff,
            PowerUpKind::HomingMissiles => 0xff4488,
            PowerUpKind::ShieldRegen => 0x4488ff,
            PowerUpKind::Invincibility => 0xffff88,
            PowerUpKind::DoubleScore => 0x88ffff,
        }
    }
}

/// Apply a kind's effect to the player, starting its timer if it has one.
///
/// `duration` overrides the default timer length of timed kinds.
pub(crate) fn apply_effect(player: &mut Player, kind: PowerUpKind, duration: Option<f32>) {
    match kind {
        PowerUpKind::Health => player.hp = (player.hp + HEALTH_BONUS).min(player.max_hp),
        PowerUpKind::Shield => player.shield = (player.shield + SHIELD_BONUS).min(SHIELD_MAX),
        PowerUpKind::RapidFire => player.weapon.cooldown = RAPID_FIRE_COOLDOWN,
        PowerUpKind::TripleShot => player.weapon.triple_shot = true,
        PowerUpKind::SpeedBoost => player.speed_multiplier = 1.5,
        PowerUpKind::DamageBoost => player.damage_multiplier = 2.0,
        PowerUpKind::PiercingShot => {
            player.piercing_shots = true;
            player.damage_multiplier = 0.1;
        }
        PowerUpKind::HomingMissiles => player.homing_missiles = true,
        PowerUpKind::ShieldRegen => player.shield_regen = true,
        PowerUpKind::Invincibility => player.invincible = true,
        PowerUpKind::DoubleScore => player.score_multiplier = 2.0,
    }

    if let Some(default) = kind.default_duration() {
        player.timers.set(kind, duration.unwrap_or(default));
    }
}

/// Undo a timed kind's effect
pub(crate) fn expire_effect(player: &mut Player, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Health | PowerUpKind::Shield => {}
        PowerUpKind::RapidFire => player.weapon.cooldown = WEAPON_COOLDOWN,
        PowerUpKind::TripleShot => player.weapon.triple_shot = false,
        PowerUpKind::SpeedBoost => player.speed_multiplier = 1.0,
        PowerUpKind::DamageBoost => player.damage_multiplier = 1.0,
        PowerUpKind::PiercingShot => {
            player.piercing_shots = false;
            player.damage_multiplier = 1.0;
        }
        PowerUpKind::HomingMissiles => player.homing_missiles = false,
        PowerUpKind::ShieldRegen => player.shield_regen = false,
        PowerUpKind::Invincibility => player.invincible = false,
        PowerUpKind::DoubleScore => player.score_multiplier = 1.0,
    }
}

/// Remaining seconds per active timed power-up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerUpTimers {
    remaining: BTreeMap<PowerUpKind, f32>,
}

impl PowerUpTimers {
    /// Start or restart a timer
    pub fn set(&mut self, kind: PowerUpKind, seconds: f32) {
        self.remaining.insert(kind, seconds);
    }

    pub fn remaining(&self, kind: PowerUpKind) -> Option<f32> {
        self.remaining.get(&kind).copied()
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.remaining.contains_key(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PowerUpKind, f32)> + '_ {
        self.remaining.iter().map(|(k, t)| (*k, *t))
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn clear(&mut self) {
        self.remaining.clear();
    }

    /// Count every timer down by `dt`; returns (and removes) the ones that ran out
    pub fn advance(&mut self, dt: f32) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for (kind, time_left) in self.remaining.iter_mut() {
            *time_left -= dt;
            if *time_left <= 0.0 {
                expired.push(*kind);
            }
        }
        for kind in &expired {
            self.remaining.remove(kind);
        }
        expired
    }
}

/// A collectible floating in the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Bob animation phase (radians)
    pub bob_phase: f32,
    pub alive: bool,
}

impl PowerUp {
    /// Create a power-up centred on `center`
    pub fn new(center: Vec2, kind: PowerUpKind) -> Self {
        let size = Vec2::splat(POWER_UP_SIZE);
        Self {
            id: 0,
            kind,
            pos: center - size * 0.5,
            size,
            bob_phase: 0.0,
            alive: true,
        }
    }

    /// Small vertical bob; power-ups never expire on their own
    pub fn update(&mut self, dt: f32) {
        self.bob_phase += dt * 3.0;
        self.pos.y += self.bob_phase.sin() * 0.5;
    }
}

impl Body for PowerUp {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in PowerUpKind::ALL {
            assert_eq!(PowerUpKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(PowerUpKind::from_str("time_slow"), None);
    }

    #[test]
    fn test_one_shot_kinds_have_no_timer() {
        let mut player = Player::default();
        player.hp = 20.0;
        apply_effect(&mut player, PowerUpKind::Health, None);
        apply_effect(&mut player, PowerUpKind::Shield, None);
        assert_eq!(player.hp, 70.0);
        assert_eq!(player.shield, 50.0);
        assert!(player.timers.is_empty());
    }

    #[test]
    fn test_health_and_shield_saturate() {
        let mut player = Player::default();
        player.hp = 90.0;
        player.shield = 80.0;
        apply_effect(&mut player, PowerUpKind::Health, None);
        apply_effect(&mut player, PowerUpKind::Shield, None);
        assert_eq!(player.hp, player.max_hp);
        assert_eq!(player.shield, SHIELD_MAX);
    }

    #[test]
    fn test_every_timed_effect_reverses() {
        for kind in PowerUpKind::ALL {
            if kind.default_duration().is_none() {
                continue;
            }
            let mut player = Player::default();
            let before = player.clone();
            apply_effect(&mut player, kind, None);
            assert_eq!(player.timers.remaining(kind), kind.default_duration());
            expire_effect(&mut player, kind);
            player.timers.clear();

            assert_eq!(player.weapon.cooldown, before.weapon.cooldown, "{:?}", kind);
            assert_eq!(player.weapon.triple_shot, before.weapon.triple_shot);
            assert_eq!(player.speed_multiplier, before.speed_multiplier);
            assert_eq!(player.damage_multiplier, before.damage_multiplier);
            assert_eq!(player.score_multiplier, before.score_multiplier);
            assert_eq!(player.piercing_shots, before.piercing_shots);
            assert_eq!(player.homing_missiles, before.homing_missiles);
            assert_eq!(player.shield_regen, before.shield_regen);
            assert_eq!(player.invincible, before.invincible);
        }
    }

    #[test]
    fn test_invincibility_duration_override() {
        let mut player = Player::default();
        apply_effect(&mut player, PowerUpKind::Invincibility, None);
        assert_eq!(player.timers.remaining(PowerUpKind::Invincibility), Some(5.0));
        apply_effect(&mut player, PowerUpKind::Invincibility, Some(2.0));
        assert_eq!(player.timers.remaining(PowerUpKind::Invincibility), Some(2.0));
    }

    #[test]
    fn test_timers_expire_and_are_removed() {
        let mut timers = PowerUpTimers::default();
        timers.set(PowerUpKind::RapidFire, 1.0);
        timers.set(PowerUpKind::Invincibility, 0.5);

        assert!(timers.advance(0.25).is_empty());
        assert_eq!(timers.advance(0.25), vec![PowerUpKind::Invincibility]);
        assert!(!timers.is_active(PowerUpKind::Invincibility));
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.advance(1.0), vec![PowerUpKind::RapidFire]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_power_up_is_centred() {
        let p = PowerUp::new(Vec2::new(400.0, 300.0), PowerUpKind::Health);
        assert_eq!(p.center(), Vec2::new(400.0, 300.0));
    }
}
