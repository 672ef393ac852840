//! Boss state machine
//!
//! Two orthogonal pieces of state drive the boss:
//! - `phase`: One until hp first drops to half, then Two for the rest of the life
//! - `attack_state`: idle `Cooldown` between rounds, `Bursting` while firing
//!
//! On top sits the life counter. Losing a life that isn't the last respawns
//! the boss with stats scaled by the new life number.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Body, Rect};
use super::events::{EntityRef, EventHub, GameEvent};
use super::projectile::Projectile;
use super::state::Arena;
use crate::consts::*;

/// Boss difficulty tier within one life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    One,
    Two,
}

impl BossPhase {
    pub fn number(&self) -> u8 {
        match self {
            BossPhase::One => 1,
            BossPhase::Two => 2,
        }
    }

    /// RGB tint for presentation
    pub fn tint(&self) -> u32 {
        match self {
            BossPhase::One => 0xff4444,
            BossPhase::Two => 0xff8844,
        }
    }
}

/// Attack cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttackState {
    /// Waiting out the round cooldown
    Cooldown,
    /// Firing a round
    Bursting {
        /// Clock time of the last shot (or of entering the round)
        last_shot: f64,
        /// Shots fired this round
        shots: u32,
    },
}

/// What a killing blow led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossDeath {
    /// Came back for life `life`
    Respawned { life: u32 },
    /// Final life lost
    Defeated,
}

/// Result of `Boss::take_damage`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BossDamage {
    /// Crossed the half-hp line this hit
    pub phase_changed: bool,
    pub death: Option<BossDeath>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub phase: BossPhase,
    pub lives: u32,
    pub current_life: u32,
    pub power_ups_to_spawn: u32,

    pub attack_cooldown: f32,
    /// Seconds between shots within a round
    pub burst_cooldown: f32,
    pub max_bursts_per_round: u32,
    /// Idle seconds between rounds
    pub round_cooldown: f32,
    pub attack_state: AttackState,
    /// Clock time the last round ended
    pub last_attack: f64,
}

impl Boss {
    pub fn new(lives: u32, arena: &Arena) -> Self {
        let mut boss = Self {
            pos: Vec2::ZERO,
            size: Vec2::splat(BOSS_SIZE),
            speed: BOSS_BASE_SPEED,
            direction: 1.0,
            hp: BOSS_BASE_HP,
            max_hp: BOSS_BASE_HP,
            phase: BossPhase::One,
            lives,
            current_life: 1,
            power_ups_to_spawn: BOSS_POWER_UPS_ON_RESPAWN,
            attack_cooldown: BOSS_BASE_ATTACK_COOLDOWN,
            burst_cooldown: BOSS_BASE_BURST_COOLDOWN,
            max_bursts_per_round: BOSS_BASE_BURSTS_PER_ROUND,
            round_cooldown: BOSS_ROUND_COOLDOWN,
            attack_state: AttackState::Cooldown,
            last_attack: 0.0,
        };
        boss.reset_position(arena);
        boss
    }

    /// Restore every field to its start-of-match value
    pub fn reset(&mut self, lives: u32, arena: &Arena) {
        *self = Self::new(lives, arena);
    }

    fn reset_position(&mut self, arena: &Arena) {
        self.pos = arena.clamp_inside(Vec2::new(BOSS_START_X, BOSS_START_Y), self.size);
        self.direction = 1.0;
    }

    pub fn is_bursting(&self) -> bool {
        matches!(self.attack_state, AttackState::Bursting { .. })
    }

    pub fn is_final_life(&self) -> bool {
        self.current_life >= self.lives
    }

    pub fn tint(&self) -> u32 {
        self.phase.tint()
    }

    /// Advance one tick: bounce movement and the attack cycle.
    ///
    /// `dt` is scaled gameplay time; `now` is the real-time clock the attack
    /// cycle is measured against. Returns any projectiles fired.
    pub fn update(&mut self, dt: f32, now: f64, arena: &Arena, hub: &mut EventHub) -> Vec<Projectile> {
        self.pos.x += self.direction * self.speed * dt;
        let max_x = (arena.width - self.size.x).max(0.0);
        if self.pos.x < 0.0 || self.pos.x > max_x {
            self.pos.x = self.pos.x.clamp(0.0, max_x);
            self.direction = -self.direction;
            hub.publish(GameEvent::Move {
                entity: EntityRef::Boss,
                pos: self.pos,
            });
        }

        match self.attack_state {
            AttackState::Bursting { last_shot, shots } => {
                if now - last_shot > f64::from(self.burst_cooldown) {
                    let fired = self.attack(now, hub);
                    let shots = shots + 1;
                    if shots >= self.max_bursts_per_round {
                        self.attack_state = AttackState::Cooldown;
                        self.last_attack = now;
                    } else {
                        self.attack_state = AttackState::Bursting {
                            last_shot: now,
                            shots,
                        };
                    }
                    return fired;
                }
            }
            AttackState::Cooldown => {
                if now - self.last_attack > f64::from(self.round_cooldown) {
                    self.attack_state = AttackState::Bursting {
                        last_shot: now,
                        shots: 0,
                    };
                }
            }
        }
        Vec::new()
    }

    /// Fire one burst tick using the current phase's pattern
    pub fn attack(&self, now: f64, hub: &mut EventHub) -> Vec<Projectile> {
        hub.publish(GameEvent::Attack {
            source: EntityRef::Boss,
        });

        let muzzle = Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y);
        let spin = (now * f64::from(SPIRAL_SPIN)).rem_euclid(std::f64::consts::TAU) as f32;
        match self.phase {
            BossPhase::One => (-2..=2)
                .map(|i| {
                    let offset = i as f32;
                    let pos = Vec2::new(muzzle.x + offset * SPREAD_SPACING - PROJECTILE_WIDTH / 2.0, muzzle.y);
                    let vel = Vec2::new(offset * SPREAD_VX_STEP, SPREAD_VY);
                    Projectile::new(pos, vel, false)
                })
                .collect(),
            BossPhase::Two => (0..SPIRAL_ARMS)
                .map(|i| {
                    let angle = (spin + i as f32 * PI / 4.0) % TAU;
                    let pos = Vec2::new(muzzle.x - PROJECTILE_WIDTH / 2.0, muzzle.y);
                    let vel = Vec2::new(
                        angle.cos() * SPIRAL_SPEED,
                        angle.sin() * SPIRAL_SPEED + SPIRAL_VERTICAL_BIAS,
                    );
                    Projectile::new(pos, vel, false)
                })
                .collect(),
        }
    }

    /// Apply damage, handling the phase change and death/respawn.
    ///
    /// Cross-entity consequences (power-up drops, healing the player, score,
    /// ending the match) are left to the caller via the returned `BossDamage`.
    pub fn take_damage(&mut self, amount: f32, arena: &Arena, hub: &mut EventHub) -> BossDamage {
        let old_hp = self.hp;
        self.hp = (self.hp - amount).max(0.0);
        hub.publish(GameEvent::Damage {
            target: EntityRef::Boss,
            amount,
        });

        let mut result = BossDamage::default();
        let half = self.max_hp * 0.5;
        if self.phase == BossPhase::One && self.hp <= half && old_hp > half {
            self.enter_phase_two(hub);
            result.phase_changed = true;
        }

        if self.hp <= 0.0 {
            result.death = Some(self.on_death(arena, hub));
        }
        result
    }

    fn enter_phase_two(&mut self, hub: &mut EventHub) {
        self.phase = BossPhase::Two;
        self.attack_cooldown *= 0.5;
        self.speed *= 1.5;
        log::info!("Boss entered phase 2 (life {}/{})", self.current_life, self.lives);
        hub.publish(GameEvent::PhaseChange {
            phase: BossPhase::Two,
        });
    }

    fn on_death(&mut self, arena: &Arena, hub: &mut EventHub) -> BossDeath {
        hub.publish(GameEvent::Death {
            entity: EntityRef::Boss,
        });

        if self.is_final_life() {
            log::info!("Boss defeated on final life {}", self.current_life);
            BossDeath::Defeated
        } else {
            self.respawn(arena, hub);
            BossDeath::Respawned {
                life: self.current_life,
            }
        }
    }

    /// Come back for the next life with scaled difficulty
    pub fn respawn(&mut self, arena: &Arena, hub: &mut EventHub) {
        self.current_life += 1;
        self.phase = BossPhase::One;

        let difficulty = self.current_life as f32;
        self.max_hp = (BOSS_BASE_HP * difficulty).floor();
        self.hp = self.max_hp;
        self.speed = (BOSS_BASE_SPEED * difficulty).floor();
        self.attack_cooldown = (BOSS_BASE_ATTACK_COOLDOWN / difficulty).max(BOSS_MIN_ATTACK_COOLDOWN);
        self.burst_cooldown = (BOSS_BASE_BURST_COOLDOWN / difficulty).max(BOSS_MIN_BURST_COOLDOWN);
        self.max_bursts_per_round =
            (BOSS_BASE_BURSTS_PER_ROUND + self.current_life).min(BOSS_MAX_BURSTS_PER_ROUND);

        self.reset_position(arena);
        self.attack_state = AttackState::Cooldown;

        log::info!(
            "Boss respawned: life {}/{}, max_hp {}, speed {}",
            self.current_life,
            self.lives,
            self.max_hp,
            self.speed
        );
        hub.publish(GameEvent::BossRespawn {
            life: self.current_life,
            lives: self.lives,
        });
    }

    /// Positions of the power-ups dropped on respawn: a ring around `center`
    pub fn respawn_drop_points(&self, center: Vec2) -> Vec<Vec2> {
        (0..self.power_ups_to_spawn)
            .map(|i| {
                let angle = (i as f32 / 3.0) * TAU;
                center + Vec2::new(angle.cos(), angle.sin()) * RESPAWN_RING_RADIUS
            })
            .collect()
    }
}

impl Body for Boss {
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
