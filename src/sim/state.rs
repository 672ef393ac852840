//! Game state and core simulation types
//!
//! Everything needed to continue or replay a match lives in `GameState`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::collision::{Body, Rect};
use super::player::Player;
use super::powerup::{PowerUp, PowerUpKind};
use super::projectile::{Projectile, TargetId, TargetProvider};
use crate::settings::Settings;

/// Match outcome state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchState {
    /// Active gameplay
    Running,
    /// Player died
    GameOver,
    /// Boss lost its final life
    Victory,
}

impl MatchState {
    pub fn is_over(&self) -> bool {
        !matches!(self, MatchState::Running)
    }
}

/// The playfield: origin top-left, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Clamp a top-left position so a box of `size` stays inside the arena
    pub fn clamp_inside(&self, pos: Vec2, size: Vec2) -> Vec2 {
        let max = (Vec2::new(self.width, self.height) - size).max(Vec2::ZERO);
        pos.clamp(Vec2::ZERO, max)
    }
}

/// Read-only world view handed to projectiles for homing
pub struct WorldQuery<'a> {
    boss: &'a Boss,
}

impl<'a> WorldQuery<'a> {
    pub fn new(boss: &'a Boss) -> Self {
        Self { boss }
    }
}

impl TargetProvider for WorldQuery<'_> {
    fn acquire_target(&self) -> Option<TargetId> {
        self.boss.is_alive().then_some(TargetId::Boss)
    }

    fn target_center(&self, id: TargetId) -> Option<Vec2> {
        match id {
            TargetId::Boss => self.boss.is_alive().then(|| self.boss.center()),
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Settings the match was created with (restart goes back to these)
    pub settings: Settings,
    pub arena: Arena,
    /// Power-up rolls
    rng: Pcg32,
    pub match_state: MatchState,
    pub score: u64,
    /// Gameplay time multiplier applied by the frame clock
    pub time_scale: f32,
    /// Real seconds since start; cooldown clocks run on this
    pub clock: f64,
    /// Scaled gameplay seconds since start
    pub elapsed: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub boss: Boss,
    /// Active projectiles (spawn order)
    pub projectiles: Vec<Projectile>,
    /// Uncollected power-ups (spawn order)
    pub power_ups: Vec<PowerUp>,
    /// Real seconds until the scheduled random power-up spawns
    pub power_up_countdown: Option<f32>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh match. `settings` are assumed valid (see `Settings::validate`).
    pub fn new(settings: &Settings) -> Self {
        let arena = settings.arena();
        Self {
            settings: settings.clone(),
            arena,
            rng: Pcg32::seed_from_u64(settings.seed),
            match_state: MatchState::Running,
            score: 0,
            time_scale: settings.time_scale,
            clock: 0.0,
            elapsed: 0.0,
            time_ticks: 0,
            player: Player::new(&arena),
            boss: Boss::new(settings.boss_lives, &arena),
            projectiles: Vec::new(),
            power_ups: Vec::new(),
            power_up_countdown: settings.initial_power_up_delay,
            next_id: 1,
        }
    }

    /// Reset every field to its start-of-match value in place
    pub fn restart(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.settings.seed);
        self.match_state = MatchState::Running;
        self.score = 0;
        self.time_scale = self.settings.time_scale;
        self.clock = 0.0;
        self.elapsed = 0.0;
        self.time_ticks = 0;
        self.player.reset(&self.arena);
        self.boss.reset(self.settings.boss_lives, &self.arena);
        self.projectiles.clear();
        self.power_ups.clear();
        self.power_up_countdown = self.settings.initial_power_up_delay;
        self.next_id = 1;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_projectile(&mut self, mut projectile: Projectile) {
        projectile.id = self.next_entity_id();
        self.projectiles.push(projectile);
    }

    pub fn add_power_up(&mut self, mut power_up: PowerUp) -> u32 {
        power_up.id = self.next_entity_id();
        let id = power_up.id;
        self.power_ups.push(power_up);
        id
    }

    /// Uniform pick from `pool`
    pub fn roll_kind(&mut self, pool: &[PowerUpKind]) -> PowerUpKind {
        pool[self.rng.random_range(0..pool.len())]
    }

    /// Random spawn point for scheduled power-ups (upper part of the arena)
    pub fn roll_spawn_point(&mut self) -> Vec2 {
        let x = self.rng.random_range(0.0..1.0f32) * (self.arena.width - 50.0) + 25.0;
        let y = self.rng.random_range(0.0..1.0f32) * (self.arena.height * 0.6) + 100.0;
        Vec2::new(x, y)
    }

    /// Homing query over the current boss
    pub fn world_query(&self) -> WorldQuery<'_> {
        WorldQuery::new(&self.boss)
    }

    /// Drop entities flagged dead
    pub fn prune(&mut self) {
        self.projectiles.retain(|p| p.alive);
        self.power_ups.retain(|p| p.alive);
    }
}
