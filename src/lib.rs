//! Boss Arena - a 2D arena boss fight
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, boss state machine, power-ups)
//! - `settings`: Arena and run configuration
//! - `frame`: Fixed-step frame clock driving the simulation
//!
//! Rendering, audio and input devices live outside this crate. They feed
//! [`sim::TickInput`] in, subscribe to [`sim::GameEvent`]s and read
//! [`sim::Snapshot`]s out.

pub mod error;
pub mod frame;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, Result};
pub use frame::FrameClock;
pub use settings::Settings;
pub use sim::Simulation;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta the frame clock accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 400.0;
    pub const PLAYER_START_Y: f32 = 500.0;
    pub const PLAYER_SIZE: f32 = 60.0;
    pub const PLAYER_SPEED: f32 = 350.0;
    pub const PLAYER_MAX_HP: f32 = 100.0;
    pub const SHIELD_MAX: f32 = 100.0;
    /// Shield points regenerated per second while shield regen is active
    pub const SHIELD_REGEN_RATE: f32 = 25.0;
    /// Immunity granted after every hit (seconds)
    pub const HIT_IMMUNITY: f32 = 2.0;

    /// Weapon defaults
    pub const WEAPON_COOLDOWN: f32 = 0.25;
    pub const RAPID_FIRE_COOLDOWN: f32 = 0.1;
    pub const PLAYER_SHOT_SPEED: f32 = 500.0;
    /// Horizontal velocity step between triple-shot projectiles
    pub const TRIPLE_SHOT_SPREAD: f32 = 100.0;
    /// Horizontal spawn spacing between triple-shot projectiles
    pub const TRIPLE_SHOT_SPACING: f32 = 15.0;

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: f32 = 16.0;
    pub const PROJECTILE_HEIGHT: f32 = 24.0;
    pub const HOMING_STRENGTH: f32 = 1000.0;
    pub const HOMING_MAX_SPEED: f32 = 600.0;
    pub const PLAYER_SHOT_DAMAGE: f32 = 25.0;
    pub const BOSS_SHOT_DAMAGE: f32 = 20.0;

    /// Boss defaults (life 1)
    pub const BOSS_START_X: f32 = 350.0;
    pub const BOSS_START_Y: f32 = 60.0;
    pub const BOSS_SIZE: f32 = 150.0;
    pub const BOSS_BASE_HP: f32 = 800.0;
    pub const BOSS_BASE_SPEED: f32 = 80.0;
    pub const BOSS_BASE_ATTACK_COOLDOWN: f32 = 0.8;
    pub const BOSS_BASE_BURST_COOLDOWN: f32 = 0.2;
    pub const BOSS_BASE_BURSTS_PER_ROUND: u32 = 5;
    pub const BOSS_MAX_BURSTS_PER_ROUND: u32 = 10;
    /// Idle time between burst rounds
    pub const BOSS_ROUND_COOLDOWN: f32 = 3.0;
    pub const BOSS_MIN_ATTACK_COOLDOWN: f32 = 0.3;
    pub const BOSS_MIN_BURST_COOLDOWN: f32 = 0.1;
    pub const BOSS_LIVES: u32 = 5;
    pub const BOSS_POWER_UPS_ON_RESPAWN: u32 = 2;

    /// Phase 1 spread pattern
    pub const SPREAD_SPACING: f32 = 20.0;
    pub const SPREAD_VX_STEP: f32 = 60.0;
    pub const SPREAD_VY: f32 = 250.0;
    /// Phase 2 spiral pattern
    pub const SPIRAL_ARMS: u32 = 8;
    pub const SPIRAL_SPIN: f32 = 3.0;
    pub const SPIRAL_SPEED: f32 = 200.0;
    pub const SPIRAL_VERTICAL_BIAS: f32 = 100.0;

    /// Power-ups
    pub const POWER_UP_SIZE: f32 = 36.0;
    pub const POWER_UP_DURATION: f32 = 15.0;
    pub const INVINCIBILITY_DURATION: f32 = 5.0;
    pub const HEALTH_BONUS: f32 = 50.0;
    pub const SHIELD_BONUS: f32 = 50.0;
    /// Distance of respawn power-ups from the arena centre
    pub const RESPAWN_RING_RADIUS: f32 = 60.0;
    /// Delay before the first random power-up appears (seconds)
    pub const INITIAL_POWER_UP_DELAY: f32 = 5.0;

    /// Scoring
    pub const POWER_UP_SCORE: f32 = 100.0;
    pub const SURVIVAL_SCORE_RATE: f32 = 10.0;
    pub const BOSS_LIFE_BONUS: u64 = 500;
    pub const VICTORY_BONUS: u64 = 1000;
}
