//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod boss;
pub mod collision;
pub mod engine;
pub mod events;
pub mod player;
pub mod powerup;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod weapon;

pub use boss::{AttackState, Boss, BossDamage, BossDeath, BossPhase};
pub use collision::{Body, Rect, bodies_overlap, overlaps};
pub use engine::Simulation;
pub use events::{EntityRef, EventHub, EventKind, GameEvent, SubscriptionId};
pub use player::Player;
pub use powerup::{PowerUp, PowerUpKind, PowerUpTimers};
pub use projectile::{Projectile, TargetId, TargetProvider};
pub use snapshot::Snapshot;
pub use state::{Arena, GameState, MatchState, WorldQuery};
pub use tick::{TickInput, tick};
pub use weapon::{ShotFlags, Weapon};
