//! Read-only copy of the match for presentation layers
//!
//! Built after a tick so renderers and HUDs never hold a borrow on the
//! simulation while they draw.

use glam::Vec2;
use serde::Serialize;

use super::boss::BossPhase;
use super::collision::Body;
use super::powerup::PowerUpKind;
use super::state::{GameState, MatchState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub shield: f32,
    pub invincible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BossView {
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub phase: BossPhase,
    pub current_life: u32,
    pub lives: u32,
    pub bursting: bool,
    /// RGB
    pub tint: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub from_player: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpView {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub tint: u32,
}

/// Everything a frame needs to draw the arena and HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub match_state: MatchState,
    pub score: u64,
    pub elapsed: f64,
    pub time_scale: f32,
    pub player: PlayerView,
    pub boss: BossView,
    pub projectiles: Vec<ProjectileView>,
    pub power_ups: Vec<PowerUpView>,
    /// Active timed power-ups and their remaining seconds
    pub timers: Vec<(PowerUpKind, f32)>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        let boss = &state.boss;

        Self {
            match_state: state.match_state,
            score: state.score,
            elapsed: state.elapsed,
            time_scale: state.time_scale,
            player: PlayerView {
                pos: player.pos,
                size: player.size,
                hp: player.hp,
                max_hp: player.max_hp,
                shield: player.shield,
                invincible: player.invincible,
            },
            boss: BossView {
                pos: boss.pos,
                size: boss.size,
                hp: boss.hp,
                max_hp: boss.max_hp,
                phase: boss.phase,
                current_life: boss.current_life,
                lives: boss.lives,
                bursting: boss.is_bursting(),
                tint: boss.tint(),
            },
            projectiles: state
                .projectiles
                .iter()
                .filter(|p| p.is_alive())
                .map(|p| ProjectileView {
                    id: p.id,
                    pos: p.pos,
                    size: p.size,
                    from_player: p.from_player,
                })
                .collect(),
            power_ups: state
                .power_ups
                .iter()
                .filter(|p| p.is_alive())
                .map(|p| PowerUpView {
                    id: p.id,
                    kind: p.kind,
                    pos: p.pos,
                    size: p.size,
                    tint: p.kind.tint(),
                })
                .collect(),
            timers: player.timers.iter().collect(),
        }
    }
}
