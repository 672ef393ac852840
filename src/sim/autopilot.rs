//! Demo-mode input: a simple bot that plays the match
//!
//! Priority each tick: sidestep the nearest threatening boss shot, otherwise
//! grab a power-up, otherwise line up under the boss. It always fires.

use glam::Vec2;

use super::collision::Body;
use super::state::GameState;
use super::tick::TickInput;

/// How far above the player a falling shot counts as a threat
const THREAT_RANGE: f32 = 180.0;
/// Extra horizontal clearance around the player when judging threats
const THREAT_MARGIN: f32 = 12.0;
/// Ignore offsets smaller than this to avoid jitter
const DEAD_ZONE: f32 = 4.0;
/// Preferred gap between the player and the bottom edge
const HOME_GAP: f32 = 40.0;

impl TickInput {
    /// Intent for the current state
    pub fn autopilot(state: &GameState) -> Self {
        let mut input = TickInput {
            fire: true,
            ..Default::default()
        };
        if state.match_state.is_over() {
            return input;
        }

        let player = state.player.rect();
        let center = player.center();

        if let Some(threat) = nearest_threat(state) {
            // Step away from the shot, unless that side is walled off
            let room_left = player.pos.x;
            let room_right = state.arena.width - player.right();
            let go_left = if threat.x > center.x {
                room_left > player.size.x * 0.5
            } else {
                room_right <= player.size.x * 0.5
            };
            input.left = go_left;
            input.right = !go_left;
            return input;
        }

        let goal = nearest_power_up(state, center).unwrap_or_else(|| {
            let home_y = state.arena.height - HOME_GAP - player.size.y * 0.5;
            Vec2::new(state.boss.center().x, home_y)
        });

        let delta = goal - center;
        input.left = delta.x < -DEAD_ZONE;
        input.right = delta.x > DEAD_ZONE;
        input.up = delta.y < -DEAD_ZONE;
        input.down = delta.y > DEAD_ZONE;
        input
    }
}

/// Centre of the closest boss shot falling toward the player's column
fn nearest_threat(state: &GameState) -> Option<Vec2> {
    let player = state.player.rect();
    let center = player.center();

    state
        .projectiles
        .iter()
        .filter(|p| p.alive && !p.from_player && p.vel.y > 0.0)
        .map(|p| p.center())
        .filter(|c| {
            (c.x - center.x).abs() < player.size.x * 0.5 + THREAT_MARGIN
                && c.y < player.bottom()
                && player.pos.y - c.y < THREAT_RANGE
        })
        .min_by(|a, b| center.distance_squared(*a).total_cmp(&center.distance_squared(*b)))
}

fn nearest_power_up(state: &GameState, from: Vec2) -> Option<Vec2> {
    state
        .power_ups
        .iter()
        .filter(|p| p.alive)
        .map(|p| p.center())
        .min_by(|a, b| from.distance_squared(*a).total_cmp(&from.distance_squared(*b)))
}
