//! Simulation tick
//!
//! Core loop that advances the match by one step:
//! entities, projectile/power-up motion, collision resolution, pruning, score.

use std::ops::BitOr;

use glam::Vec2;

use super::boss::BossDeath;
use super::collision::{Body, overlaps};
use super::events::{EventHub, GameEvent};
use super::powerup::{PowerUp, PowerUpKind};
use super::state::{GameState, MatchState};
use crate::consts::*;

/// Abstract player intent for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

impl TickInput {
    /// Per-axis movement direction (each component -1, 0 or 1)
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }

    pub fn has_movement(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Merge two input sources (keyboard | controller): either can trigger an intent
impl BitOr for TickInput {
    type Output = TickInput;

    fn bitor(self, rhs: TickInput) -> TickInput {
        TickInput {
            left: self.left || rhs.left,
            right: self.right || rhs.right,
            up: self.up || rhs.up,
            down: self.down || rhs.down,
            fire: self.fire || rhs.fire,
        }
    }
}

/// Advance the game state by one step.
///
/// `dt` is gameplay time (already time-scaled); `real_dt` is unscaled elapsed
/// time, which drives the weapon and boss cooldown clocks, the scheduled
/// power-up and survival score.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, real_dt: f32, hub: &mut EventHub) {
    if state.match_state.is_over() {
        return;
    }

    state.time_ticks += 1;
    state.clock += f64::from(real_dt);
    state.elapsed += f64::from(dt);
    let now = state.clock;

    if let Some(countdown) = state.power_up_countdown.as_mut() {
        *countdown -= real_dt;
        if *countdown <= 0.0 {
            state.power_up_countdown = None;
            let pos = state.roll_spawn_point();
            spawn_power_up(state, pos, None, hub);
        }
    }

    let shots = state.player.update(dt, now, input, &state.arena, hub);
    for shot in shots {
        state.add_projectile(shot);
    }
    let shots = state.boss.update(dt, now, &state.arena, hub);
    for shot in shots {
        state.add_projectile(shot);
    }

    let query = super::state::WorldQuery::new(&state.boss);
    for projectile in state.projectiles.iter_mut() {
        projectile.advance(dt, &state.arena, &query);
    }
    for power_up in state.power_ups.iter_mut() {
        power_up.update(dt);
    }
    state.prune();

    resolve_collisions(state, hub);
    state.prune();

    state.score += (real_dt * SURVIVAL_SCORE_RATE * state.player.score_multiplier).floor() as u64;
}

/// Projectile hits in spawn order, then power-up pickups
fn resolve_collisions(state: &mut GameState, hub: &mut EventHub) {
    for i in 0..state.projectiles.len() {
        // The match is decided: later hits in the same tick change nothing
        if state.match_state.is_over() {
            return;
        }
        let projectile = &state.projectiles[i];
        if !projectile.alive {
            continue;
        }
        let rect = projectile.rect();
        let from_player = projectile.from_player;

        if from_player && state.boss.is_alive() && overlaps(&rect, &state.boss.rect()) {
            let damage = PLAYER_SHOT_DAMAGE * state.player.damage_multiplier;
            damage_boss(state, damage, hub);

            let projectile = &mut state.projectiles[i];
            if !projectile.piercing {
                projectile.alive = false;
            }
            hub.publish(GameEvent::ProjectileHit {
                pos: rect.center(),
                from_player,
            });
        }

        if !from_player && state.player.is_alive() && overlaps(&rect, &state.player.rect()) {
            if state.player.take_damage(BOSS_SHOT_DAMAGE, hub) {
                end_match(state, MatchState::GameOver, hub);
            }
            state.projectiles[i].alive = false;
            hub.publish(GameEvent::ProjectileHit {
                pos: rect.center(),
                from_player,
            });
        }
    }

    if state.match_state.is_over() {
        return;
    }
    for i in 0..state.power_ups.len() {
        let power_up = &state.power_ups[i];
        if !power_up.alive || !state.player.is_alive() || !overlaps(&power_up.rect(), &state.player.rect()) {
            continue;
        }
        let kind = power_up.kind;
        let pos = power_up.center();

        state.player.apply_power_up(kind, None);
        state.score += (POWER_UP_SCORE * state.player.score_multiplier) as u64;
        state.power_ups[i].alive = false;
        hub.publish(GameEvent::PowerUpCollected { kind, pos });
    }
}

/// Damage the boss and carry out the match-level consequences
pub(crate) fn damage_boss(state: &mut GameState, amount: f32, hub: &mut EventHub) {
    let result = state.boss.take_damage(amount, &state.arena, hub);
    state.score += amount.floor() as u64;

    if result.phase_changed {
        let center = state.arena.center();
        spawn_power_up(state, center, None, hub);
    }

    match result.death {
        Some(BossDeath::Respawned { .. }) => {
            state.score += BOSS_LIFE_BONUS;
            let heal = state.player.max_hp * 0.5;
            state.player.heal(heal);

            let center = state.arena.center();
            for pos in state.boss.respawn_drop_points(center) {
                let kind = state.roll_kind(&PowerUpKind::RESPAWN_POOL);
                spawn_power_up(state, pos, Some(kind), hub);
            }
        }
        Some(BossDeath::Defeated) => {
            state.score += VICTORY_BONUS;
            end_match(state, MatchState::Victory, hub);
        }
        None => {}
    }
}

/// Spawn a power-up centred on `pos`; a missing kind is rolled from all kinds
pub(crate) fn spawn_power_up(
    state: &mut GameState,
    pos: Vec2,
    kind: Option<PowerUpKind>,
    hub: &mut EventHub,
) -> u32 {
    let kind = kind.unwrap_or_else(|| state.roll_kind(&PowerUpKind::ALL));
    let id = state.add_power_up(PowerUp::new(pos, kind));
    log::debug!("Spawned {} power-up at ({:.0}, {:.0})", kind.as_str(), pos.x, pos.y);
    hub.publish(GameEvent::PowerUpSpawned { kind, pos });
    id
}

fn end_match(state: &mut GameState, outcome: MatchState, hub: &mut EventHub) {
    if state.match_state.is_over() {
        return;
    }
    state.match_state = outcome;
    match outcome {
        MatchState::Victory => log::info!("Victory! Final score: {}", state.score),
        MatchState::GameOver => log::info!("Game over. Final score: {}", state.score),
        MatchState::Running => {}
    }
    hub.publish(GameEvent::MatchEnded { state: outcome });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::boss::BossPhase;
    use crate::sim::projectile::Projectile;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn quiet_state() -> GameState {
        GameState::new(&Settings {
            initial_power_up_delay: None,
            ..Default::default()
        })
    }

    /// Park a projectile so it overlaps the boss after this tick's movement
    fn shot_at_boss(state: &GameState) -> Projectile {
        let c = state.boss.center();
        Projectile::new(Vec2::new(c.x - 8.0, c.y), Vec2::ZERO, true)
    }

    fn step(state: &mut GameState, input: &TickInput, hub: &mut EventHub) {
        tick(state, input, DT, DT, hub);
    }

    #[test]
    fn test_input_merge() {
        let keyboard = TickInput {
            left: true,
            ..Default::default()
        };
        let pad = TickInput {
            fire: true,
            ..Default::default()
        };
        let merged = keyboard | pad;
        assert!(merged.left && merged.fire && !merged.right);
        assert_eq!(merged.direction(), Vec2::new(-1.0, 0.0));

        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(both.direction(), Vec2::ZERO);
        assert!(both.has_movement());
    }

    #[test]
    fn test_player_shot_damages_boss() {
        let mut state = quiet_state();
        let mut hub = EventHub::new();
        let shot = shot_at_boss(&state);
        state.add_projectile(shot);

        step(&mut state, &TickInput::default(), &mut hub);
        assert_eq!(state.boss.hp, 775.0);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, 25);
    }

    #[test]
    fn test_piercing_shot_survives_two_hits() {
        let mut state = quiet_state();
        let mut hub = EventHub::new();
        let mut shot = shot_at_boss(&state);
        shot.piercing = true;
        state.add_projectile(shot);

        step(&mut state, &TickInput::default(), &mut hub);
        step(&mut state, &TickInput::default(), &mut hub);

        assert_eq!(state.projectiles.len(), 1);
        assert!(state.projectiles[0].alive);
        assert_eq!(state.boss.hp, 750.0);
    }

    #[test]
    fn test_damage_multiplier_applies() {
        let mut state = quiet_state();
        let mut hub = EventHub::new();
        state.player.apply_power_up(PowerUpKind::DamageBoost, None);
        let shot = shot_at_boss(&state);
        state.add_projectile(shot);

        step(&mut state, &TickInput::default(), &mut hub);
        assert_eq!(state.boss.hp, 750.0);
    }

    #[test]
    fn test_boss_shot_hits_player() {
        let mut state = quiet_state();
        let mut hub = EventHub::new();
        let c = state.player.center();
        state.add_projectile(Projectile::new(Vec2::new(c.x - 8.0, c.y - 12.0), Vec2::ZERO, false));

        step(&mut state, &TickInput::default(), &mut hub);
        assert_eq!(state.player.hp, 80.0);
        assert!(state.player.invincible);
        assert!(state.projectiles.is_empty());

        // Immune for the next hit
        state.add_projectile(Projectile::new(Vec2::new(c.x - 8.0, c.y - 12.0), Vec2::ZERO, false));
        step(&mut state, &TickInput::default(), &mut hub);
        assert_eq!(state.player.hp, 80.0);
    }

    #[test]
    fn test_player_death_is_game_over() {
        let mut state = quiet_state();
        let mut hub = EventHub::new();
        state.player.hp = 10.0;
        let c = state.player.center();
        state.add_projectile(Projectile::new(Vec2::new(c.x - 8.0, c.y - 12.0), Vec2::ZERO, false));

        step(&mut state, &TickInput::default(), &mut hub);
        assert_eq!(state.match_state, MatchState::GameOver);

        // Terminal: nothing advances any more
        let ticks = state.time_ticks;
        step(&mut state, &TickInput::default(), &mut hub);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_phase_change_drops_power_up() {
        let mut state = quiet_state();
        let mut hub = EventHub::new();
        state.boss.hp = 410.0;
        let shot = shot_at_boss(&state);
        state.add_projectile(shot);

        step(&mut state, &TickInput::default(), &mut hub);
        assert_eq!(state.boss.phase, BossPhase::Two);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_ups[0].center().x, state.arena.center().x);
    }

    #[test]
    fn test_boss_respawn_heals_player_and_drops_ring() {
        let mut state = quiet_state();
        let mut hub = EventHub::new();
        state.boss.hp = 20.0;
        state.player.hp = 30.0;
        let shot = shot_at_boss(&state);
        state.add_projectile(shot);

        step(&mut state, &TickInput::default(), &mut hub);
        assert_eq!(state.boss.current_life, 2);
        assert_eq!(state.boss.max_hp, 1600.0);
        assert_eq!(state.player.hp, 80.0);
        assert_eq!(state.power_ups.len(), 2);
        assert!(state.power_ups.iter().all(|p| PowerUpKind::RESPAWN_POOL.contains(&p.kind)));
        assert_eq!(state.score, 25 + BOSS_LIFE_BONUS);
        assert_eq!(state.match_state, MatchState::Running);
    }

    #[test]
    fn test_final_life_is_victory() {
        let mut state = quiet_state();
        let mut hub = EventHub::new();
        state.boss.current_life = 5;
        state.boss.hp = 5.0;
        let shot = shot_at_boss(&state);
        state.add_projectile(shot);
        let shot = shot_at_boss(&state);
        state.add_projectile(shot);

        step(&mut state, &TickInput::default(), &mut hub);
        assert_eq!(state.match_state, MatchState::Victory);
        assert_eq!(state.boss.current_life, 5);
        // Second shot finds a dead boss and is left alone
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.score, 25 + VICTORY_BONUS);
    }

    /// Boss shot at index 0 lands on the player, player shot at index 1 on the boss
    fn trade_hits(state: &mut GameState) {
        let c = state.player.center();
        state.add_projectile(Projectile::new(Vec2::new(c.x - 8.0, c.y - 12.0), Vec2::ZERO, false));
        let shot = shot_at_boss(state);
        state.add_projectile(shot);
    }

    #[test]
    fn test_no_victory_after_game_over() {
        let mut state = quiet_state();
        let mut hub = EventHub::new();
        state.player.hp = 10.0;
        state.boss.current_life = 5;
        state.boss.hp = 5.0;
        trade_hits(&mut state);

        step(&mut state, &TickInput::default(), &mut hub);
        assert_eq!(state.match_state, MatchState::GameOver);
        assert_eq!(state.boss.hp, 5.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_no_respawn_after_game_over() {
        let mut state = quiet_state();
        let mut hub = EventHub::new();
        state.player.hp = 10.0;
        state.boss.hp = 20.0;
        trade_hits(&mut state);

        step(&mut state, &TickInput::default(), &mut hub);
        assert_eq!(state.match_state, MatchState::GameOver);
        assert_eq!(state.player.hp, 0.0);
        assert_eq!(state.boss.current_life, 1);
        assert!(state.power_ups.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_weapon_keeps_firing_late_in_a_long_match() {
        let mut state = quiet_state();
        let mut hub = EventHub::new();
        state.clock = 300_000.0;
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        for _ in 0..40 {
            tick(&mut state, &input, SIM_DT, SIM_DT, &mut hub);
        }
        let player_shots = state.projectiles.iter().filter(|p| p.from_player).count();
        assert_eq!(player_shots, 2);
    }

    #[test]
    fn test_power_up_collection() {
        let mut state = quiet_state();
        let mut hub = EventHub::new();
        state.player.apply_power_up(PowerUpKind::DoubleScore, None);
        let c = state.player.center();
        spawn_power_up(&mut state, c, Some(PowerUpKind::Health), &mut hub);
        state.player.hp = 10.0;

        step(&mut state, &TickInput::default(), &mut hub);
        assert!(state.power_ups.is_empty());
        assert_eq!(state.player.hp, 60.0);
        assert_eq!(state.score, 200);
    }

    #[test]
    fn test_scheduled_power_up() {
        let mut state = GameState::new(&Settings {
            initial_power_up_delay: Some(0.05),
            ..Default::default()
        });
        let mut hub = EventHub::new();

        step(&mut state, &TickInput::default(), &mut hub);
        assert!(state.power_ups.is_empty());
        for _ in 0..3 {
            step(&mut state, &TickInput::default(), &mut hub);
        }
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_up_countdown, None);
    }

    #[test]
    fn test_survival_score() {
        let mut state = quiet_state();
        let mut hub = EventHub::new();
        tick(&mut state, &TickInput::default(), 0.5, 0.5, &mut hub);
        assert_eq!(state.score, 5);

        state.player.score_multiplier = 2.0;
        tick(&mut state, &TickInput::default(), 0.5, 0.5, &mut hub);
        assert_eq!(state.score, 15);
    }

    #[test]
    fn test_fire_spawns_projectile() {
        let mut state = quiet_state();
        let mut hub = EventHub::new();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        step(&mut state, &input, &mut hub);
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.projectiles[0].from_player);
    }

    fn input_strategy() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(left, right, up, down, fire)| TickInput {
                left,
                right,
                up,
                down,
                fire,
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_hp_bounds_hold_every_tick(
            inputs in proptest::collection::vec(input_strategy(), 1..600),
            seed in any::<u64>(),
        ) {
            let mut state = GameState::new(&Settings { seed, initial_power_up_delay: Some(0.5), ..Default::default() });
            let mut hub = EventHub::new();
            for input in &inputs {
                tick(&mut state, input, 0.05, 0.05, &mut hub);
                prop_assert!(state.player.hp >= 0.0 && state.player.hp <= state.player.max_hp);
                prop_assert!(state.boss.hp >= 0.0 && state.boss.hp <= state.boss.max_hp);
                prop_assert!(state.player.shield >= 0.0 && state.player.shield <= SHIELD_MAX);
            }
        }
    }
}
