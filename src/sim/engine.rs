//! Match orchestrator
//!
//! Owns the game state and the event hub. External layers drive it with
//! `tick`, listen through subscriptions and read `snapshot`s back.

use glam::Vec2;

use super::events::{EventHub, EventKind, GameEvent, SubscriptionId};
use super::powerup::PowerUpKind;
use super::snapshot::Snapshot;
use super::state::GameState;
use super::tick::{self, TickInput};
use crate::error::{ConfigError, Result};
use crate::settings::Settings;

#[derive(Debug)]
pub struct Simulation {
    state: GameState,
    hub: EventHub,
}

impl Simulation {
    /// Start a match. Fails only on invalid settings.
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        log::info!(
            "Match started: arena {}x{}, boss lives {}, seed {:#x}",
            settings.arena_width,
            settings.arena_height,
            settings.boss_lives,
            settings.seed
        );
        Ok(Self {
            state: GameState::new(&settings),
            hub: EventHub::new(),
        })
    }

    /// Advance one step. `dt` is scaled gameplay time, `real_dt` unscaled.
    pub fn tick(&mut self, input: &TickInput, dt: f32, real_dt: f32) {
        tick::tick(&mut self.state, input, dt, real_dt, &mut self.hub);
    }

    /// Back to the start of the match with the same settings.
    /// Subscriptions survive a restart.
    pub fn restart(&mut self) {
        self.state.restart();
        log::info!("Match restarted");
    }

    /// Drop a power-up centred on `pos`; a missing kind is rolled at random
    pub fn spawn_power_up(&mut self, pos: Vec2, kind: Option<PowerUpKind>) -> u32 {
        tick::spawn_power_up(&mut self.state, pos, kind, &mut self.hub)
    }

    pub fn subscribe(&mut self, kind: EventKind, callback: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.hub.subscribe(kind, callback)
    }

    pub fn subscribe_all(&mut self, callback: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.hub.subscribe_all(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.hub.unsubscribe(id)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn time_scale(&self) -> f32 {
        self.state.time_scale
    }

    /// Scale gameplay time (slow motion below 1.0). Cooldown clocks keep real time.
    pub fn set_time_scale(&mut self, scale: f32) -> Result<()> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ConfigError::InvalidTimeScale(scale));
        }
        self.state.time_scale = scale;
        Ok(())
    }
}
