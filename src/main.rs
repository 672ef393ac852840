//! Boss Arena headless runner
//!
//! Plays one match on autopilot and prints a JSON summary.
//!
//! Usage: `boss-arena [settings.json]` (set `RUST_LOG=debug` for event logs)

use serde::Serialize;

use boss_arena::consts::SIM_DT;
use boss_arena::sim::{GameEvent, MatchState, TickInput};
use boss_arena::{ConfigError, FrameClock, Settings, Simulation};

/// Frame delta the runner pretends to render at
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after this much simulated time
const MAX_RUN_SECONDS: f32 = 600.0;

#[derive(Debug, Serialize)]
struct Summary {
    match_state: MatchState,
    score: u64,
    boss_life: u32,
    boss_lives: u32,
    player_hp: f32,
    elapsed: f64,
    ticks: u64,
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    let mut sim = Simulation::new(settings)?;
    sim.subscribe_all(|event| match event {
        GameEvent::Move { .. } | GameEvent::Attack { .. } => log::trace!("{:?}", event),
        _ => log::debug!("{:?}", event),
    });

    let mut clock = FrameClock::new();
    let frames = (MAX_RUN_SECONDS / FRAME_DT) as u32;
    for _ in 0..frames {
        let input = TickInput::autopilot(sim.state());
        clock.step(&mut sim, FRAME_DT, &input);
        if sim.state().match_state.is_over() {
            break;
        }
    }

    let state = sim.state();
    if !state.match_state.is_over() {
        log::warn!("Match still running after {} s of play", MAX_RUN_SECONDS);
    }

    let summary = Summary {
        match_state: state.match_state,
        score: state.score,
        boss_life: state.boss.current_life,
        boss_lives: state.boss.lives,
        player_hp: state.player.hp,
        elapsed: state.elapsed,
        ticks: state.time_ticks,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    log::info!("Ran {} ticks at {} Hz", summary.ticks, (1.0 / SIM_DT).round());
    Ok(())
}
