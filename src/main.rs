//! Tumble Pop entry point
//!
//! Headless runner: loads settings, plays the configured number of frames at
//! the fixed timestep and prints a JSON summary of the run.

use serde::Serialize;

use tumble_pop::Settings;
use tumble_pop::sim::{GameEvent, GameState, LevelId, Screen, TickInput, tick};

/// What happened over a run
#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    levels_started: u32,
    levels_cleared: u32,
    captures: u32,
    throws: u32,
    enemies_destroyed: u32,
    fireballs: u32,
    hits_taken: u32,
    game_overs: u32,
    final_level: Option<LevelId>,
    lives: i8,
}

impl RunSummary {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::LevelStarted(level) => {
                log::info!("Level {} started", level.number());
                self.levels_started += 1;
            }
            GameEvent::VictoryStarted(_) => self.levels_cleared += 1,
            GameEvent::EnemyCaptured { .. } => self.captures += 1,
            GameEvent::EnemyThrown { .. } => self.throws += 1,
            GameEvent::EnemyDestroyed { .. } => self.enemies_destroyed += 1,
            GameEvent::FireballLaunched { .. } => self.fireballs += 1,
            GameEvent::PlayerDamaged { lives } => {
                log::info!("Player hit, {lives} lives left");
                self.hits_taken += 1;
            }
            GameEvent::GameOver => self.game_overs += 1,
            GameEvent::ReturnedToMenu | GameEvent::EnemyRelocated { .. } => {}
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Tumble Pop (headless) starting...");

    let settings = Settings::load();
    log::info!(
        "Seed {:#x}, {} frames, autopilot {}",
        settings.seed,
        settings.frames,
        settings.autopilot
    );

    let mut state = GameState::new(settings.seed);
    state.start_level(settings.start_level);

    let input = TickInput {
        idle_mode: settings.autopilot,
        ..Default::default()
    };

    let mut summary = RunSummary {
        seed: settings.seed,
        levels_started: 1,
        ..Default::default()
    };
    for _ in 0..settings.frames {
        tick(&mut state, &input);
        for event in &state.events {
            summary.record(event);
        }
        if state.quit_requested {
            break;
        }
    }

    summary.frames = state.time_ticks;
    summary.final_level = (state.screen == Screen::Playing).then_some(state.level);
    summary.lives = state.player.lives;

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Could not write run summary: {err}"),
    }
}
