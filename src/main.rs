//! Dot Rush entry point
//!
//! Headless demo runner: plays a full session on autopilot at the fixed
//! timestep and prints the final score. Rendering shells drive the same
//! `tick` loop and read the HUD bindings instead of logging them.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;

use dot_rush::consts::{SESSION_SECS, SIM_DT, TARGET_COUNT};
use dot_rush::hud::HudModel;
use dot_rush::results;
use dot_rush::settings::Settings;
use dot_rush::sim::{GameEvent, GameState, SessionPhase, TickInput, tick};

#[derive(Parser, Debug)]
#[command(name = "dot-rush", about = "Timed connect-the-dots demo session", version)]
struct Args {
    /// Run seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Targets per round
    #[arg(long, default_value_t = TARGET_COUNT)]
    targets: usize,

    /// Play time limit in seconds
    #[arg(long, default_value_t = SESSION_SECS)]
    session_secs: f32,

    /// Pace the loop at wall-clock speed instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Write the final score to this JSON file
    #[arg(long)]
    result_path: Option<PathBuf>,

    /// Load settings overrides from this JSON file
    #[arg(long)]
    settings_path: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut settings = match &args.settings_path {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    settings.target_count = args.targets;
    settings.session_secs = args.session_secs;
    let settings = settings.sanitized();

    log::info!("Dot Rush starting, seed={seed}");

    let mut state = GameState::with_settings(seed, &settings);
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    loop {
        tick(&mut state, &input, SIM_DT);

        for event in state.take_events() {
            match event {
                GameEvent::RoundReady { count } => log::debug!("round ready, {count} targets"),
                GameEvent::Hit { target } => log::debug!("hit {target}"),
                GameEvent::Miss { target } => log::info!("miss {target}"),
                GameEvent::RoundComplete => log::info!("round complete"),
                GameEvent::SessionStarted => log::info!("GO"),
                GameEvent::SessionEnded { score } => log::info!("time up, score={score}"),
            }
        }

        // One HUD line per second
        if state.time_ticks % 120 == 0 {
            let hud = HudModel::from_state(&state);
            if hud.countdown.is_empty() {
                log::info!("{} | {}", hud.timer, hud.score);
            } else {
                log::info!("{}", hud.countdown);
            }
        }

        if state.clock.phase == SessionPhase::Ended {
            break;
        }

        if args.realtime {
            thread::sleep(Duration::from_secs_f32(SIM_DT));
        }
    }

    println!("Success: {}", state.result.get());

    if let Some(path) = &args.result_path {
        results::save_to(path, state.result.get());
    }
}
