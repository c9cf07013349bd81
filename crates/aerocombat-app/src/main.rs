use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{error, info};

use aerocombat_app::city;
use aerocombat_app::game_loop::{self, FRAME_DURATION};
use aerocombat_app::settings::Settings;
use aerocombat_app::state::{GameLoopCommand, SharedSnapshot};
use aerocombat_core::commands::{ControlInput, PlayerCommand};

/// How often the autopilot updates controls and pulls the trigger.
const PILOT_PERIOD: Duration = Duration::from_millis(250);

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Lazy weave through the city at full throttle.
fn autopilot(elapsed: Duration) -> ControlInput {
    let t = elapsed.as_secs_f64();
    ControlInput {
        forward: 1.0,
        strafe: 0.0,
        vertical: (t * 0.3).sin() * 0.2,
        yaw_rate: (t * 0.2).sin() * 0.5,
        pitch_rate: 0.0,
    }
}

fn main() -> ExitCode {
    init_tracing();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    info!(
        seed = settings.sim.seed,
        run_secs = settings.run_secs,
        "starting headless session"
    );

    let shared: SharedSnapshot = Arc::new(Mutex::new(None));
    let (tx, handle) = match game_loop::spawn_game_loop(
        settings.sim,
        city::downtown(3),
        shared.clone(),
        FRAME_DURATION,
    ) {
        Ok(spawned) => spawned,
        Err(e) => {
            error!(error = %e, "failed to spawn game loop thread");
            return ExitCode::FAILURE;
        }
    };

    let run_for = Duration::from_secs_f64(settings.run_secs);
    let started = Instant::now();
    let mut commands = vec![GameLoopCommand::PlayerCommand(PlayerCommand::StartSession)];
    while started.elapsed() < run_for {
        commands.push(GameLoopCommand::Controls(autopilot(started.elapsed())));
        commands.push(GameLoopCommand::PlayerCommand(PlayerCommand::FireWeapon));
        for command in commands.drain(..) {
            if tx.send(command).is_err() {
                error!("game loop exited early");
                return ExitCode::FAILURE;
            }
        }
        std::thread::sleep(PILOT_PERIOD);
    }
    let _ = tx.send(GameLoopCommand::Shutdown);

    let report = match handle.join() {
        Ok(report) => report,
        Err(_) => {
            error!("game loop thread panicked");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string(&report) {
        Ok(json) => info!(report = %json, "session report"),
        Err(e) => error!(error = %e, "failed to serialize session report"),
    }
    if let Ok(lock) = shared.lock() {
        if let Some(snapshot) = lock.as_ref() {
            info!(
                health = snapshot.player.health,
                fuel = snapshot.player.fuel,
                enemies = snapshot.enemies.len(),
                "final state"
            );
        }
    }

    ExitCode::SUCCESS
}
