//! Game loop thread: runs the simulation engine at a fixed 60 Hz step.
//!
//! The engine is created inside this thread so it never crosses threads.
//! Commands arrive via an `mpsc` channel. The latest snapshot is published
//! to shared state after every frame, and drained events are tallied into
//! the `SessionReport` returned when the loop stops.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use aerocombat_core::components::Building;
use aerocombat_core::constants::FRAME_RATE;
use aerocombat_core::events::SimEvent;
use aerocombat_sim::{SimConfig, SimulationEngine};

use crate::state::{GameLoopCommand, SessionReport, SharedSnapshot};

/// Simulated seconds per frame.
pub const FRAME_DT: f64 = 1.0 / FRAME_RATE as f64;

/// Wall-clock duration of one frame.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Frames between periodic status lines (5 s of sim time).
const STATUS_INTERVAL: u64 = FRAME_RATE as u64 * 5;

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle yielding the session report.
pub fn spawn_game_loop(
    config: SimConfig,
    buildings: Vec<Building>,
    latest_snapshot: SharedSnapshot,
    frame_duration: Duration,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<SessionReport>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("aerocombat-game-loop".into())
        .spawn(move || {
            let engine = SimulationEngine::new(config, buildings);
            run_game_loop(engine, cmd_rx, &latest_snapshot, frame_duration)
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until a Shutdown command or channel disconnect.
pub fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &SharedSnapshot,
    frame_duration: Duration,
) -> SessionReport {
    let mut report = SessionReport::default();
    let mut next_frame_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Controls(controls)) => engine.set_controls(controls),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    return finish(&engine, report);
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one frame (engine handles pause semantics internally)
        engine.update(FRAME_DT);
        report.frames += 1;

        // 3. Hand events to the presentation side; here they are tallied
        for event in engine.drain_events() {
            tally(&mut report, &event);
        }

        // 4. Publish the latest snapshot
        let snapshot = engine.snapshot();
        if report.frames % STATUS_INTERVAL == 0 {
            info!(
                sim_secs = snapshot.time.elapsed_secs,
                phase = ?snapshot.phase,
                enemies = snapshot.enemies.len(),
                projectiles = snapshot.projectiles.len(),
                health = snapshot.player.health,
                kills = snapshot.score.kills,
                deaths = snapshot.score.deaths,
                "status"
            );
        }
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until the next frame
        if frame_duration.is_zero() {
            continue;
        }
        next_frame_time += frame_duration;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > frame_duration * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_frame_time = now;
        }
    }
}

fn tally(report: &mut SessionReport, event: &SimEvent) {
    match event {
        SimEvent::Effect { kind, position } => {
            report.record_event(kind.as_str());
            debug!(kind = kind.as_str(), ?position, "effect");
        }
        SimEvent::Sound { cue } => {
            report.record_event(&format!("sound:{}", cue.as_str()));
        }
    }
}

fn finish(engine: &SimulationEngine, mut report: SessionReport) -> SessionReport {
    let snapshot = engine.snapshot();
    report.sim_secs = snapshot.time.elapsed_secs;
    report.score = snapshot.score;
    info!(frames = report.frames, sim_secs = report.sim_secs, "game loop stopped");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use aerocombat_core::commands::{ControlInput, PlayerCommand};
    use aerocombat_core::enums::SessionPhase;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartSession))
            .unwrap();
        tx.send(GameLoopCommand::Controls(ControlInput::default()))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartSession)
        ));
        assert!(matches!(commands[1], GameLoopCommand::Controls(_)));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_shutdown_before_start_runs_no_frames() {
        let (tx, rx) = mpsc::channel();
        tx.send(GameLoopCommand::Shutdown).unwrap();
        let engine = SimulationEngine::new(SimConfig::default(), Vec::new());
        let shared: SharedSnapshot = Arc::new(Mutex::new(None));

        let report = run_game_loop(engine, rx, &shared, Duration::ZERO);
        assert_eq!(report.frames, 0);
        assert!(shared.lock().unwrap().is_none());
    }

    #[test]
    fn test_loop_runs_session_until_shutdown() {
        let shared: SharedSnapshot = Arc::new(Mutex::new(None));
        let (tx, handle) =
            spawn_game_loop(SimConfig::default(), Vec::new(), shared.clone(), Duration::ZERO)
                .unwrap();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartSession))
            .unwrap();
        tx.send(GameLoopCommand::Controls(ControlInput {
            forward: 1.0,
            ..Default::default()
        }))
        .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::FireWeapon))
            .unwrap();
        std::thread::sleep(Duration::from_millis(50));
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let report = handle.join().unwrap();
        assert!(report.frames > 0);
        assert!(report.sim_secs > 0.0);
        assert_eq!(report.score.shots_fired, 1);
        assert_eq!(report.event_count("sound:playerShoot"), 1);
        assert!(report.event_count("engine-trail") > 0);

        let snapshot = shared.lock().unwrap().clone().unwrap();
        assert_eq!(snapshot.phase, SessionPhase::Active);
    }

    #[test]
    fn test_frame_duration_constant() {
        // 60Hz = 16.666ms per frame
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(FRAME_DURATION.as_nanos(), expected_nanos as u128);
        assert!((FRAME_DT - 1.0 / 60.0).abs() < 1e-15);
    }
}
