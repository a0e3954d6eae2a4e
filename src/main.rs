//! Ledgehop entry point
//!
//! Headless demo host: loads a level, then drives the runner against the
//! real clock with a logging telemetry sink. Rendering stays behind the
//! `RenderSink` seam; this binary plugs in the null implementation.

use std::time::{Duration, Instant};

use ledgehop::runner::{DebugSink, NullRender, Runner, Telemetry};
use ledgehop::sim::GameState;
use ledgehop::{Level, Tuning};

/// Logs telemetry about once a second of game time.
struct ConsoleDebug {
    last_report: Instant,
}

impl ConsoleDebug {
    fn new() -> Self {
        Self {
            last_report: Instant::now(),
        }
    }
}

impl DebugSink for ConsoleDebug {
    fn publish(&mut self, t: &Telemetry) {
        if self.last_report.elapsed() < Duration::from_secs(1) {
            return;
        }
        self.last_report = Instant::now();
        log::info!(
            "player=({:.1},{:.1}) falling={} missed={}/{} score={} fps={}",
            t.player_pos.x,
            t.player_pos.y,
            t.falling,
            t.missed_platforms,
            t.active_platforms,
            t.score,
            t.fps,
        );
    }
}

fn main() {
    env_logger::init();
    log::info!("Ledgehop starting...");

    let args: Vec<String> = std::env::args().collect();
    let level_path = args.get(1).map(String::as_str).unwrap_or("level.txt");
    let run_secs: f64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10.0);

    let tuning = Tuning::load("tuning.json");

    // A failed load leaves the world empty rather than retrying
    let level = match Level::load(level_path, &tuning) {
        Ok(level) => level,
        Err(err) => {
            log::warn!("Failed to load {level_path}: {err}; starting with an empty world");
            Level::default()
        }
    };
    log::info!(
        "Level ready: {} platforms, {} collectables, {} enemies",
        level.platforms.len(),
        level.collectables.len(),
        level.enemies.len(),
    );

    let mut runner = Runner::new(GameState::new(level, &tuning), &tuning);
    let mut render = NullRender;
    let mut debug = ConsoleDebug::new();

    let start = Instant::now();
    while runner.running() {
        let now_ms = start.elapsed().as_secs_f64() * 1000.0;
        if now_ms >= run_secs * 1000.0 {
            runner.stop();
            break;
        }
        runner.pump(now_ms, &mut render, &mut debug);
        // Yield, then run again as soon as possible
        std::thread::sleep(Duration::from_millis(1));
    }

    log::info!(
        "Done after {} fixed steps, final score {}",
        runner.fixed_steps(),
        runner.state.score,
    );
}
