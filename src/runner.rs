//! Fixed-timestep loop driver
//!
//! The scheduler runs three concerns at their own rates:
//! - a fixed-step accumulator fires [`Runner::fixed_step`] at a constant
//!   interval (currently an empty hook, the reserved slot for deterministic
//!   physics);
//! - a draw pass throttled to a maximum rate hands read-only state to the
//!   [`RenderSink`] and [`DebugSink`] collaborators;
//! - the variable-rate update steps the simulation with the measured delta
//!   since the previous update.
//!
//! The runner is clock-agnostic: the host calls [`Runner::pump`] with
//! milliseconds since start, as often as it likes, yielding between calls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::state::{Contact, GameState, Player};
use crate::sim::tick::tick;
use crate::tuning::Tuning;

/// Receives read-only entity snapshots once per draw tick. The core has no
/// opinion on how pixels get produced.
pub trait RenderSink {
    fn draw(&mut self, state: &GameState, camera: &Camera);
}

/// Receives aggregate counters, player kinematics and FPS once per draw
/// tick. Pure read sink, no feedback into the core.
pub trait DebugSink {
    fn publish(&mut self, telemetry: &Telemetry);
}

/// Render sink that draws nothing.
pub struct NullRender;

impl RenderSink for NullRender {
    fn draw(&mut self, _state: &GameState, _camera: &Camera) {}
}

/// Debug sink that drops everything.
pub struct NullDebug;

impl DebugSink for NullDebug {
    fn publish(&mut self, _telemetry: &Telemetry) {}
}

/// Debug sink that logs at debug level.
pub struct LogDebug;

impl DebugSink for LogDebug {
    fn publish(&mut self, t: &Telemetry) {
        log::debug!(
            "pos=({:.1},{:.1}) vel=({:.1},{:.1}) falling={} missed={}/{} score={} fps={}",
            t.player_pos.x,
            t.player_pos.y,
            t.player_vel.x,
            t.player_vel.y,
            t.falling,
            t.missed_platforms,
            t.active_platforms,
            t.score,
            t.fps,
        );
    }
}

/// Viewport that tracks the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            size: Vec2::new(CAMERA_WIDTH, CAMERA_HEIGHT),
        }
    }
}

impl Camera {
    /// Center the viewport on the player.
    pub fn step(&mut self, player: &Player) {
        self.pos = player.pos - self.size / 2.0;
    }
}

/// Read-only snapshot handed to a [`DebugSink`].
#[derive(Debug, Clone)]
pub struct Telemetry {
    pub missed_platforms: u32,
    pub active_platforms: u32,
    pub contact: Option<Contact>,
    pub contact_platform: Option<u32>,
    pub player_pos: Vec2,
    pub player_vel: Vec2,
    pub falling: bool,
    pub score: i64,
    pub fps: u32,
}

/// The loop driver. Owns the world plus all scheduling bookkeeping.
pub struct Runner {
    pub state: GameState,
    pub camera: Camera,
    fixed_step_interval_ms: f64,
    draw_interval_ms: f64,
    fixed_step_time: f64,
    fixed_steps: u64,
    last_draw_time: f64,
    last_update_time: f64,
    running: bool,
    fps: u32,
    fps_counter: u32,
    fps_timer: f64,
}

impl Runner {
    pub fn new(state: GameState, tuning: &Tuning) -> Self {
        Self {
            state,
            camera: Camera::default(),
            fixed_step_interval_ms: tuning.fixed_step_interval_ms,
            draw_interval_ms: tuning.draw_interval_ms,
            fixed_step_time: 0.0,
            fixed_steps: 0,
            last_draw_time: 0.0,
            last_update_time: 0.0,
            running: true,
            fps: 0,
            fps_counter: 0,
            fps_timer: 0.0,
        }
    }

    /// Whether the loop should keep going. Hosts consult this between
    /// iterations.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Ask the loop to stop after the current iteration.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Total fixed steps fired since start.
    pub fn fixed_steps(&self) -> u64 {
        self.fixed_steps
    }

    /// Draw frames measured over the last whole second.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// One loop iteration at game time `now_ms` (milliseconds since start):
    /// catch up fixed steps, maybe draw, then update with the measured
    /// delta.
    pub fn pump(&mut self, now_ms: f64, render: &mut dyn RenderSink, debug: &mut dyn DebugSink) {
        let mut caught_up = 0;
        while self.fixed_step_time < now_ms && caught_up < MAX_FIXED_STEPS {
            self.fixed_step();
            self.fixed_steps += 1;
            self.fixed_step_time += self.fixed_step_interval_ms;
            caught_up += 1;
        }
        if self.fixed_step_time < now_ms {
            // Too far behind to recover; drop the backlog instead of
            // spiraling
            self.fixed_step_time = now_ms;
        }

        let draw_elapsed = now_ms - self.last_draw_time;
        if self.draw_interval_ms <= 0.0 || draw_elapsed >= self.draw_interval_ms {
            self.fps_counter += 1;
            if self.fps_timer == 0.0 || now_ms - self.fps_timer > 1000.0 {
                self.fps_timer = now_ms;
                self.fps = self.fps_counter;
                self.fps_counter = 0;
            }
            render.draw(&self.state, &self.camera);
            debug.publish(&self.telemetry());
            self.last_draw_time = now_ms;
        }

        let dt = ((now_ms - self.last_update_time) / 1000.0) as f32;
        tick(&mut self.state, dt);
        self.camera.step(&self.state.player);
        self.last_update_time = now_ms;
    }

    /// Reserved slot for deterministic physics. Stepping currently happens
    /// in the variable-rate update.
    fn fixed_step(&mut self) {}

    fn telemetry(&self) -> Telemetry {
        Telemetry {
            missed_platforms: self.state.report.missed_platforms,
            active_platforms: self.state.report.active_platforms,
            contact: self.state.report.contact,
            contact_platform: self.state.report.contact_platform,
            player_pos: self.state.player.pos,
            player_vel: self.state.player.vel,
            falling: self.state.player.falling,
            score: self.state.score,
            fps: self.fps,
        }
    }
}
