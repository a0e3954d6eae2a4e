//! Ledgehop - a tiny 2D platformer simulation core
//!
//! Core modules:
//! - `sim`: the simulation (entities, AABB collision, per-tick step driver)
//! - `level`: comma-separated level data parsing
//! - `runner`: fixed-timestep accumulator loop with a throttled draw pass
//! - `tuning`: data-driven physics and loop tuning
//!
//! Rendering, input wiring and telemetry display are collaborators behind
//! the `RenderSink`/`DebugSink` traits; the core never touches a pixel.

pub mod level;
pub mod runner;
pub mod sim;
pub mod tuning;

pub use level::{Level, LevelError};
pub use runner::{Camera, DebugSink, NullDebug, NullRender, RenderSink, Runner, Telemetry};
pub use sim::{GameState, tick};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Milliseconds between fixed-step ticks
    pub const FIXED_STEP_INTERVAL_MS: f64 = 20.0;
    /// Minimum milliseconds between draws (~100 Hz cap); 0 disables the cap
    pub const DRAW_INTERVAL_MS: f64 = 10.0;
    /// Maximum fixed steps recovered per loop iteration before the backlog
    /// is dropped
    pub const MAX_FIXED_STEPS: u32 = 8;

    /// Player square side length
    pub const PLAYER_SIZE: f32 = 25.0;
    /// Per-tick gravity accumulation for the player (units/s each tick)
    pub const PLAYER_GRAVITY: f32 = 6.0;
    /// Horizontal walk speed (units/s)
    pub const PLAYER_MOVE_SPEED: f32 = 125.0;
    /// Jump impulse (units/s, negative is up)
    pub const PLAYER_JUMP_SPEED: f32 = -480.0;
    /// Default player spawn position
    pub const PLAYER_SPAWN: (f32, f32) = (100.0, 100.0);

    /// Enemy square side length
    pub const ENEMY_SIZE: f32 = 25.0;
    /// Per-tick gravity accumulation for enemies
    pub const ENEMY_GRAVITY: f32 = 6.0;
    /// Enemy walk speed (units/s)
    pub const ENEMY_WALK_SPEED: f32 = 100.0;
    /// Enemy jump impulse (units/s, negative is up)
    pub const ENEMY_JUMP_SPEED: f32 = -500.0;

    /// Collectable box side length
    pub const COLLECTABLE_SIZE: f32 = 10.0;

    /// Camera viewport dimensions
    pub const CAMERA_WIDTH: f32 = 720.0;
    pub const CAMERA_HEIGHT: f32 = 480.0;
}
