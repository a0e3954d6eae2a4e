//! Data-driven physics and loop tuning
//!
//! Every gameplay constant in one serde-loadable struct, so balance changes
//! do not require a rebuild. Missing or unparseable files fall back to the
//! compiled defaults with a warning.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics and loop tuning values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player physics ===
    /// Per-tick gravity accumulation (units/s added each tick)
    pub gravity: f32,
    /// Horizontal walk speed (units/s)
    pub move_speed: f32,
    /// Jump impulse (units/s, negative is up)
    pub jump_speed: f32,
    pub player_spawn_x: f32,
    pub player_spawn_y: f32,

    // === Enemy physics ===
    pub enemy_gravity: f32,
    pub enemy_walk_speed: f32,
    pub enemy_jump_speed: f32,

    // === Loop timing ===
    /// Milliseconds between fixed-step ticks
    pub fixed_step_interval_ms: f64,
    /// Minimum milliseconds between draws; 0 disables the cap
    pub draw_interval_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: PLAYER_GRAVITY,
            move_speed: PLAYER_MOVE_SPEED,
            jump_speed: PLAYER_JUMP_SPEED,
            player_spawn_x: PLAYER_SPAWN.0,
            player_spawn_y: PLAYER_SPAWN.1,

            enemy_gravity: ENEMY_GRAVITY,
            enemy_walk_speed: ENEMY_WALK_SPEED,
            enemy_jump_speed: ENEMY_JUMP_SPEED,

            fixed_step_interval_ms: FIXED_STEP_INTERVAL_MS,
            draw_interval_ms: DRAW_INTERVAL_MS,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file, falling back to defaults if the file
    /// is missing or unparseable.
    pub fn load(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {path}");
                    tuning
                }
                Err(err) => {
                    log::warn!("Failed to parse {path}: {err}, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No tuning file at {path}, using defaults");
                Self::default()
            }
        }
    }
}
