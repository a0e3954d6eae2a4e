//! Per-tick step driver
//!
//! One update advances the world in a fixed phase order, and that order is
//! load-bearing:
//!
//! 1. zero `missed_platforms` (the only per-tick counter reset);
//! 2. every platform, in registration order: motion pre-step, then
//!    resolution against the player;
//! 3. collectables;
//! 4. the player, reading the aggregates phase 2 just wrote;
//! 5. enemies.
//!
//! `dt` is the measured time since the previous update, not a fixed delta;
//! simulation results vary with host performance by design.

use super::state::GameState;
use super::{enemy, platform};

/// Advance the whole world by one update.
pub fn tick(state: &mut GameState, dt: f32) {
    let GameState {
        player,
        platforms,
        collectables,
        enemies,
        keys,
        report,
        score,
    } = state;

    report.missed_platforms = 0;

    for plat in platforms.iter_mut() {
        platform::pre_step(plat, player, report, keys);
        platform::resolve(plat, player, report, keys);
    }

    for collectable in collectables.iter_mut() {
        collectable.step(player, score);
    }

    player.step(report, keys, dt);

    for foe in enemies.iter_mut() {
        enemy::step(foe, platforms, player, dt);
    }
}
