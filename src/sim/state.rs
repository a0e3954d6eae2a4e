//! Game state and entity types
//!
//! Everything the simulation mutates lives here. The aggregate collision
//! signals are an explicit [`CollisionReport`] on the state rather than
//! ambient globals: the platform phase writes it, the player phase reads it
//! one phase later.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, distance_between};
use crate::consts::*;
use crate::level::Level;
use crate::tuning::Tuning;

/// Debug-state tag for platforms. Not gameplay-relevant, but it encodes the
/// four-state machine renderers color platforms with: Neutral until first
/// examined, Culled while out of activation range, OnTop while supporting
/// the player, Missed while in range but not supporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tint {
    #[default]
    Neutral,
    Culled,
    OnTop,
    Missed,
}

impl Tint {
    /// Render color for this state
    pub fn as_hex(&self) -> &'static str {
        match self {
            Tint::Neutral => "#000000",
            Tint::Culled => "#0000FF",
            Tint::OnTop => "#00CC00",
            Tint::Missed => "#CC0000",
        }
    }
}

/// Which face of a platform the player last contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    OnTop,
    Bottom,
    Left,
    Right,
}

/// Per-tick aggregate collision signals.
///
/// `missed_platforms` is zeroed at the top of every tick; `active_platforms`
/// is only adjusted on activation transitions (and seeded to the platform
/// count at load). `contact`/`contact_platform` are last-write-wins across
/// the platform iteration and persist until overwritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollisionReport {
    /// Platforms in range this tick that did not report the player on top
    pub missed_platforms: u32,
    /// Platforms currently within activation distance of the player
    pub active_platforms: u32,
    /// Last classified contact face
    pub contact: Option<Contact>,
    /// Id of the platform that owns the last classified contact
    pub contact_platform: Option<u32>,
}

/// Held state of the four logical keys.
///
/// Written by the host on key edge events between loop iterations. The
/// platform side-contact resolution may force a flag back up, and the clear
/// sticks until the host presses the key again. `down` is read by nothing in
/// the current core.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// The player entity. Singleton, never destroyed.
///
/// The player does not own platform-contact truth: `falling` is derived from
/// the [`CollisionReport`] aggregates, never from a single collision result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub gravity: f32,
    pub move_speed: f32,
    pub jump_speed: f32,
    pub falling: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_spawn_x, tuning.player_spawn_y),
            vel: Vec2::ZERO,
            size: Vec2::splat(PLAYER_SIZE),
            gravity: tuning.gravity,
            move_speed: tuning.move_speed,
            jump_speed: tuning.jump_speed,
            falling: true,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// X coordinate of the right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Y coordinate of the bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// One player phase: derive `falling` from the aggregates the platform
    /// phase just produced, then integrate input and gravity.
    pub(crate) fn step(&mut self, report: &CollisionReport, keys: &KeyState, dt: f32) {
        self.platform_collision(report);
        self.apply_movement(keys, dt);
    }

    /// No active platform reported top contact: we are airborne. Leaving a
    /// platform therefore registers one tick late, which is part of the
    /// design.
    pub(crate) fn platform_collision(&mut self, report: &CollisionReport) {
        if report.missed_platforms >= report.active_platforms {
            self.falling = true;
        }
    }

    pub(crate) fn apply_movement(&mut self, keys: &KeyState, dt: f32) {
        if keys.right {
            self.vel.x = self.move_speed;
        }
        if keys.left {
            self.vel.x = -self.move_speed;
        }
        if !keys.left && !keys.right {
            self.vel.x = 0.0;
        }

        // Single-impulse jump, no variable height
        if keys.up && !self.falling {
            self.vel.y = self.jump_speed;
        }

        // Gravity accumulates per tick, not per second
        if self.falling {
            self.vel.y += self.gravity;
        } else if !keys.up {
            self.vel.y = 0.0;
        }

        self.pos += self.vel * dt;
    }
}

/// Axis a moving platform travels along. Level data encodes vertical as 1
/// and horizontal as 2; anything else is rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    /// Parse a level-data axis code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Axis::Vertical),
            2 => Some(Axis::Horizontal),
            _ => None,
        }
    }
}

/// Oscillating motion attached to a moving platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Motion {
    pub axis: Axis,
    /// Units moved per motion update
    pub speed: f32,
    /// Where the oscillation started
    pub origin: Vec2,
    /// Leading-edge coordinate on the motion axis at which travel reverses
    pub end_pos: f32,
    /// True while traveling back toward the origin
    pub reverse: bool,
}

/// A rectangular platform. `motion` makes it a moving platform; both kinds
/// share one collision-resolution function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub tint: Tint,
    /// Within activation distance of the player
    pub active: bool,
    /// Activation radius: max(width, height) + player width, fixed at
    /// construction
    pub check_distance: f32,
    pub motion: Option<Motion>,
}

impl Platform {
    pub fn new(id: u32, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            pos,
            size,
            tint: Tint::Neutral,
            active: true,
            check_distance: size.x.max(size.y) + PLAYER_SIZE,
            motion: None,
        }
    }

    pub fn moving(id: u32, pos: Vec2, size: Vec2, axis: Axis, speed: f32, end_pos: f32) -> Self {
        let mut platform = Self::new(id, pos, size);
        platform.motion = Some(Motion {
            axis,
            speed,
            origin: pos,
            end_pos,
            reverse: false,
        });
        platform
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A one-shot score pickup. Goes inert when collected, never respawns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectable {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub value: i64,
    pub active: bool,
}

impl Collectable {
    pub fn new(id: u32, pos: Vec2, value: i64) -> Self {
        Self {
            id,
            pos,
            size: Vec2::splat(COLLECTABLE_SIZE),
            value,
            active: true,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub(crate) fn step(&mut self, player: &Player, score: &mut i64) {
        if !self.active {
            return;
        }
        if distance_between(&self.aabb(), &player.aabb()) < player.size.x {
            *score += self.value;
            self.active = false;
        }
    }
}

/// Which patrol policy an enemy runs while grounded and moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiPolicy {
    /// Stay on the current platform, turning around at its edges
    Turnaround,
    /// Jump gaps and climb toward other platforms when probes find one
    Adventure,
}

impl AiPolicy {
    /// Parse a level-data AI code (0 = turnaround, 1 = adventure).
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(AiPolicy::Turnaround),
            1 => Some(AiPolicy::Adventure),
            _ => None,
        }
    }
}

/// A patrolling enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub gravity: f32,
    pub walk_speed: f32,
    pub jump_speed: f32,
    pub falling: bool,
    pub moving: bool,
    /// Direction multiplier: -1 left, +1 right
    pub dir: f32,
    /// Leading x-edge in the direction of travel
    pub motion_side: f32,
    /// Index of the platform currently under us
    pub on_platform: Option<usize>,
    pub ai: AiPolicy,
    /// Render tag carried through from level data
    pub color: String,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, ai: AiPolicy, color: String, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            size: Vec2::splat(ENEMY_SIZE),
            vel: Vec2::ZERO,
            gravity: tuning.enemy_gravity,
            walk_speed: tuning.enemy_walk_speed,
            jump_speed: tuning.enemy_jump_speed,
            falling: true,
            moving: false,
            dir: -1.0,
            motion_side: pos.x,
            on_platform: None,
            ai,
            color,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// X coordinate of the right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Y coordinate of the bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Complete simulation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub collectables: Vec<Collectable>,
    pub enemies: Vec<Enemy>,
    pub keys: KeyState,
    pub report: CollisionReport,
    pub score: i64,
}

impl GameState {
    /// Build the world from parsed level data. Every platform starts
    /// counted as active; the first tick's culling pass corrects the
    /// aggregate for platforms actually out of range.
    pub fn new(level: Level, tuning: &Tuning) -> Self {
        let report = CollisionReport {
            active_platforms: level.platforms.len() as u32,
            ..CollisionReport::default()
        };
        Self {
            player: Player::new(tuning),
            platforms: level.platforms,
            collectables: level.collectables,
            enemies: level.enemies,
            keys: KeyState::default(),
            report,
            score: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_left_wins_when_both_keys_held() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        let keys = KeyState {
            left: true,
            right: true,
            ..KeyState::default()
        };
        player.apply_movement(&keys, 0.02);
        assert_eq!(player.vel.x, -player.move_speed);
    }

    #[test]
    fn test_player_stops_with_no_keys() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.vel.x = 99.0;
        player.falling = false;
        player.apply_movement(&KeyState::default(), 0.02);
        assert_eq!(player.vel.x, 0.0);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_player_jump_only_when_grounded() {
        let tuning = Tuning::default();
        let keys = KeyState {
            up: true,
            ..KeyState::default()
        };

        let mut grounded = Player::new(&tuning);
        grounded.falling = false;
        grounded.apply_movement(&keys, 0.02);
        assert_eq!(grounded.vel.y, grounded.jump_speed);

        let mut airborne = Player::new(&tuning);
        airborne.falling = true;
        airborne.vel.y = 10.0;
        airborne.apply_movement(&keys, 0.02);
        // Gravity applies instead of a second impulse
        assert_eq!(airborne.vel.y, 10.0 + airborne.gravity);
    }

    #[test]
    fn test_falling_derived_from_aggregates() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.falling = false;

        // Some active platform still reports top contact
        let supported = CollisionReport {
            missed_platforms: 1,
            active_platforms: 2,
            ..CollisionReport::default()
        };
        player.platform_collision(&supported);
        assert!(!player.falling);

        // Every active platform missed
        let missed = CollisionReport {
            missed_platforms: 2,
            active_platforms: 2,
            ..CollisionReport::default()
        };
        player.platform_collision(&missed);
        assert!(player.falling);
    }

    #[test]
    fn test_empty_world_means_falling() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.falling = false;
        player.platform_collision(&CollisionReport::default());
        assert!(player.falling);
    }

    #[test]
    fn test_axis_codes() {
        assert_eq!(Axis::from_code(1), Some(Axis::Vertical));
        assert_eq!(Axis::from_code(2), Some(Axis::Horizontal));
        assert_eq!(Axis::from_code(0), None);
        assert_eq!(Axis::from_code(3), None);
    }

    #[test]
    fn test_check_distance_uses_longer_side() {
        let wide = Platform::new(0, Vec2::ZERO, Vec2::new(200.0, 20.0));
        assert_eq!(wide.check_distance, 200.0 + PLAYER_SIZE);
        let tall = Platform::new(1, Vec2::ZERO, Vec2::new(20.0, 200.0));
        assert_eq!(tall.check_distance, 200.0 + PLAYER_SIZE);
    }
}
