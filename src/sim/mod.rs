//! Simulation module
//!
//! All gameplay logic lives here, with no rendering or platform
//! dependencies. The contract per update:
//! - platforms advance (motion, then resolution against the player) in
//!   registration order, last write winning on the shared contact record
//! - collectables, the player, then enemies follow
//! - the player's `falling` state is derived from the tick's aggregate
//!   counters, never from a single collision result

pub mod collision;
pub mod enemy;
pub mod platform;
pub mod state;
pub mod tick;

pub use collision::{Aabb, boxes_overlap, distance_between, point_in_box};
pub use state::{
    AiPolicy, Axis, Collectable, CollisionReport, Contact, Enemy, GameState, KeyState, Motion,
    Platform, Player, Tint,
};
pub use tick::tick;
