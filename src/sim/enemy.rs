//! Enemy ground/air state machine and patrol AI
//!
//! Enemies reuse the same primitives the platform step uses, but through
//! single-point probes a few units ahead of or below the box, which makes
//! the edge conditions far less forgiving. Probes against "the platform we
//! are standing on" go through `on_platform` and simply fail while that
//! index is unset.

use glam::Vec2;

use super::collision::{distance_between, point_in_box};
use super::state::{AiPolicy, Enemy, Platform, Player};

/// Advance one enemy by one tick.
pub fn step(enemy: &mut Enemy, platforms: &[Platform], player: &Player, dt: f32) {
    // Grounded iff a probe one unit under our feet lands inside any platform
    let foot = Vec2::new(enemy.pos.x + enemy.size.x / 2.0, enemy.bottom() + 1.0);
    enemy.falling = !platforms.iter().any(|p| point_in_box(foot, &p.aabb()));

    // Build up fall speed, or stop accumulating once supported
    if enemy.falling {
        enemy.vel.y += enemy.gravity;
    } else {
        enemy.vel.y = 0.0;
    }

    // Leading edge in the direction of travel
    if enemy.vel.x < 0.0 {
        enemy.dir = -1.0;
        enemy.motion_side = enemy.pos.x;
    } else {
        enemy.dir = 1.0;
        enemy.motion_side = enemy.pos.x + enemy.size.x;
    }

    if !enemy.falling {
        if !enemy.moving {
            start_moving(enemy, platforms);
        } else {
            patrol(enemy, platforms);
        }
    } else {
        land_on_player(enemy, player);
    }

    enemy.pos += enemy.vel * dt;
}

/// Idle and grounded: probe for walkable floor a couple of body-widths to
/// either side. Right has priority.
fn start_moving(enemy: &mut Enemy, platforms: &[Platform]) {
    let below = enemy.bottom() + 4.0;
    let right_probe = Vec2::new(enemy.pos.x + enemy.size.x * 2.0, below);
    let left_probe = Vec2::new(enemy.pos.x - enemy.size.x * 2.0, below);

    if platforms.iter().any(|p| point_in_box(right_probe, &p.aabb())) {
        enemy.vel.x = enemy.walk_speed;
        enemy.moving = true;
    } else if platforms.iter().any(|p| point_in_box(left_probe, &p.aabb())) {
        enemy.vel.x = -enemy.walk_speed;
        enemy.moving = true;
    }
}

/// Moving and grounded: examine every platform in order, tracking which one
/// supports us, then run the policy checks against each.
fn patrol(enemy: &mut Enemy, platforms: &[Platform]) {
    for (i, platform) in platforms.iter().enumerate() {
        let foot = Vec2::new(enemy.pos.x + enemy.size.x / 2.0, enemy.bottom() + 2.0);
        if point_in_box(foot, &platform.aabb()) && enemy.on_platform != Some(i) {
            enemy.on_platform = Some(i);
        }

        match enemy.ai {
            AiPolicy::Turnaround => {
                if at_platform_end(enemy, platform) {
                    enemy.vel.x = -enemy.vel.x;
                }
            }
            AiPolicy::Adventure => adventure(enemy, platforms, platform),
        }

        wall_bounce(enemy, platform);
    }
}

/// Ledge test: the look-ahead point has run off this platform while the
/// current point is still on it. Moving platforms do not count as ledges.
fn at_platform_end(enemy: &Enemy, platform: &Platform) -> bool {
    let plat = platform.aabb();
    let ahead = Vec2::new(
        enemy.pos.x + enemy.size.x / 2.0 + enemy.vel.x / 3.0,
        enemy.bottom() + 2.0,
    );
    let here = Vec2::new(enemy.pos.x + enemy.size.x / 2.0, enemy.bottom() + 2.0);
    !point_in_box(ahead, &plat) && point_in_box(here, &plat) && platform.motion.is_none()
}

/// Adventure policy: jump gaps toward reachable floor, jump at platforms
/// overhead, and otherwise turn around at a ledge.
fn adventure(enemy: &mut Enemy, platforms: &[Platform], examined: &Platform) {
    let current = enemy.on_platform.and_then(|i| platforms.get(i));
    let on_current =
        |x: f32, y: f32| current.is_some_and(|c| point_in_box(Vec2::new(x, y), &c.aabb()));

    let gap_ahead = !on_current(enemy.motion_side + 10.0 * enemy.dir, enemy.bottom() + 2.0);
    let floor_far_ahead = point_in_box(
        Vec2::new(enemy.motion_side + 150.0 * enemy.dir, enemy.bottom() + 10.0),
        &examined.aabb(),
    );
    let platform_above = point_in_box(
        Vec2::new(
            enemy.motion_side + enemy.size.x * 2.0 * enemy.dir,
            enemy.pos.y - enemy.size.y * 3.0,
        ),
        &examined.aabb(),
    );

    if gap_ahead && floor_far_ahead {
        enemy.vel.y = enemy.jump_speed;
        enemy.falling = true;
    } else if platform_above {
        enemy.vel.y = enemy.jump_speed;
        enemy.falling = true;
    } else if !on_current(enemy.pos.x + enemy.size.x / 2.0, enemy.bottom() + 4.0) {
        // About to walk off a cliff with nowhere to go
        enemy.vel.x = -enemy.vel.x;
    }
}

/// Shared wall test, both policies: leading edge inside the platform's
/// x-span with real vertical overlap while moving toward it. The +2 keeps
/// the platform we are resting on from reading as a wall.
fn wall_bounce(enemy: &mut Enemy, platform: &Platform) {
    let plat = platform.aabb();
    let overlaps_y = enemy.bottom() > plat.pos.y + 2.0 && enemy.pos.y < plat.bottom();
    if !overlaps_y {
        return;
    }
    if enemy.vel.x < 0.0 {
        if enemy.pos.x <= plat.right() && enemy.pos.x >= plat.pos.x {
            enemy.vel.x = -enemy.vel.x;
        }
    } else if enemy.vel.x > 0.0 && enemy.right() >= plat.pos.x && enemy.right() <= plat.right() {
        enemy.vel.x = -enemy.vel.x;
    }
}

/// Airborne: landing on the player's head counts as ground.
fn land_on_player(enemy: &mut Enemy, player: &Player) {
    let head = Vec2::new(enemy.pos.x + enemy.size.x / 2.0, enemy.bottom() + 1.0);
    let near = distance_between(&enemy.aabb(), &player.aabb()) < player.size.x;
    if (point_in_box(head, &player.aabb()) || near)
        && enemy.bottom() < player.pos.y
        && enemy.vel.y > 0.0
    {
        enemy.falling = false;
        enemy.vel.y = 0.0;
    }
}
