//! Platform motion and the player-vs-platform resolution step
//!
//! The load-bearing part of the simulation. Each tick, every platform runs
//! its motion pre-step and then [`resolve`], in registration order. The
//! resolution writes aggregate signals into the [`CollisionReport`]; with
//! overlapping platforms the contact tag and owning id are last-write-wins
//! in iteration order, and that ordering is part of the contract.

use super::collision::distance_between;
use super::state::{Axis, CollisionReport, Contact, KeyState, Motion, Platform, Player, Tint};

/// Advance a moving platform along its axis before collision resolution.
/// Static platforms are a no-op.
pub fn pre_step(
    platform: &mut Platform,
    player: &mut Player,
    report: &CollisionReport,
    keys: &KeyState,
) {
    let Some(mut motion) = platform.motion.take() else {
        return;
    };
    match motion.axis {
        Axis::Horizontal => horizontal_motion(platform, &mut motion, player, report, keys),
        Axis::Vertical => vertical_motion(platform, &mut motion),
    }
    platform.motion = Some(motion);
}

/// Horizontal oscillation. This is the only motion that carries the player:
/// when the last recorded contact belongs to this platform, the player is
/// grounded, and the key opposing the travel direction is up, the player's x
/// shifts by the platform's actual delta this tick.
fn horizontal_motion(
    platform: &mut Platform,
    motion: &mut Motion,
    player: &mut Player,
    report: &CollisionReport,
    keys: &KeyState,
) {
    let carried =
        report.contact_platform == Some(platform.id) && !player.falling;

    if !motion.reverse {
        // Clamp the final step so the leading edge lands exactly on end_pos
        let step = motion.speed.min(motion.end_pos - (platform.pos.x + platform.size.x));
        if step > 0.0 {
            platform.pos.x += step;
            if carried && !keys.left {
                player.pos.x += step;
            }
        }
        if platform.pos.x + platform.size.x >= motion.end_pos {
            platform.pos.x = (motion.end_pos - platform.size.x).max(motion.origin.x);
            motion.reverse = true;
        }
    } else {
        let step = motion.speed.min(platform.pos.x - motion.origin.x);
        if step > 0.0 {
            platform.pos.x -= step;
            if carried && !keys.right {
                player.pos.x -= step;
            }
        }
        if platform.pos.x <= motion.origin.x {
            platform.pos.x = motion.origin.x;
            motion.reverse = false;
        }
    }

    push_player(platform, motion, player);
}

/// Vertical oscillation. Never carries the player; only horizontal motion
/// does.
fn vertical_motion(platform: &mut Platform, motion: &mut Motion) {
    if !motion.reverse {
        let step = motion.speed.min(motion.end_pos - (platform.pos.y + platform.size.y));
        if step > 0.0 {
            platform.pos.y += step;
        }
        if platform.pos.y + platform.size.y >= motion.end_pos {
            platform.pos.y = (motion.end_pos - platform.size.y).max(motion.origin.y);
            motion.reverse = true;
        }
    } else {
        let step = motion.speed.min(platform.pos.y - motion.origin.y);
        if step > 0.0 {
            platform.pos.y -= step;
        }
        if platform.pos.y <= motion.origin.y {
            platform.pos.y = motion.origin.y;
            motion.reverse = false;
        }
    }
}

/// A platform moving into a player overlapping its leading face shoves them
/// flush with that face, nudging them slightly downward.
fn push_player(platform: &Platform, motion: &Motion, player: &mut Player) {
    let plat = platform.aabb();
    if motion.reverse {
        if player.pos.y < plat.bottom() - 1.0
            && player.bottom() > plat.bottom()
            && player.right() > plat.pos.x
            && player.right() < plat.right()
        {
            player.pos.x = plat.pos.x - player.size.x;
            player.pos.y += player.gravity / 5.0;
        }
    } else if player.pos.y < plat.bottom() - 1.0
        && player.bottom() > plat.bottom()
        && player.pos.x < plat.right()
        && player.right() > plat.right()
    {
        player.pos.x = plat.right() + 1.0;
        player.pos.y += player.gravity / 5.0;
    }
}

/// Resolve one platform against the player and fold the result into the
/// tick's aggregate report.
pub fn resolve(
    platform: &mut Platform,
    player: &mut Player,
    report: &mut CollisionReport,
    keys: &mut KeyState,
) {
    let plat = platform.aabb();

    // Cull: out of activation range, stop counting this platform entirely.
    // The aggregate moves once per transition, not once per tick.
    if distance_between(&plat, &player.aabb()) > platform.check_distance {
        platform.tint = Tint::Culled;
        if platform.active {
            report.active_platforms = report.active_platforms.saturating_sub(1);
            platform.active = false;
        }
        return;
    }
    if !platform.active {
        report.active_platforms += 1;
        platform.active = true;
    }

    // Top contact: x-spans overlap and the player's bottom edge sits within
    // [top - 2, bottom].
    if player.pos.x <= plat.right()
        && player.right() > plat.pos.x
        && player.bottom() >= plat.pos.y - 2.0
        && player.bottom() <= plat.bottom()
    {
        player.falling = false;
        // Keep this tick's vertical motion from driving the player through
        // the surface
        let gap = plat.pos.y - player.bottom();
        if player.vel.y > gap {
            player.vel.y = gap;
        }
        // Multiple platforms can fight over the same contact; fix any
        // leftover penetration
        if player.bottom() > plat.pos.y {
            player.pos.y = plat.pos.y - player.size.y;
        }
        platform.tint = Tint::OnTop;
        report.contact = Some(Contact::OnTop);
        report.contact_platform = Some(platform.id);
    } else {
        report.missed_platforms += 1;
        platform.tint = Tint::Missed;
    }

    // Head contact, independent of the top test. The four x-span cases:
    // player wider than the platform, left corner inside, right corner
    // inside, player contained.
    let x_span_hit = (player.pos.x <= plat.pos.x && player.right() >= plat.right())
        || (player.pos.x < plat.pos.x && player.right() >= plat.pos.x)
        || (player.pos.x < plat.right() && player.right() >= plat.right())
        || (player.pos.x >= plat.pos.x && player.right() <= plat.right());
    if x_span_hit && player.bottom() > plat.bottom() && player.pos.y <= plat.bottom() {
        player.vel.y = -player.vel.y;
        report.contact = Some(Contact::Bottom);
        report.contact_platform = Some(platform.id);
        if player.pos.y <= plat.bottom() {
            player.pos.y = plat.bottom() + 1.0;
        }
    }

    // Side contacts only matter while the matching key is held; resolving
    // one forces the key back up until the host presses it again.
    let hit_left_face = distance_between(&plat, &player.aabb()) < player.size.x * 2.0
        && player.pos.y < plat.bottom()
        && player.right() >= plat.pos.x - 2.0
        && player.pos.x < plat.pos.x
        && (player.bottom() > plat.pos.y
            || (player.pos.y >= plat.pos.y && player.bottom() <= plat.bottom())
            || (player.bottom() >= plat.bottom() && player.pos.y <= plat.bottom()));
    if hit_left_face && keys.right {
        player.vel.x = 0.0;
        keys.right = false;
        report.contact = Some(Contact::Left);
        report.contact_platform = Some(platform.id);
    }

    // The right face runs a far looser distance gate than the left
    let hit_right_face =
        distance_between(&plat, &player.aabb()) < player.size.x * (player.size.x * 2.0)
            && player.pos.y < plat.bottom()
            && player.pos.x >= plat.right()
            && player.pos.x < plat.right() + 2.0
            && (player.bottom() >= plat.pos.y
                || (player.pos.y >= plat.pos.y && player.bottom() <= plat.bottom())
                || (player.bottom() >= plat.bottom() && player.pos.y <= plat.bottom()));
    if hit_right_face && keys.left {
        player.vel.x = 0.0;
        keys.left = false;
        report.contact = Some(Contact::Right);
        report.contact_platform = Some(platform.id);
    }
}
