//! Collision checks and the jump state machine
//!
//! Landing is tested against the platform's top band rather than by
//! post-move containment, so a fast fall cannot tunnel through a thin
//! platform:
//!
//! ```text
//! overlap_x && vy >= 0 && player_bottom >= top && player_top < top + height
//! ```

use super::state::{Asteroid, BlackHole, Platform, Player, ShieldPickup};
use crate::consts::*;

/// Outcome of the landing pass for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Landing {
    /// Last platform the player was snapped onto
    pub platform_id: Option<u32>,
    /// A buffered jump fired this tick
    pub buffered_jump: bool,
}

/// True if the player's bottom edge is crossing into the platform's top band
#[inline]
pub fn lands_on(player: &Player, platform: &Platform) -> bool {
    let overlap_x = player.pos.x + player.size.x > platform.pos.x
        && player.pos.x < platform.pos.x + platform.size.x;
    overlap_x
        && player.vel.y >= 0.0
        && player.bottom() >= platform.top()
        && player.pos.y < platform.top() + platform.size.y
}

/// Snap onto platforms, run coyote bookkeeping, and fire a buffered jump
///
/// Player states: grounded, airborne with coyote frames left, airborne
/// without. Every platform is scanned; each hit re-snaps, so the last one wins.
pub fn resolve_landing(player: &mut Player, platforms: &mut [Platform]) -> Landing {
    let mut landing = Landing::default();

    for platform in platforms.iter_mut() {
        if lands_on(player, platform) {
            player.pos.y = platform.top() - player.size.y;
            player.vel.y = 0.0;
            player.grounded = true;
            player.coyote = COYOTE_TIME_FRAMES;
            platform.hit_flash = PLATFORM_HIT_FRAMES;
            landing.platform_id = Some(platform.id);
        }
    }

    if landing.platform_id.is_none() && player.coyote <= 0.0 {
        player.grounded = false;
    }

    if (player.grounded || player.coyote > 0.0) && player.jump_buffer > 0.0 {
        player.jump();
        landing.buffered_jump = true;
    }

    landing
}

/// Index of the asteroid touching the player, scanning newest first
pub fn asteroid_hit(player: &Player, asteroids: &[Asteroid]) -> Option<usize> {
    let center = player.center();
    let reach = player.half_width();
    asteroids
        .iter()
        .enumerate()
        .rev()
        .find(|(_, a)| center.distance(a.pos) < a.radius + reach)
        .map(|(i, _)| i)
}

/// True if the player touches the shield pickup
#[inline]
pub fn touches_pickup(player: &Player, pickup: &ShieldPickup) -> bool {
    player.center().distance(pickup.center()) < pickup.radius + player.half_width()
}

/// True once the player's center is inside the event horizon
#[inline]
pub fn absorbed(player: &Player, hole: &BlackHole) -> bool {
    hole.swallows(player.center())
}
