//! Player and entity motion
//!
//! `scale` is the frame scale from [`GameConfig::frame_scale`]: 1.0 for a
//! fixed 60 Hz step, `dt * 60` with delta-time scaling. Damping is applied
//! per tick regardless of scale.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Asteroid, BlackHole, Platform, Player, ShieldPickup, Star};
use crate::config::GameConfig;
use crate::consts::*;

/// Held horizontal controls
#[derive(Debug, Clone, Copy, Default)]
pub struct Steering {
    pub left: bool,
    pub right: bool,
}

/// Acceleration the black hole exerts on a body at `center`
///
/// Inverse-square toward the hole with the squared distance clamped, already
/// multiplied by the pull factor.
pub fn black_hole_pull(center: Vec2, hole: &BlackHole, strength: f32) -> Vec2 {
    let delta = hole.pos - center;
    let dist_sq = delta.length_squared().max(BLACK_HOLE_MIN_DIST * BLACK_HOLE_MIN_DIST);
    let force = strength / dist_sq;
    let dist = dist_sq.sqrt();
    delta / dist * force * BLACK_HOLE_PULL_FACTOR
}

/// Advance the player one tick
///
/// Order: steering, gravity and pull (only while running), integration,
/// damping, then the horizontal clamp.
pub fn step_player(
    player: &mut Player,
    hole: &BlackHole,
    config: &GameConfig,
    steering: Steering,
    elapsed_secs: f32,
    running: bool,
    scale: f32,
) {
    if steering.left {
        player.vel.x -= config.move_accel;
    }
    if steering.right {
        player.vel.x += config.move_accel;
    }

    if running {
        player.vel.y += config.gravity.at(elapsed_secs) * scale;

        let strength = config.black_hole_strength.at(elapsed_secs);
        player.vel += black_hole_pull(player.center(), hole, strength) * scale;
    }

    player.pos += player.vel * scale;

    // Damping after integration
    player.vel.x *= FRICTION_X;
    player.vel.y *= FRICTION_Y;

    clamp_to_canvas(player, config.canvas_width);
}

/// Keep the player inside `[0, width - player width]`, killing vx on contact
pub fn clamp_to_canvas(player: &mut Player, canvas_width: f32) {
    if player.pos.x < 0.0 {
        player.pos.x = 0.0;
        player.vel.x = 0.0;
    } else if player.pos.x + player.size.x > canvas_width {
        player.pos.x = canvas_width - player.size.x;
        player.vel.x = 0.0;
    }
}

/// Scroll platforms down, tick their flash, prune the ones below the canvas
pub fn move_platforms(platforms: &mut Vec<Platform>, fall_speed: f32, scale: f32, canvas_height: f32) {
    for platform in platforms.iter_mut() {
        platform.pos.y += fall_speed * scale;
        // Flash decays per frame, not per second
        platform.hit_flash = platform.hit_flash.saturating_sub(1);
    }
    platforms.retain(|p| p.pos.y <= canvas_height + PLATFORM_DESPAWN_MARGIN);
}

/// Move asteroids and prune those that left the canvas
pub fn move_asteroids(asteroids: &mut Vec<Asteroid>, scale: f32, canvas_width: f32, canvas_height: f32) {
    for asteroid in asteroids.iter_mut() {
        asteroid.pos += asteroid.vel * scale;
    }
    asteroids.retain(|a| {
        a.pos.y <= canvas_height + a.radius && a.pos.x >= -a.radius && a.pos.x <= canvas_width + a.radius
    });
}

/// Let the shield pickup fall at platform speed; drop it once off-screen
pub fn move_shield(pickup: &mut Option<ShieldPickup>, fall_speed: f32, scale: f32, canvas_height: f32) {
    if let Some(shield) = pickup {
        shield.pos.y += fall_speed * scale;
        if shield.pos.y > canvas_height + shield.radius * 2.0 {
            *pickup = None;
        }
    }
}

/// Scroll stars; wrapped stars reappear at the top at a new x
pub fn drift_stars(stars: &mut [Star], canvas_width: f32, canvas_height: f32, rng: &mut Pcg32) {
    for star in stars.iter_mut() {
        star.pos.y += star.speed;
        if star.pos.y > canvas_height {
            star.pos.y = 0.0;
            star.pos.x = rng.random::<f32>() * canvas_width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn airborne_player(cfg: &GameConfig) -> Player {
        let mut p = Player::new(cfg);
        p.grounded = false;
        p
    }

    #[test]
    fn test_idle_player_ignores_gravity() {
        let cfg = GameConfig::classic();
        let hole = BlackHole::new(&cfg);
        let mut p = airborne_player(&cfg);
        let y = p.pos.y;
        step_player(&mut p, &hole, &cfg, Steering::default(), 0.0, false, 1.0);
        assert_eq!(p.pos.y, y);
        assert_eq!(p.vel, Vec2::ZERO);
    }

    #[test]
    fn test_damping_applies_after_integration() {
        let mut cfg = GameConfig::classic();
        cfg.black_hole_strength.base = 0.0;
        cfg.black_hole_strength.rate_per_sec = 0.0;
        let hole = BlackHole::new(&cfg);
        let mut p = airborne_player(&cfg);
        let x0 = p.pos.x;
        step_player(
            &mut p,
            &hole,
            &cfg,
            Steering { left: false, right: true },
            0.0,
            true,
            1.0,
        );
        // Full accel moved the player, then velocity was damped
        assert!((p.pos.x - (x0 + 0.4)).abs() < 1e-5);
        assert!((p.vel.x - 0.4 * FRICTION_X).abs() < 1e-6);
        // Gravity integrated undamped, then damped
        assert!((p.vel.y - 0.5 * FRICTION_Y).abs() < 1e-6);
    }

    #[test]
    fn test_pull_points_at_hole_and_clamps() {
        let cfg = GameConfig::classic();
        let hole = BlackHole::new(&cfg);
        let above = hole.pos - Vec2::new(0.0, 300.0);
        let pull = black_hole_pull(above, &hole, 200_000.0);
        assert!(pull.y > 0.0);
        assert!(pull.x.abs() < 1e-6);
        let expected = 200_000.0 / (300.0 * 300.0) * BLACK_HOLE_PULL_FACTOR;
        assert!((pull.y - expected).abs() < 1e-5);

        // At the center the clamp keeps the pull finite
        let at_center = black_hole_pull(hole.pos, &hole, 200_000.0);
        assert!(at_center.is_finite());
    }

    #[test]
    fn test_delta_time_scales_motion() {
        let mut cfg = GameConfig::shielded();
        cfg.black_hole_strength.base = 0.0;
        cfg.black_hole_strength.rate_per_sec = 0.0;
        let hole = BlackHole::new(&cfg);
        let mut p = airborne_player(&cfg);
        let y0 = p.pos.y;
        // A 30 Hz frame counts double
        step_player(&mut p, &hole, &cfg, Steering::default(), 0.0, true, 2.0);
        assert!((p.pos.y - (y0 + 0.5 * 2.0 * 2.0)).abs() < 1e-4);
    }

    #[test]
    fn test_platforms_pruned_below_canvas() {
        let mut platforms = vec![
            Platform {
                id: 1,
                pos: Vec2::new(0.0, 640.0),
                size: Vec2::new(70.0, 10.0),
                hit_flash: 3,
            },
            Platform {
                id: 2,
                pos: Vec2::new(0.0, 649.0),
                size: Vec2::new(70.0, 10.0),
                hit_flash: 0,
            },
        ];
        move_platforms(&mut platforms, 2.0, 1.0, 600.0);
        assert_eq!(platforms.len(), 1);
        assert_eq!(platforms[0].id, 1);
        assert_eq!(platforms[0].hit_flash, 2);
    }

    #[test]
    fn test_asteroids_pruned_off_screen() {
        let mut asteroids = vec![
            Asteroid {
                id: 1,
                pos: Vec2::new(-9.0, 100.0),
                radius: 10.0,
                vel: Vec2::new(-2.0, 4.0),
            },
            Asteroid {
                id: 2,
                pos: Vec2::new(200.0, 100.0),
                radius: 10.0,
                vel: Vec2::new(0.5, 4.0),
            },
        ];
        move_asteroids(&mut asteroids, 1.0, 400.0, 600.0);
        assert_eq!(asteroids.len(), 1);
        assert_eq!(asteroids[0].id, 2);
        assert_eq!(asteroids[0].pos, Vec2::new(200.5, 104.0));
    }

    #[test]
    fn test_shield_falls_and_expires() {
        let mut pickup = Some(ShieldPickup {
            pos: Vec2::new(10.0, 620.0),
            radius: 12.5,
        });
        move_shield(&mut pickup, 3.0, 1.0, 600.0);
        assert!(pickup.is_some());
        move_shield(&mut pickup, 3.0, 1.0, 600.0);
        assert!(pickup.is_none());
    }

    proptest! {
        #[test]
        fn prop_player_stays_inside_canvas(
            x in -200.0f32..600.0,
            vx in -50.0f32..50.0,
            left in any::<bool>(),
            right in any::<bool>(),
            scale in 0.1f32..6.0,
        ) {
            let cfg = GameConfig::shielded();
            let hole = BlackHole::new(&cfg);
            let mut p = Player::new(&cfg);
            p.pos.x = x;
            p.vel.x = vx;
            step_player(&mut p, &hole, &cfg, Steering { left, right }, 5.0, true, scale);
            prop_assert!(p.pos.x >= 0.0);
            prop_assert!(p.pos.x <= cfg.canvas_width - p.size.x);
        }
    }
}
