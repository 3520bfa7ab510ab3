//! Entity factories and spawn scheduling
//!
//! Spawn cadence is tracked as "time until next spawn" accumulators that the
//! tick advances, so spawning is deterministic and independent of host timers.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Asteroid, Platform, Player, ShieldPickup, Star};
use crate::config::{AsteroidCadence, GameConfig, ShieldConfig, Thinning};
use crate::consts::*;

/// Platform height after `elapsed_secs` of thinning
///
/// Always within `[base - max_thinning, base]` and non-increasing in time.
pub fn platform_height(thinning: &Thinning, elapsed_secs: f32) -> f32 {
    let ratio = if thinning.duration_secs > 0.0 {
        (elapsed_secs / thinning.duration_secs).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let height = thinning.base_height - thinning.max_thinning * ratio;
    height.max(thinning.base_height - thinning.max_thinning)
}

/// Platform directly under the player's feet
pub fn start_platform(player: &Player, height: f32, id: u32) -> Platform {
    Platform {
        id,
        pos: Vec2::new(
            player.center().x - PLATFORM_WIDTH / 2.0,
            player.bottom() + START_PLATFORM_GAP,
        ),
        size: Vec2::new(PLATFORM_WIDTH, height),
        hit_flash: 0,
    }
}

/// Pre-placed platform somewhere in the upper part of the canvas
pub fn initial_platform(config: &GameConfig, height: f32, rng: &mut Pcg32, id: u32) -> Platform {
    let x = rng.random::<f32>() * (config.canvas_width - PLATFORM_WIDTH);
    let y = INITIAL_PLATFORM_TOP + rng.random::<f32>() * (config.canvas_height * INITIAL_PLATFORM_BAND);
    Platform {
        id,
        pos: Vec2::new(x, y),
        size: Vec2::new(PLATFORM_WIDTH, height),
        hit_flash: 0,
    }
}

/// Platform entering from just above the visible area
pub fn falling_platform(config: &GameConfig, elapsed_secs: f32, rng: &mut Pcg32, id: u32) -> Platform {
    let height = platform_height(&config.thinning, elapsed_secs);
    Platform {
        id,
        pos: Vec2::new(rng.random::<f32>() * (config.canvas_width - PLATFORM_WIDTH), -height),
        size: Vec2::new(PLATFORM_WIDTH, height),
        hit_flash: 0,
    }
}

/// Meteor entering from above with a random size and drift
pub fn asteroid(config: &GameConfig, rng: &mut Pcg32, id: u32) -> Asteroid {
    let radius = rng.random::<f32>() * (ASTEROID_MAX_SIZE - ASTEROID_MIN_SIZE) + ASTEROID_MIN_SIZE;
    let x = rng.random::<f32>() * config.canvas_width;
    let drift = (rng.random::<f32>() - 0.5) * ASTEROID_DRIFT;
    Asteroid {
        id,
        pos: Vec2::new(x, -radius),
        radius,
        vel: Vec2::new(drift, ASTEROID_FALL_SPEED),
    }
}

/// Shield pickup entering from above
pub fn shield_pickup(shield: &ShieldConfig, canvas_width: f32, rng: &mut Pcg32) -> ShieldPickup {
    ShieldPickup {
        pos: Vec2::new(rng.random::<f32>() * (canvas_width - shield.size), -shield.size),
        radius: shield.size / 2.0,
    }
}

/// Background starfield
pub fn random_stars(config: &GameConfig, rng: &mut Pcg32) -> Vec<Star> {
    (0..config.star_count)
        .map(|_| Star {
            pos: Vec2::new(
                rng.random::<f32>() * config.canvas_width,
                rng.random::<f32>() * config.canvas_height,
            ),
            radius: rng.random::<f32>() * 1.5,
            speed: rng.random::<f32>() * 0.3 + 0.1,
        })
        .collect()
}

/// Delay before the next asteroid under `cadence`
fn asteroid_delay(cadence: &AsteroidCadence, rng: &mut Pcg32) -> f32 {
    match *cadence {
        AsteroidCadence::Fixed { interval_ms } => interval_ms,
        AsteroidCadence::Random { min_ms, max_ms } => rng.random::<f32>() * (max_ms - min_ms) + min_ms,
    }
}

/// Spawns that came due during one `SpawnClock::advance`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnDue {
    pub platforms: u32,
    pub asteroids: u32,
    pub shields: u32,
}

/// Milliseconds until each spawner fires next; `None` means cancelled
#[derive(Debug, Clone, Default)]
pub struct SpawnClock {
    platform: Option<f32>,
    asteroid: Option<f32>,
    shield: Option<f32>,
}

/// Shortest interval honored, so a zero interval cannot stall `advance`
const MIN_INTERVAL_MS: f32 = 1.0;

impl SpawnClock {
    /// Arm every cancelled spawner; already-armed ones are left alone
    pub fn start(&mut self, config: &GameConfig, rng: &mut Pcg32) {
        if self.platform.is_none() {
            self.platform = Some(config.platform_spawn_interval_ms.max(MIN_INTERVAL_MS));
        }
        if self.asteroid.is_none() {
            self.asteroid = Some(asteroid_delay(&config.asteroid_cadence, rng).max(MIN_INTERVAL_MS));
        }
        if self.shield.is_none() {
            if let Some(shield) = &config.shield {
                self.shield = Some(shield.spawn_interval_ms.max(MIN_INTERVAL_MS));
            }
        }
        log::debug!("Spawn timers armed: {:?}", self);
    }

    /// Cancel every spawner
    pub fn stop(&mut self) {
        if self.is_running() {
            log::debug!("Spawn timers cancelled");
        }
        *self = Self::default();
    }

    pub fn is_running(&self) -> bool {
        self.platform.is_some() || self.asteroid.is_some() || self.shield.is_some()
    }

    /// Milliseconds until the next asteroid, if scheduled
    pub fn asteroid_due_in(&self) -> Option<f32> {
        self.asteroid
    }

    /// Run the clocks forward by `dt_ms`
    pub fn advance(&mut self, dt_ms: f32, config: &GameConfig, rng: &mut Pcg32) -> SpawnDue {
        let mut due = SpawnDue::default();

        if let Some(left) = self.platform.as_mut() {
            let interval = config.platform_spawn_interval_ms.max(MIN_INTERVAL_MS);
            *left -= dt_ms;
            while *left <= 0.0 {
                due.platforms += 1;
                *left += interval;
            }
        }

        if let Some(left) = self.asteroid.as_mut() {
            *left -= dt_ms;
            while *left <= 0.0 {
                due.asteroids += 1;
                *left += asteroid_delay(&config.asteroid_cadence, rng).max(MIN_INTERVAL_MS);
            }
        }

        if let (Some(left), Some(shield)) = (self.shield.as_mut(), config.shield.as_ref()) {
            let interval = shield.spawn_interval_ms.max(MIN_INTERVAL_MS);
            *left -= dt_ms;
            while *left <= 0.0 {
                due.shields += 1;
                *left += interval;
            }
        }

        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn thinning() -> Thinning {
        GameConfig::classic().thinning
    }

    #[test]
    fn test_platform_height_endpoints() {
        let t = thinning();
        assert_eq!(platform_height(&t, 0.0), 10.0);
        assert!((platform_height(&t, 30.0) - 6.5).abs() < 1e-5);
        assert_eq!(platform_height(&t, 60.0), 3.0);
        assert_eq!(platform_height(&t, 600.0), 3.0);
    }

    proptest! {
        #[test]
        fn prop_platform_height_bounded_and_monotonic(a in 0.0f32..500.0, b in 0.0f32..500.0) {
            let t = thinning();
            let (early, late) = if a <= b { (a, b) } else { (b, a) };
            let h_early = platform_height(&t, early);
            let h_late = platform_height(&t, late);
            prop_assert!(h_early <= t.base_height && h_early >= t.base_height - t.max_thinning);
            prop_assert!(h_late <= t.base_height && h_late >= t.base_height - t.max_thinning);
            prop_assert!(h_late <= h_early);
        }
    }

    #[test]
    fn test_asteroid_ranges() {
        let cfg = GameConfig::shielded();
        let mut rng = Pcg32::seed_from_u64(5);
        for id in 0..200 {
            let a = asteroid(&cfg, &mut rng, id);
            assert!(a.radius >= ASTEROID_MIN_SIZE && a.radius <= ASTEROID_MAX_SIZE);
            assert!(a.vel.x >= -0.75 && a.vel.x <= 0.75);
            assert_eq!(a.vel.y, ASTEROID_FALL_SPEED);
            assert_eq!(a.pos.y, -a.radius);
        }
    }

    #[test]
    fn test_fixed_interval_cadence() {
        let cfg = GameConfig::classic();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut clock = SpawnClock::default();
        clock.start(&cfg, &mut rng);

        // 299 ms: nothing yet
        assert_eq!(clock.advance(299.0, &cfg, &mut rng).platforms, 0);
        // crossing 300 ms fires once
        assert_eq!(clock.advance(1.0, &cfg, &mut rng).platforms, 1);
        // a long frame catches up
        assert_eq!(clock.advance(900.0, &cfg, &mut rng).platforms, 3);

        // Classic has no shields
        let due = clock.advance(20_000.0, &cfg, &mut rng);
        assert_eq!(due.shields, 0);
        assert_eq!(due.asteroids, 10);
    }

    #[test]
    fn test_random_cadence_stays_in_range() {
        let cfg = GameConfig::shielded();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut clock = SpawnClock::default();
        clock.start(&cfg, &mut rng);
        let first = clock.asteroid_due_in().unwrap();
        assert!((3000.0..=5000.0).contains(&first));

        // Walk forward one frame at a time and check every rescheduled delay
        let mut last_spawn_ms = 0.0f32;
        let mut now = 0.0f32;
        let mut spawns = 0;
        while spawns < 20 {
            now += 10.0;
            let due = clock.advance(10.0, &cfg, &mut rng);
            if due.asteroids > 0 {
                if spawns > 0 {
                    let gap = now - last_spawn_ms;
                    assert!(gap >= 2990.0 && gap <= 5010.0, "gap {gap}");
                }
                last_spawn_ms = now;
                spawns += 1;
            }
        }
    }

    #[test]
    fn test_stop_and_idempotent_restart() {
        let cfg = GameConfig::shielded();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut clock = SpawnClock::default();
        clock.start(&cfg, &mut rng);
        clock.advance(100.0, &cfg, &mut rng);
        let before = clock.asteroid_due_in();

        // Restart while armed: nothing re-armed, no duplicate timers
        clock.start(&cfg, &mut rng);
        assert_eq!(clock.asteroid_due_in(), before);

        clock.stop();
        assert!(!clock.is_running());
        assert_eq!(clock.advance(60_000.0, &cfg, &mut rng), SpawnDue::default());

        clock.start(&cfg, &mut rng);
        assert!(clock.is_running());
    }

    #[test]
    fn test_shield_pickup_inside_canvas() {
        let cfg = GameConfig::shielded();
        let shield = cfg.shield.unwrap();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..50 {
            let s = shield_pickup(&shield, cfg.canvas_width, &mut rng);
            assert!(s.pos.x >= 0.0 && s.pos.x <= cfg.canvas_width - shield.size);
            assert_eq!(s.pos.y, -shield.size);
            assert_eq!(s.radius, shield.size / 2.0);
        }
    }
}
