//! Game state and core simulation types
//!
//! One `GameState` is one play session: it owns every entity, the spawn clock
//! and the seeded RNG, so two states built from the same seed and fed the same
//! inputs evolve identically.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn::{self, SpawnClock};
use crate::box_center;
use crate::config::GameConfig;
use crate::consts::*;

/// Salt separating the cosmetic RNG stream from the gameplay one
const FX_SEED_SALT: u64 = 0x5DEE_CE66_D1CE_5EED;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Standing on the start platform, waiting for the first horizontal input
    Idle,
    /// Active gameplay
    Running,
    /// Run ended (terminal)
    GameOver,
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    Asteroid,
    BlackHole,
}

impl GameOverCause {
    pub fn message(&self) -> &'static str {
        match self {
            GameOverCause::Asteroid => "Game Over! (Hit by a meteor)",
            GameOverCause::BlackHole => "Game Over! (Swallowed by the black hole)",
        }
    }
}

/// Notable things that happened during a tick (drained by the session)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Landed { platform_id: u32 },
    Jumped { buffered: bool },
    PlatformSpawned { id: u32 },
    AsteroidSpawned { id: u32 },
    ShieldSpawned,
    ShieldCollected,
    /// Shield consumed by an asteroid hit
    ShieldAbsorbed { asteroid_id: u32 },
    GameOver { cause: GameOverCause },
}

/// The player sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_impulse: f32,
    /// Able to jump (standing, or still inside coyote grace)
    pub grounded: bool,
    /// Coyote frames remaining
    pub coyote: f32,
    /// Jump buffer frames remaining
    pub jump_buffer: f32,
    pub shield: bool,
    /// Damage flicker frames remaining after a shield hit
    pub hit_flash: u32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.canvas_width / 2.0 - PLAYER_SIZE / 2.0, PLAYER_SPAWN_Y),
            vel: Vec2::ZERO,
            size: Vec2::splat(PLAYER_SIZE),
            jump_impulse: config.jump_impulse,
            grounded: false,
            coyote: 0.0,
            jump_buffer: 0.0,
            shield: false,
            hit_flash: 0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        box_center(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Collision radius used against round things
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.size.x / 2.0
    }

    /// Launch upward, consuming both forgiveness windows
    pub fn jump(&mut self) {
        self.vel.y = self.jump_impulse;
        self.grounded = false;
        self.jump_buffer = 0.0;
        self.coyote = 0.0;
    }

    /// Handle a jump key press: arm the buffer, then try the instant jump
    ///
    /// Returns true if the jump happened immediately.
    pub fn press_jump(&mut self, allow_coyote: bool) -> bool {
        self.jump_buffer = JUMP_BUFFER_FRAMES;
        if self.grounded || (allow_coyote && self.coyote > 0.0) {
            self.jump();
            return true;
        }
        false
    }

    /// Count the forgiveness windows down by `frames` (never below zero)
    pub fn decay_timers(&mut self, frames: f32) {
        self.coyote = (self.coyote - frames).max(0.0);
        self.jump_buffer = (self.jump_buffer - frames).max(0.0);
    }
}

/// The gravity well below the screen (immutable during a session)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BlackHole {
    pub pos: Vec2,
    pub radius: f32,
}

impl BlackHole {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(
                config.canvas_width / 2.0,
                config.canvas_height + BLACK_HOLE_DEPTH,
            ),
            radius: BLACK_HOLE_RADIUS,
        }
    }

    /// True if `point` is strictly inside the event horizon
    #[inline]
    pub fn swallows(&self, point: Vec2) -> bool {
        point.distance(self.pos) < self.radius
    }
}

/// A falling platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Landing flash frames remaining
    pub hit_flash: u32,
}

impl Platform {
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }
}

/// A falling meteor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    pub vel: Vec2,
}

/// Shield pickup (at most one alive)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShieldPickup {
    /// Top-left corner of the pickup's bounding box
    pub pos: Vec2,
    pub radius: f32,
}

impl ShieldPickup {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius)
    }
}

/// Decorative background star
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (spawn positions, sizes and intervals)
    rng: Pcg32,
    /// Cosmetic RNG (stars), kept apart so visuals never perturb gameplay
    fx_rng: Pcg32,
    pub phase: GamePhase,
    /// Seconds since the session started running
    pub elapsed: f32,
    /// Simulation ticks while running
    pub time_ticks: u64,
    pub player: Player,
    pub black_hole: BlackHole,
    /// Active platforms (spawn order)
    pub platforms: Vec<Platform>,
    /// Active asteroids (spawn order)
    pub asteroids: Vec<Asteroid>,
    pub shield_pickup: Option<ShieldPickup>,
    pub stars: Vec<Star>,
    pub spawner: SpawnClock,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh session: player standing on a platform, nothing spawning yet
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut state = Self {
            player: Player::new(&config),
            black_hole: BlackHole::new(&config),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ FX_SEED_SALT),
            phase: GamePhase::Idle,
            elapsed: 0.0,
            time_ticks: 0,
            platforms: Vec::new(),
            asteroids: Vec::new(),
            shield_pickup: None,
            stars: Vec::new(),
            spawner: SpawnClock::default(),
            events: Vec::new(),
            next_id: 1,
        };

        state.stars = spawn::random_stars(&state.config, &mut state.fx_rng);
        state.spawn_initial_platforms();

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Lay out the start platform under the player plus random extras
    fn spawn_initial_platforms(&mut self) {
        let height = spawn::platform_height(&self.config.thinning, 0.0);
        let start_id = self.next_entity_id();
        let start = spawn::start_platform(&self.player, height, start_id);

        // Stand on it so the first input finds a valid stance
        self.player.pos.y = start.top() - self.player.size.y;
        self.player.vel.y = 0.0;
        self.player.grounded = true;
        self.platforms.push(start);

        for _ in 1..INITIAL_PLATFORMS {
            let id = self.next_entity_id();
            let platform = spawn::initial_platform(&self.config, height, &mut self.rng, id);
            self.platforms.push(platform);
        }
    }

    /// Begin the run if the player is in a valid stance
    ///
    /// Returns true if the session transitioned to `Running`.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle || !self.player.grounded {
            return false;
        }
        self.phase = GamePhase::Running;
        self.elapsed = 0.0;
        self.spawner.start(&self.config, &mut self.rng);
        self.events.push(GameEvent::Started);
        log::info!("Session started (seed {})", self.seed);
        true
    }

    /// Cancel every pending spawn timer (tab hidden)
    pub fn suspend_spawners(&mut self) {
        self.spawner.stop();
    }

    /// Restart any cancelled spawn timers; no-op unless running
    pub fn resume_spawners(&mut self) {
        if self.is_running() {
            self.spawner.start(&self.config, &mut self.rng);
        }
    }

    /// Advance spawn timers by `dt_ms` and create whatever came due
    pub fn run_spawners(&mut self, dt_ms: f32) {
        let due = self.spawner.advance(dt_ms, &self.config, &mut self.rng);

        for _ in 0..due.platforms {
            let id = self.next_entity_id();
            let platform = spawn::falling_platform(&self.config, self.elapsed, &mut self.rng, id);
            log::trace!("Platform {} spawned (height {:.2})", id, platform.size.y);
            self.platforms.push(platform);
            self.events.push(GameEvent::PlatformSpawned { id });
        }

        for _ in 0..due.asteroids {
            let id = self.next_entity_id();
            let asteroid = spawn::asteroid(&self.config, &mut self.rng, id);
            log::debug!("Asteroid {} spawned (r={:.1})", id, asteroid.radius);
            self.asteroids.push(asteroid);
            self.events.push(GameEvent::AsteroidSpawned { id });
        }

        for _ in 0..due.shields {
            let Some(shield) = self.config.shield else {
                continue;
            };
            if self.shield_pickup.is_some() {
                continue;
            }
            self.shield_pickup = Some(spawn::shield_pickup(
                &shield,
                self.config.canvas_width,
                &mut self.rng,
            ));
            log::debug!("Shield pickup spawned");
            self.events.push(GameEvent::ShieldSpawned);
        }
    }

    /// Scroll the background; purely cosmetic
    pub fn drift_stars(&mut self) {
        super::physics::drift_stars(
            &mut self.stars,
            self.config.canvas_width,
            self.config.canvas_height,
            &mut self.fx_rng,
        );
    }

    /// Enter the terminal phase (idempotent)
    pub fn finish(&mut self, cause: GameOverCause) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.spawner.stop();
        self.events.push(GameEvent::GameOver { cause });
        log::info!("Game over after {:.1}s: {:?}", self.elapsed, cause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_stands_on_start_platform() {
        let state = GameState::new(GameConfig::shielded(), 7);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.platforms.len(), INITIAL_PLATFORMS);
        assert!(state.player.grounded);

        let start = &state.platforms[0];
        assert_eq!(state.player.bottom(), start.top());
        // Centered under the player
        let player_mid = state.player.center().x;
        let platform_mid = start.pos.x + start.size.x / 2.0;
        assert!((player_mid - platform_mid).abs() < 1e-4);
    }

    #[test]
    fn test_initial_platforms_in_upper_band() {
        let cfg = GameConfig::classic();
        let state = GameState::new(cfg.clone(), 99);
        for p in &state.platforms[1..] {
            assert!(p.pos.x >= 0.0 && p.pos.x <= cfg.canvas_width - PLATFORM_WIDTH);
            assert!(p.pos.y >= INITIAL_PLATFORM_TOP);
            assert!(p.pos.y < INITIAL_PLATFORM_TOP + cfg.canvas_height * INITIAL_PLATFORM_BAND);
        }
    }

    #[test]
    fn test_start_requires_stance() {
        let mut state = GameState::new(GameConfig::classic(), 1);
        state.player.grounded = false;
        assert!(!state.start());
        assert_eq!(state.phase, GamePhase::Idle);

        state.player.grounded = true;
        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.spawner.is_running());
        assert!(!state.start(), "start is one-shot");
    }

    #[test]
    fn test_finish_is_terminal() {
        let mut state = GameState::new(GameConfig::shielded(), 3);
        state.start();
        state.finish(GameOverCause::Asteroid);
        state.finish(GameOverCause::BlackHole);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.spawner.is_running());
        let overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);

        // Cannot restart a finished session
        assert!(!state.start());
    }

    #[test]
    fn test_press_jump_arms_buffer_when_airborne() {
        let mut player = Player::new(&GameConfig::classic());
        player.grounded = false;
        player.coyote = 3.0;

        // Classic: coyote does not allow the instant jump
        assert!(!player.press_jump(false));
        assert_eq!(player.jump_buffer, JUMP_BUFFER_FRAMES);

        // Shielded: it does
        assert!(player.press_jump(true));
        assert_eq!(player.vel.y, player.jump_impulse);
        assert_eq!(player.jump_buffer, 0.0);
        assert_eq!(player.coyote, 0.0);
    }

    #[test]
    fn test_decay_timers_clamps_at_zero() {
        let mut player = Player::new(&GameConfig::shielded());
        player.coyote = 1.0;
        player.jump_buffer = 2.5;
        player.decay_timers(1.5);
        assert_eq!(player.coyote, 0.0);
        assert_eq!(player.jump_buffer, 1.0);
    }

    #[test]
    fn test_black_hole_swallows_inside_radius() {
        let cfg = GameConfig::classic();
        let hole = BlackHole::new(&cfg);
        assert!(hole.swallows(hole.pos));
        assert!(!hole.swallows(hole.pos - Vec2::new(0.0, hole.radius)));
        assert!(hole.swallows(hole.pos - Vec2::new(0.0, hole.radius - 0.01)));
    }
}
