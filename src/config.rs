//! Data-driven game balance
//!
//! Both shipped variants run the same simulation; everything that differs
//! between them lives in [`GameConfig`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Shipped game variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Original fixed-step game: no pickups, no best time
    Classic,
    /// Delta-time physics, shield pickups, lensing and a persisted best time
    #[default]
    Shielded,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Shielded => "Shielded",
        }
    }

    /// Balance preset for this variant
    pub fn config(&self) -> GameConfig {
        match self {
            Variant::Classic => GameConfig::classic(),
            Variant::Shielded => GameConfig::shielded(),
        }
    }
}

/// Variant name that matches no shipped variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown variant `{0}`")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" | "1" | "v1" => Ok(Variant::Classic),
            "shielded" | "shield" | "2" | "v2" => Ok(Variant::Shielded),
            _ => Err(UnknownVariant(s.to_owned())),
        }
    }
}

/// A quantity that grows linearly with elapsed session time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub base: f32,
    pub rate_per_sec: f32,
}

impl Curve {
    pub const fn new(base: f32, rate_per_sec: f32) -> Self {
        Self { base, rate_per_sec }
    }

    #[inline]
    pub fn at(&self, elapsed_secs: f32) -> f32 {
        self.base + self.rate_per_sec * elapsed_secs
    }
}

/// How asteroid spawns are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AsteroidCadence {
    /// Repeating fixed interval
    Fixed { interval_ms: f32 },
    /// Self-rescheduling, uniform in [min_ms, max_ms) after each spawn
    Random { min_ms: f32, max_ms: f32 },
}

/// Platform thinning parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thinning {
    pub base_height: f32,
    pub max_thinning: f32,
    pub duration_secs: f32,
}

/// Shield pickup parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShieldConfig {
    pub spawn_interval_ms: f32,
    /// Pickup diameter
    pub size: f32,
    /// Damage flicker length after the shield absorbs a hit
    pub hit_flash_frames: u32,
}

/// Cosmetic gravitational lensing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LensConfig {
    /// Influence radius as a multiple of the black hole radius
    pub radius_factor: f32,
    /// Maximum displacement in pixels
    pub strength: f32,
}

/// Black hole gradient theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Palette {
    Violet,
    Ember,
}

/// Complete tuning for one simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub variant: Variant,

    // === Arena ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Difficulty curves ===
    pub gravity: Curve,
    pub black_hole_strength: Curve,
    pub platform_fall_speed: Curve,
    pub thinning: Thinning,

    // === Player ===
    pub jump_impulse: f32,
    pub move_accel: f32,
    /// Allow the instant (unbuffered) jump during coyote time
    pub coyote_immediate_jump: bool,

    // === Spawning ===
    pub platform_spawn_interval_ms: f32,
    pub asteroid_cadence: AsteroidCadence,
    pub shield: Option<ShieldConfig>,

    // === Timing ===
    /// Scale motion by real frame time normalized to 60 Hz
    pub delta_time: bool,

    // === Presentation ===
    pub lens: Option<LensConfig>,
    pub star_count: usize,
    pub track_best_time: bool,
    pub use_sprites: bool,
    pub palette: Palette,
    /// Damage flicker on the player after a shield hit
    pub flash_effects: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::shielded()
    }
}

impl GameConfig {
    /// Variant 1: fixed 60 Hz step, fixed asteroid interval
    pub fn classic() -> Self {
        Self {
            variant: Variant::Classic,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            gravity: Curve::new(0.5, 0.03),
            black_hole_strength: Curve::new(200_000.0, 10_000.0),
            platform_fall_speed: Curve::new(2.0, 0.1),
            thinning: Thinning {
                base_height: 10.0,
                max_thinning: 7.0,
                duration_secs: 60.0,
            },
            jump_impulse: -12.0,
            move_accel: 0.4,
            coyote_immediate_jump: false,
            platform_spawn_interval_ms: 300.0,
            asteroid_cadence: AsteroidCadence::Fixed {
                interval_ms: 2000.0,
            },
            shield: None,
            delta_time: false,
            lens: None,
            star_count: 0,
            track_best_time: false,
            use_sprites: false,
            palette: Palette::Violet,
            flash_effects: true,
        }
    }

    /// Variant 2: delta-time physics, random asteroid cadence, shields
    pub fn shielded() -> Self {
        Self {
            variant: Variant::Shielded,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            gravity: Curve::new(0.5, 0.001),
            black_hole_strength: Curve::new(200_000.0, 25_000.0),
            platform_fall_speed: Curve::new(3.0, 0.05),
            thinning: Thinning {
                base_height: 10.0,
                max_thinning: 7.0,
                duration_secs: 30.0,
            },
            jump_impulse: -16.0,
            move_accel: 0.3,
            coyote_immediate_jump: true,
            platform_spawn_interval_ms: 280.0,
            asteroid_cadence: AsteroidCadence::Random {
                min_ms: 3000.0,
                max_ms: 5000.0,
            },
            shield: Some(ShieldConfig {
                spawn_interval_ms: 10_000.0,
                size: 25.0,
                hit_flash_frames: 30,
            }),
            delta_time: true,
            lens: Some(LensConfig {
                radius_factor: 1.5,
                strength: 10.0,
            }),
            star_count: 150,
            track_best_time: true,
            use_sprites: true,
            palette: Palette::Ember,
            flash_effects: true,
        }
    }

    /// Resize the arena to the host canvas
    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Motion scale for a frame of `dt` seconds
    ///
    /// With delta-time scaling off every tick counts as one 60 Hz frame.
    #[inline]
    pub fn frame_scale(&self, dt: f32) -> f32 {
        if self.delta_time { dt * BASELINE_FPS } else { 1.0 }
    }

    /// Number of sprites the host has to settle before play can start
    pub fn sprite_count(&self) -> usize {
        if self.use_sprites { 3 } else { 0 }
    }

    /// Prompt shown while assets are still loading
    pub fn loading_prompt(&self) -> &'static str {
        if self.use_sprites {
            "...Loading Images..."
        } else {
            "...Loading..."
        }
    }
}
