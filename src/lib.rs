//! Blackhole Jumper - an arcade platform-dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning)
//! - `renderer`: Draw-list construction and the Canvas2D backend
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Key-value storage used for the best time and settings
//! - `config`: Data-driven game balance for both variants

pub mod config;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use config::{GameConfig, Variant};
pub use highscores::BestTime;
pub use session::{GameOverSummary, Session};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants shared by every variant
pub mod consts {
    /// Reference frame rate the tuned constants were authored against
    pub const BASELINE_FPS: f32 = 60.0;
    /// Reference frame duration (seconds)
    pub const BASELINE_DT: f32 = 1.0 / BASELINE_FPS;
    /// Largest frame delta fed to the simulation (prevents tunneling after stalls)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default canvas dimensions (host overrides with the real canvas size)
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_SPAWN_Y: f32 = 20.0;

    /// Black hole sits below the visible area; only its upper rim shows
    pub const BLACK_HOLE_DEPTH: f32 = 200.0;
    pub const BLACK_HOLE_RADIUS: f32 = 250.0;
    /// Squared-distance clamp for the pull (avoids the singularity)
    pub const BLACK_HOLE_MIN_DIST: f32 = 25.0;
    /// Fraction of the computed force applied to velocity
    pub const BLACK_HOLE_PULL_FACTOR: f32 = 0.01;

    /// Damping applied after integration, every tick
    pub const FRICTION_X: f32 = 0.98;
    pub const FRICTION_Y: f32 = 0.999;

    /// Platforms
    pub const PLATFORM_WIDTH: f32 = 70.0;
    pub const INITIAL_PLATFORMS: usize = 6;
    /// Gap between the player's feet and the start platform
    pub const START_PLATFORM_GAP: f32 = 5.0;
    /// Initial platforms live in [60, 60 + 45% of canvas height)
    pub const INITIAL_PLATFORM_TOP: f32 = 60.0;
    pub const INITIAL_PLATFORM_BAND: f32 = 0.45;
    /// Platforms are pruned once they are this far below the canvas
    pub const PLATFORM_DESPAWN_MARGIN: f32 = 50.0;
    pub const PLATFORM_HIT_FRAMES: u32 = 10;

    /// Jump forgiveness windows (frames at the 60 Hz baseline)
    pub const COYOTE_TIME_FRAMES: f32 = 6.0;
    pub const JUMP_BUFFER_FRAMES: f32 = 8.0;

    /// Asteroids
    pub const ASTEROID_MIN_SIZE: f32 = 10.0;
    pub const ASTEROID_MAX_SIZE: f32 = 25.0;
    pub const ASTEROID_FALL_SPEED: f32 = 4.0;
    /// Horizontal drift is uniform in [-DRIFT/2, DRIFT/2]
    pub const ASTEROID_DRIFT: f32 = 1.5;

    /// Delay between game over and the end-of-session notice
    pub const GAME_OVER_NOTICE_MS: f64 = 30.0;
}

/// Center of an axis-aligned box given its top-left corner and size
#[inline]
pub fn box_center(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size * 0.5
}

/// Format seconds the way the HUD and the persisted best time do (one decimal)
#[inline]
pub fn format_seconds(secs: f32) -> String {
    format!("{:.1}", secs)
}

/// Round seconds to the one-decimal precision used for recorded times
#[inline]
pub fn round_tenths(secs: f32) -> f32 {
    (secs * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_tenths() {
        assert_eq!(round_tenths(12.34), 12.3);
        assert_eq!(round_tenths(12.36), 12.4);
        assert_eq!(format_seconds(3.0), "3.0");
    }

    #[test]
    fn test_box_center() {
        let c = box_center(Vec2::new(10.0, 20.0), Vec2::new(30.0, 30.0));
        assert_eq!(c, Vec2::new(25.0, 35.0));
    }
}
