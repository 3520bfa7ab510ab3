//! Gravitational lensing (cosmetic)

use glam::Vec2;

use crate::config::LensConfig;
use crate::sim::BlackHole;

/// Where `pos` appears once bent by the black hole
///
/// Points beyond `radius * radius_factor` are untouched; closer points move
/// toward the center by up to `strength` pixels, scaled by
/// `1 - dist / (radius * radius_factor)`.
pub fn lensed_position(pos: Vec2, hole: &BlackHole, lens: &LensConfig) -> Vec2 {
    let reach = hole.radius * lens.radius_factor;
    let offset = pos - hole.pos;
    let dist = offset.length();
    if dist > reach || dist <= f32::EPSILON {
        return pos;
    }
    let distortion = 1.0 - dist / reach;
    hole.pos + offset * (1.0 - lens.strength * distortion / dist)
}

/// Apply the lens if one is configured
#[inline]
pub fn apply(pos: Vec2, hole: &BlackHole, lens: Option<&LensConfig>) -> Vec2 {
    match lens {
        Some(lens) => lensed_position(pos, hole, lens),
        None => pos,
    }
}
