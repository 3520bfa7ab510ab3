//! Scene construction
//!
//! Turns a [`GameState`] into an ordered draw list. Nothing here mutates the
//! simulation; timers that drive visuals are advanced by the tick.

use glam::Vec2;

use super::lens;
use super::shapes::{DrawCommand, Paint, Sprite, Stroke, TextAlign, colors};
use crate::config::Palette;
use crate::consts::PLATFORM_HIT_FRAMES;
use crate::format_seconds;
use crate::sim::{BlackHole, GamePhase, GameState};

/// Which sprite images finished loading successfully
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpriteAvailability {
    pub player: bool,
    pub asteroid: bool,
    pub platform: bool,
}

impl SpriteAvailability {
    pub fn all() -> Self {
        Self {
            player: true,
            asteroid: true,
            platform: true,
        }
    }
}

/// Session-level text overlaid on the scene
#[derive(Debug, Clone, Default)]
pub struct Hud {
    /// Best time, when tracked
    pub best: Option<f32>,
    /// Centered prompt (start or loading), if any
    pub prompt: Option<String>,
}

pub const START_PROMPT: &str = "Press ← or → to Start";

const HUD_FONT_PX: f32 = 18.0;
const PROMPT_FONT_PX: f32 = 24.0;
const HOLE_INNER_RADIUS: f32 = 20.0;
const SHIELD_RING_SCALE: f32 = 0.7;
const FLASH_PERIOD: u32 = 6;

/// Build the frame's draw list, back to front
pub fn build(state: &GameState, hud: &Hud, sprites: SpriteAvailability) -> Vec<DrawCommand> {
    let cfg = &state.config;
    let hole = &state.black_hole;
    let lens = cfg.lens.as_ref();
    let sprites = if cfg.use_sprites {
        sprites
    } else {
        SpriteAvailability::default()
    };
    let mut out = Vec::with_capacity(
        8 + state.stars.len() + state.platforms.len() * 2 + state.asteroids.len(),
    );

    out.push(DrawCommand::fill_rect(
        Vec2::ZERO,
        Vec2::new(cfg.canvas_width, cfg.canvas_height),
        colors::BACKGROUND,
    ));

    for star in &state.stars {
        out.push(DrawCommand::fill_circle(
            lens::apply(star.pos, hole, lens),
            star.radius,
            Paint::Solid(colors::STAR),
        ));
    }

    for platform in &state.platforms {
        let top_left = lens::apply(platform.pos, hole, lens);
        let size = lens::apply(platform.pos + platform.size, hole, lens) - top_left;
        if sprites.platform {
            out.push(DrawCommand::image(Sprite::Platform, top_left, size));
            if platform.hit_flash > 0 {
                let alpha = platform.hit_flash as f32 / PLATFORM_HIT_FRAMES as f32 * 0.5;
                out.push(DrawCommand::fill_rect(top_left, size, colors::white(alpha)));
            }
        } else {
            let color = if platform.hit_flash > 0 {
                colors::PLATFORM_FLASH
            } else {
                colors::PLATFORM
            };
            out.push(DrawCommand::fill_rect(top_left, size, color));
        }
    }

    if let Some(pickup) = &state.shield_pickup {
        let center = pickup.center();
        out.push(DrawCommand::fill_circle(
            center,
            pickup.radius,
            Paint::Solid(colors::SHIELD_PICKUP),
        ));
        out.push(
            DrawCommand::text("S", center + Vec2::new(0.0, 7.0), 18.0, TextAlign::Center, colors::TEXT)
                .bold(),
        );
    }

    for asteroid in &state.asteroids {
        if sprites.asteroid {
            out.push(DrawCommand::image(
                Sprite::Asteroid,
                asteroid.pos - Vec2::splat(asteroid.radius),
                Vec2::splat(asteroid.radius * 2.0),
            ));
        } else {
            out.push(DrawCommand::fill_circle(
                asteroid.pos,
                asteroid.radius,
                Paint::Solid(colors::ASTEROID),
            ));
        }
    }

    let player = &state.player;
    if sprites.player {
        out.push(DrawCommand::image(Sprite::Player, player.pos, player.size));
    } else {
        out.push(DrawCommand::fill_rect(player.pos, player.size, colors::PLAYER));
    }
    if player.shield {
        out.push(DrawCommand::stroke_circle(
            player.center(),
            player.size.x * SHIELD_RING_SCALE,
            colors::SHIELD_RING,
            4.0,
        ));
    }
    if cfg.flash_effects && player.hit_flash > 0 && player.hit_flash % FLASH_PERIOD < FLASH_PERIOD / 2 {
        out.push(DrawCommand::fill_rect(player.pos, player.size, colors::DAMAGE_FLASH));
    }

    out.push(black_hole(hole, cfg.palette));
    out.push(DrawCommand::stroke_circle(hole.pos, hole.radius, colors::HORIZON_RING, 2.0));

    push_hud(&mut out, state, hud);
    out
}

/// Radial gradient fill for the event horizon
fn black_hole(hole: &BlackHole, palette: Palette) -> DrawCommand {
    let stops = match palette {
        Palette::Violet => vec![
            (0.0, colors::HOLE_CORE),
            (0.6, [80.0 / 255.0, 0.0, 120.0 / 255.0, 0.6]),
            (1.0, colors::TRANSPARENT),
        ],
        Palette::Ember => vec![
            (0.0, colors::HOLE_CORE),
            (0.6, [1.0, 50.0 / 255.0, 0.0, 0.8]),
            (0.8, [1.0, 180.0 / 255.0, 0.0, 0.5]),
            (1.0, colors::TRANSPARENT),
        ],
    };
    DrawCommand::fill_circle(
        hole.pos,
        hole.radius,
        Paint::Radial {
            center: hole.pos,
            inner_radius: HOLE_INNER_RADIUS,
            outer_radius: hole.radius,
            stops,
        },
    )
}

fn push_hud(out: &mut Vec<DrawCommand>, state: &GameState, hud: &Hud) {
    let width = state.config.canvas_width;
    out.push(DrawCommand::text(
        format!("Time: {}s", format_seconds(state.elapsed)),
        Vec2::new(10.0, 26.0),
        HUD_FONT_PX,
        TextAlign::Left,
        colors::TEXT,
    ));

    if let Some(best) = hud.best {
        out.push(DrawCommand::text(
            format!("Best: {}s", format_seconds(best)),
            Vec2::new(width - 10.0, 26.0),
            HUD_FONT_PX,
            TextAlign::Right,
            colors::BEST_TIME,
        ));
    }

    if state.phase == GamePhase::Idle {
        if let Some(prompt) = &hud.prompt {
            out.push(DrawCommand::outlined_text(
                prompt.clone(),
                Vec2::new(width / 2.0, state.config.canvas_height / 2.0),
                PROMPT_FONT_PX,
                colors::TEXT,
                Stroke {
                    color: colors::TEXT_OUTLINE,
                    width: 3.0,
                },
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::renderer::{Shape, lensed_position};

    fn texts(cmds: &[DrawCommand]) -> Vec<String> {
        cmds.iter()
            .filter_map(|c| match &c.shape {
                Shape::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_background_first_hud_last() {
        let state = GameState::new(GameConfig::classic(), 5);
        let hud = Hud {
            best: None,
            prompt: Some(START_PROMPT.to_owned()),
        };
        let cmds = build(&state, &hud, SpriteAvailability::default());
        assert_eq!(
            cmds[0],
            DrawCommand::fill_rect(Vec2::ZERO, Vec2::new(400.0, 600.0), colors::BACKGROUND)
        );
        assert_eq!(texts(&cmds), vec!["Time: 0.0s".to_owned(), START_PROMPT.to_owned()]);
    }

    #[test]
    fn test_best_time_shown_when_tracked() {
        let state = GameState::new(GameConfig::shielded(), 5);
        let hud = Hud {
            best: Some(12.34),
            prompt: None,
        };
        let cmds = build(&state, &hud, SpriteAvailability::all());
        assert!(texts(&cmds).contains(&"Best: 12.3s".to_owned()));
    }

    #[test]
    fn test_sprites_fall_back_to_shapes() {
        let state = GameState::new(GameConfig::shielded(), 5);
        let hud = Hud::default();

        let with = build(&state, &hud, SpriteAvailability::all());
        assert!(with.iter().any(|c| matches!(c.shape, Shape::Image { sprite: Sprite::Player, .. })));

        let without = build(&state, &hud, SpriteAvailability::default());
        assert!(!without.iter().any(|c| matches!(c.shape, Shape::Image { .. })));
        assert!(without.contains(&DrawCommand::fill_rect(
            state.player.pos,
            state.player.size,
            colors::PLAYER
        )));
    }

    #[test]
    fn test_platform_flash_color() {
        let mut state = GameState::new(GameConfig::classic(), 5);
        state.platforms[0].hit_flash = 4;
        let cmds = build(&state, &Hud::default(), SpriteAvailability::default());
        let p = &state.platforms[0];
        assert!(cmds.contains(&DrawCommand::fill_rect(p.pos, p.size, colors::PLATFORM_FLASH)));
    }

    #[test]
    fn test_shield_ring_and_damage_flash() {
        let mut state = GameState::new(GameConfig::shielded(), 5);
        state.player.shield = true;
        state.player.hit_flash = 2;
        let cmds = build(&state, &Hud::default(), SpriteAvailability::all());
        assert!(cmds.iter().any(|c| c.style.stroke.map(|s| s.color) == Some(colors::SHIELD_RING)));
        assert!(cmds.contains(&DrawCommand::fill_rect(
            state.player.pos,
            state.player.size,
            colors::DAMAGE_FLASH
        )));

        // Off phase of the flicker
        state.player.hit_flash = 4;
        let cmds = build(&state, &Hud::default(), SpriteAvailability::all());
        assert!(!cmds.iter().any(|c| matches!(&c.style.fill, Some(Paint::Solid(col)) if *col == colors::DAMAGE_FLASH)));
    }

    #[test]
    fn test_shielded_lenses_platforms_and_stars() {
        let mut state = GameState::new(GameConfig::shielded(), 5);
        let hole = state.black_hole;
        let lens = state.config.lens.expect("shielded lenses");
        state.platforms[0].pos = hole.pos - Vec2::new(0.0, hole.radius * 1.2);
        state.stars[0].pos = hole.pos + Vec2::new(hole.radius * 1.2, 0.0);
        let platform = state.platforms[0].clone();
        let star = state.stars[0];

        let cmds = build(&state, &Hud::default(), SpriteAvailability::default());

        let top_left = lensed_position(platform.pos, &hole, &lens);
        let size = lensed_position(platform.pos + platform.size, &hole, &lens) - top_left;
        assert_ne!(top_left, platform.pos);
        assert!(cmds.contains(&DrawCommand::fill_rect(top_left, size, colors::PLATFORM)));
        assert!(!cmds.contains(&DrawCommand::fill_rect(platform.pos, platform.size, colors::PLATFORM)));

        let star_pos = lensed_position(star.pos, &hole, &lens);
        assert_ne!(star_pos, star.pos);
        assert!(cmds.contains(&DrawCommand::fill_circle(star_pos, star.radius, Paint::Solid(colors::STAR))));

        // Classic draws the same platform where it is
        let mut classic = GameState::new(GameConfig::classic(), 5);
        classic.platforms[0].pos = platform.pos;
        let p = &classic.platforms[0];
        let cmds = build(&classic, &Hud::default(), SpriteAvailability::default());
        assert!(cmds.contains(&DrawCommand::fill_rect(p.pos, p.size, colors::PLATFORM)));
    }

    #[test]
    fn test_prompt_hidden_once_running() {
        let mut state = GameState::new(GameConfig::classic(), 5);
        state.start();
        let hud = Hud {
            best: None,
            prompt: Some(START_PROMPT.to_owned()),
        };
        let cmds = build(&state, &hud, SpriteAvailability::default());
        assert!(!texts(&cmds).contains(&START_PROMPT.to_owned()));
    }
}
