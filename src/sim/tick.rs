//! Per-frame simulation tick
//!
//! Order of operations, once per animation frame:
//! spawns → timer decay → landing/jump → player physics →
//! (running) platforms, asteroids, pickup → pickup/asteroid/black-hole checks →
//! cosmetic updates.

use super::collision;
use super::physics::{self, Steering};
use super::state::{GameEvent, GameOverCause, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left arrow held
    pub left: bool,
    /// Right arrow held
    pub right: bool,
    /// Jump key pressed since the last tick
    pub jump: bool,
    /// Horizontal key pressed since the last tick (starts an idle session)
    pub start: bool,
}

/// Advance the session by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    if input.start && state.phase == GamePhase::Idle {
        state.start();
    }

    let running = state.is_running();

    if input.jump && running {
        let allow_coyote = state.config.coyote_immediate_jump;
        if state.player.press_jump(allow_coyote) {
            state.events.push(GameEvent::Jumped { buffered: false });
        }
    }

    let scale = state.config.frame_scale(dt);

    if running {
        state.elapsed += dt;
        state.time_ticks += 1;
        state.run_spawners(dt * 1000.0);
        state.player.decay_timers(scale);
    }

    // Landing runs even while idle so the player keeps standing on the start platform
    let landing = collision::resolve_landing(&mut state.player, &mut state.platforms);
    if let Some(platform_id) = landing.platform_id {
        state.events.push(GameEvent::Landed { platform_id });
    }
    if landing.buffered_jump {
        state.events.push(GameEvent::Jumped { buffered: true });
    }

    let steering = Steering {
        left: input.left,
        right: input.right,
    };
    physics::step_player(
        &mut state.player,
        &state.black_hole,
        &state.config,
        steering,
        state.elapsed,
        running,
        scale,
    );

    if running {
        let width = state.config.canvas_width;
        let height = state.config.canvas_height;
        let fall_speed = state.config.platform_fall_speed.at(state.elapsed);

        physics::move_platforms(&mut state.platforms, fall_speed, scale, height);
        physics::move_asteroids(&mut state.asteroids, scale, width, height);
        physics::move_shield(&mut state.shield_pickup, fall_speed, scale, height);

        if let Some(pickup) = state.shield_pickup {
            if collision::touches_pickup(&state.player, &pickup) {
                state.player.shield = true;
                state.shield_pickup = None;
                state.events.push(GameEvent::ShieldCollected);
                log::info!("Shield collected");
            }
        }

        if let Some(index) = collision::asteroid_hit(&state.player, &state.asteroids) {
            if state.player.shield {
                let asteroid = state.asteroids.remove(index);
                state.player.shield = false;
                state.player.hit_flash = state.config.shield.map_or(0, |s| s.hit_flash_frames);
                state.events.push(GameEvent::ShieldAbsorbed {
                    asteroid_id: asteroid.id,
                });
                log::info!("Shield absorbed asteroid {}", asteroid.id);
            } else {
                state.finish(GameOverCause::Asteroid);
                return;
            }
        }

        if collision::absorbed(&state.player, &state.black_hole) {
            state.finish(GameOverCause::BlackHole);
            return;
        }

        state.drift_stars();
    }

    state.player.hit_flash = state.player.hit_flash.saturating_sub(1);
}
