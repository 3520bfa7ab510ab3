//! Session controller
//!
//! Owns one [`GameState`] plus everything around it that is not simulation:
//! the frame clock, held keys, asset loading, tab visibility, the best time
//! and the end-of-session notice. The host only forwards events and draws.

use std::fmt;

use crate::config::GameConfig;
use crate::consts::GAME_OVER_NOTICE_MS;
use crate::highscores::BestTime;
use crate::persistence::KeyValueStore;
use crate::platform::input::{self, Action};
use crate::platform::{FrameClock, KeyState};
use crate::renderer::scene::{self, Hud, START_PROMPT, SpriteAvailability};
use crate::renderer::{DrawCommand, Sprite};
use crate::round_tenths;
use crate::sim::{GameEvent, GameOverCause, GamePhase, GameState, tick};

/// What the player is told when a run ends
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverSummary {
    pub cause: GameOverCause,
    /// Survival time, rounded to tenths
    pub elapsed: f32,
    /// Best time after this run (only when best times are tracked)
    pub best: Option<f32>,
    pub new_record: bool,
}

impl fmt::Display for GameOverSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.cause.message();
        match self.best {
            Some(best) => {
                write!(
                    f,
                    "{message}\n\nFinal survival time: {:.1}s\nBest time: {:.1}s",
                    self.elapsed, best
                )?;
                if self.new_record {
                    write!(f, " (NEW RECORD!)")?;
                }
                Ok(())
            }
            None => write!(f, "{message} Time: {:.1}s", self.elapsed),
        }
    }
}

/// Sprites settled so far (loaded or failed)
#[derive(Debug, Clone, Default)]
struct AssetGate {
    expected: usize,
    settled: Vec<Sprite>,
    loaded: SpriteAvailability,
}

impl AssetGate {
    fn new(expected: usize) -> Self {
        Self {
            expected,
            ..Self::default()
        }
    }

    fn settle(&mut self, sprite: Sprite, loaded: bool) {
        if self.settled.contains(&sprite) {
            return;
        }
        self.settled.push(sprite);
        match sprite {
            Sprite::Player => self.loaded.player = loaded,
            Sprite::Asteroid => self.loaded.asteroid = loaded,
            Sprite::Platform => self.loaded.platform = loaded,
        }
    }

    fn ready(&self) -> bool {
        self.settled.len() >= self.expected
    }
}

/// Game over already decided, message not yet shown
#[derive(Debug, Clone)]
struct PendingNotice {
    summary: GameOverSummary,
    remaining_ms: f64,
}

/// One player's game, from first frame to reset and beyond
pub struct Session<S: KeyValueStore> {
    config: GameConfig,
    state: GameState,
    store: S,
    best: Option<BestTime>,
    keys: KeyState,
    clock: FrameClock,
    assets: AssetGate,
    visible: bool,
    notice: Option<PendingNotice>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(config: GameConfig, store: S, seed: u64) -> Self {
        let best = config.track_best_time.then(|| BestTime::load(&store));
        log::info!(
            "{} session ready ({}x{})",
            config.variant.as_str(),
            config.canvas_width,
            config.canvas_height
        );
        Self {
            assets: AssetGate::new(config.sprite_count()),
            state: GameState::new(config.clone(), seed),
            config,
            store,
            best,
            keys: KeyState::default(),
            clock: FrameClock::new(),
            visible: true,
            notice: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Best time, if this variant tracks one
    pub fn best_time(&self) -> Option<f32> {
        self.best.map(|b| b.get())
    }

    /// Record that a sprite finished loading (`loaded`) or failed
    ///
    /// Failed sprites still count toward readiness; they are drawn as flat
    /// shapes instead.
    pub fn asset_settled(&mut self, sprite: Sprite, loaded: bool) {
        if !loaded {
            log::warn!("Sprite {} failed to load, using fallback shape", sprite.path());
        }
        self.assets.settle(sprite, loaded);
        if self.assets.ready() {
            log::debug!("All sprites settled");
        }
    }

    pub fn assets_ready(&self) -> bool {
        self.assets.ready()
    }

    /// Sprites known to have loaded
    pub fn sprites(&self) -> SpriteAvailability {
        self.assets.loaded
    }

    /// Key pressed; returns true if the browser default must be suppressed
    pub fn key_down(&mut self, code: &str, key: &str) -> bool {
        if let Some(action) = Action::from_key(code, key) {
            self.keys.press(action);
        }
        input::suppresses_default(code) || key == " "
    }

    pub fn key_up(&mut self, code: &str, key: &str) {
        if let Some(action) = Action::from_key(code, key) {
            self.keys.release(action);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Tab hidden: cancel every spawn timer
    pub fn hide(&mut self) {
        if !self.visible {
            return;
        }
        self.visible = false;
        self.state.suspend_spawners();
        log::info!("Hidden, spawners suspended");
    }

    /// Tab shown again: rebase the clock and restart spawners
    ///
    /// Elapsed time is accumulated from simulated frames, so the hidden
    /// interval is never counted.
    pub fn show(&mut self) {
        if self.visible {
            return;
        }
        self.visible = true;
        self.clock.reset();
        self.state.resume_spawners();
        log::info!("Visible, spawners resumed at {:.1}s", self.state.elapsed);
    }

    /// Advance one animation frame stamped `now_ms`
    ///
    /// Returns the summary once the end-of-session notice is due; the session
    /// has already been reset when it does.
    pub fn frame(&mut self, now_ms: f64) -> Option<GameOverSummary> {
        let dt = self.clock.delta(now_ms);

        if let Some(notice) = &mut self.notice {
            notice.remaining_ms -= dt as f64 * 1000.0;
            if notice.remaining_ms > 0.0 {
                return None;
            }
            let summary = self.notice.take().map(|n| n.summary);
            self.reset();
            return summary;
        }

        if !self.visible {
            return None;
        }

        // Nothing moves until every sprite has settled
        if !self.assets.ready() {
            self.keys.take_tick_input(false);
            return None;
        }

        let input = self.keys.take_tick_input(true);
        tick(&mut self.state, &input, dt);

        for event in std::mem::take(&mut self.state.events) {
            if let GameEvent::GameOver { cause } = event {
                self.finish(cause);
            }
        }
        None
    }

    /// Settle the run: record the best time and queue the notice
    fn finish(&mut self, cause: GameOverCause) {
        let elapsed = round_tenths(self.state.elapsed);
        let new_record = match &mut self.best {
            Some(best) => best.record(elapsed, &mut self.store),
            None => false,
        };
        let summary = GameOverSummary {
            cause,
            elapsed,
            best: self.best_time(),
            new_record,
        };
        log::info!("{}", summary.to_string().replace('\n', " "));
        self.notice = Some(PendingNotice {
            summary,
            remaining_ms: GAME_OVER_NOTICE_MS,
        });
    }

    /// Start over with a fresh world (the best time and loaded assets stay)
    pub fn reset(&mut self) {
        let seed = next_seed(self.state.seed);
        self.reset_with_seed(seed);
    }

    pub fn reset_with_seed(&mut self, seed: u64) {
        self.state = GameState::new(self.config.clone(), seed);
        self.keys.clear();
        self.clock.reset();
        self.notice = None;
        log::info!("Session reset (seed {seed})");
    }

    /// Everything to draw this frame
    pub fn scene(&self, sprites: SpriteAvailability) -> Vec<DrawCommand> {
        let prompt = match self.state.phase {
            GamePhase::Idle if self.assets.ready() => Some(START_PROMPT.to_owned()),
            GamePhase::Idle => Some(self.config.loading_prompt().to_owned()),
            _ => None,
        };
        let hud = Hud {
            best: self.best_time(),
            prompt,
        };
        scene::build(&self.state, &hud, sprites)
    }
}

/// Seed for the next run (64-bit LCG step)
fn next_seed(seed: u64) -> u64 {
    seed.wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(1_442_695_040_888_963_407)
}
