//! Blackhole Jumper entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

    use blackhole_jumper::platform::storage::LocalStore;
    use blackhole_jumper::renderer::{Canvas, Canvas2d, Sprite, SpriteImages};
    use blackhole_jumper::{Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStore>,
        ctx: CanvasRenderingContext2d,
        images: Option<SpriteImages>,
    }

    impl Game {
        fn render(&self) {
            let sprites = match &self.images {
                Some(images) => images.availability(),
                None => Default::default(),
            };
            let commands = self.session.scene(sprites);
            Canvas2d::new(&self.ctx, self.images.as_ref()).draw_all(&commands);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Blackhole Jumper starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id("gameCanvas")
            .ok_or("no #gameCanvas element")?
            .dyn_into::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let mut store = LocalStore::new();
        let query = window.location().search().unwrap_or_default();
        let settings = Settings::load_with_query(&mut store, &query);
        let config = settings
            .game_config()
            .with_canvas(canvas.width() as f32, canvas.height() as f32);
        let use_sprites = config.use_sprites;

        let seed = js_sys::Date::now() as u64;
        log::info!("Seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session: Session::new(config, store, seed),
            ctx,
            images: None,
        }));

        if use_sprites {
            let images = load_sprites(game.clone());
            game.borrow_mut().images = images;
        }

        setup_input_handlers(game.clone(), &window);
        setup_visibility(game.clone(), document);
        request_animation_frame(game);
        Ok(())
    }

    /// Start loading every sprite; each settles the session's asset gate
    fn load_sprites(game: Rc<RefCell<Game>>) -> Option<SpriteImages> {
        let load = |sprite: Sprite| -> Option<HtmlImageElement> {
            let img = HtmlImageElement::new().ok()?;
            {
                let game = game.clone();
                let onload = Closure::<dyn FnMut()>::new(move || {
                    game.borrow_mut().session.asset_settled(sprite, true);
                });
                img.set_onload(Some(onload.as_ref().unchecked_ref()));
                onload.forget();
            }
            {
                let game = game.clone();
                let onerror = Closure::<dyn FnMut()>::new(move || {
                    game.borrow_mut().session.asset_settled(sprite, false);
                });
                img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
                onerror.forget();
            }
            img.set_src(sprite.path());
            Some(img)
        };

        match (load(Sprite::Player), load(Sprite::Asteroid), load(Sprite::Platform)) {
            (Some(player), Some(asteroid), Some(platform)) => {
                Some(SpriteImages::new(player, asteroid, platform))
            }
            _ => {
                log::warn!("Image elements unavailable, drawing shapes");
                let mut g = game.borrow_mut();
                for sprite in Sprite::ALL {
                    g.session.asset_settled(sprite, false);
                }
                None
            }
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>, window: &web_sys::Window) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let suppress = game
                    .borrow_mut()
                    .session
                    .key_down(&event.code(), &event.key());
                if suppress {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut()
                    .session
                    .key_up(&event.code(), &event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_visibility(game: Rc<RefCell<Game>>, document: Document) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                g.session.hide();
            } else {
                g.session.show();
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let summary = game.borrow_mut().session.frame(time);

        // alert() blocks; no borrow may be held across it
        if let Some(summary) = summary {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&summary.to_string());
            }
        }

        game.borrow().render();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut settings = blackhole_jumper::Settings::default();
    if let Some(arg) = std::env::args().nth(1) {
        settings.apply_query(&format!("variant={arg}"));
    }
    log::info!("Blackhole Jumper (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let summary = autopilot::run(settings.game_config(), 0x00C0_FFEE);
    match summary {
        Some(summary) => println!("{summary}"),
        None => println!("Autopilot survived the whole run"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless play: steer toward the nearest platform above the hole and jump
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use blackhole_jumper::persistence::MemoryStore;
    use blackhole_jumper::renderer::{Sprite, SpriteAvailability};
    use blackhole_jumper::{GameConfig, GameOverSummary, Session};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_SECONDS: f64 = 120.0;

    pub fn run(config: GameConfig, seed: u64) -> Option<GameOverSummary> {
        let mut session = Session::new(config, MemoryStore::new(), seed);
        for sprite in Sprite::ALL {
            session.asset_settled(sprite, false);
        }

        let mut now = 0.0;
        session.key_down("ArrowRight", "ArrowRight");
        session.key_up("ArrowRight", "ArrowRight");

        while now < MAX_SECONDS * 1000.0 {
            steer(&mut session);
            if let Some(summary) = session.frame(now) {
                return Some(summary);
            }
            // Exercise the scene builder the way the host would
            let _ = session.scene(SpriteAvailability::default());
            now += FRAME_MS;
        }
        None
    }

    fn steer(session: &mut Session<MemoryStore>) {
        let player = &session.state().player;
        let center = player.center();
        let grounded = player.grounded;
        let target = session
            .state()
            .platforms
            .iter()
            .filter(|p| p.pos.y < center.y - 20.0)
            .min_by(|a, b| {
                let da = (a.pos.y - center.y).abs();
                let db = (b.pos.y - center.y).abs();
                da.total_cmp(&db)
            })
            .map(|p| p.pos.x + p.size.x / 2.0);

        let (left, right) = match target {
            Some(x) if x < center.x - 5.0 => (true, false),
            Some(x) if x > center.x + 5.0 => (false, true),
            _ => (false, false),
        };
        press(session, "ArrowLeft", left);
        press(session, "ArrowRight", right);
        if grounded {
            session.key_down("Space", " ");
        }
    }

    fn press(session: &mut Session<MemoryStore>, code: &str, held: bool) {
        if held {
            session.key_down(code, code);
        } else {
            session.key_up(code, code);
        }
    }
}
