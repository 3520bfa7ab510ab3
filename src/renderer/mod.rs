//! Rendering module
//!
//! The scene is built as a backend-agnostic draw list; the Canvas2D backend
//! only exists on the web.

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
pub mod lens;
pub mod scene;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::{Canvas2d, SpriteImages};
pub use lens::lensed_position;
pub use scene::{Hud, START_PROMPT, SpriteAvailability, build};
pub use shapes::{Canvas, Color, DrawCommand, Paint, Shape, Sprite, Stroke, Style, TextAlign};
