//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key codes to logical actions)
//! - Time (frame deltas, reset on tab resume)
//! - Storage (LocalStorage on web)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod storage;
pub mod time;

pub use input::{Action, KeyState};
pub use time::FrameClock;
