//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Seeded RNG only (cosmetic draws use a separate stream)
//! - Spawn cadence driven by the tick, never by host timers
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Landing, absorbed, asteroid_hit, lands_on, resolve_landing, touches_pickup};
pub use physics::{Steering, black_hole_pull, step_player};
pub use spawn::{SpawnClock, SpawnDue, platform_height};
pub use state::{
    Asteroid, BlackHole, GameEvent, GameOverCause, GamePhase, GameState, Platform, Player,
    ShieldPickup, Star,
};
pub use tick::{TickInput, tick};
