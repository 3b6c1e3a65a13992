//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame callback
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{arrow_hits_bubble, circle_hit, resolve_hits};
pub use state::{Arrow, Bow, Bubble, GamePhase, GameState};
pub use tick::{TickInput, tick};
