//! Bubble Bow - a bow-and-arrow bubble popping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity motion, collisions, level state machine)
//! - `levels`: Static per-level tuning and unlock flags
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: User preferences persisted to LocalStorage

pub mod levels;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use levels::{LevelConfig, LevelTable};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical play-field size (canvas coordinates, y-down)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Bubble defaults
    pub const BUBBLE_RADIUS: f32 = 20.0;
    /// Extra hit radius on top of the visual bubble radius
    pub const HIT_MARGIN: f32 = 5.0;
    /// Margin from the field edges when spawning bubbles
    pub const SPAWN_MARGIN: f32 = 20.0;

    /// Arrow travel speed (units per tick)
    pub const ARROW_SPEED: f32 = 10.0;

    /// Bow sits at horizontal center, this far above the bottom edge
    pub const BOW_BOTTOM_OFFSET: f32 = 50.0;

    /// Points awarded per popped bubble
    pub const SCORE_PER_POP: u32 = 10;

    /// Highest level number
    pub const MAX_LEVEL: u32 = 3;
}

/// Aim angle from one point toward another (radians, y-down screen coords)
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Unit direction vector for an angle
#[inline]
pub fn angle_to_dir(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
