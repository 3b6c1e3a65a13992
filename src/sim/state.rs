//! Game state and core simulation types
//!
//! The session aggregate (`GameState`) owns every piece of mutable game
//! state; there is no module-level state anywhere in the crate.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::levels::LevelTable;
use crate::{aim_angle, angle_to_dir};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Level select screen
    MainMenu,
    /// Active gameplay
    Playing,
    /// All bubbles popped
    LevelComplete,
    /// Out of arrows with bubbles remaining
    GameOver,
}

/// A drifting bubble target
#[derive(Debug, Clone)]
pub struct Bubble {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Cosmetic hue in degrees, assigned at creation, never changes
    pub hue: f32,
}

impl Bubble {
    /// Reflect off the field bounds, then advance one tick.
    ///
    /// Each axis is handled independently: when the bubble's edge would
    /// cross a bound, that axis's velocity flips sign. The bubble may
    /// overlap a bound by less than one tick's travel; it never escapes.
    pub fn update(&mut self) {
        if self.pos.x + self.radius > FIELD_WIDTH || self.pos.x - self.radius < 0.0 {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y + self.radius > FIELD_HEIGHT || self.pos.y - self.radius < 0.0 {
            self.vel.y = -self.vel.y;
        }

        self.pos += self.vel;
    }
}

/// A fired arrow, flying in a straight line until off-screen or it pops a bubble
#[derive(Debug, Clone)]
pub struct Arrow {
    pub pos: Vec2,
    /// Travel angle in radians, fixed at creation
    pub angle: f32,
}

impl Arrow {
    /// Advance one tick at constant speed along the firing angle
    pub fn update(&mut self) {
        self.pos += angle_to_dir(self.angle) * ARROW_SPEED;
    }

    /// True once the arrow has left the field in any direction
    pub fn is_off_screen(&self) -> bool {
        self.pos.x < 0.0
            || self.pos.x > FIELD_WIDTH
            || self.pos.y < 0.0
            || self.pos.y > FIELD_HEIGHT
    }
}

/// The player's bow: a stationary emitter near the bottom edge
#[derive(Debug, Clone)]
pub struct Bow {
    pub pos: Vec2,
    /// Aim angle in radians, tracks the pointer while a level is active
    pub angle: f32,
}

impl Default for Bow {
    fn default() -> Self {
        Self {
            pos: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - BOW_BOTTOM_OFFSET),
            angle: 0.0,
        }
    }
}

impl Bow {
    /// Point the bow at a pointer position (field coordinates)
    pub fn aim_at(&mut self, target: Vec2) {
        self.angle = aim_angle(self.pos, target);
    }
}

/// Complete session state for one level attempt
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Current level number (1..=3)
    pub level: u32,
    /// Score, +10 per popped bubble
    pub score: u32,
    /// Arrows left in the budget; decrements on fire, never negative
    pub arrows_left: u32,
    /// Player bow
    pub bow: Bow,
    /// Live bubbles
    pub bubbles: Vec<Bubble>,
    /// Arrows in flight
    pub arrows: Vec<Arrow>,
    /// Per-level tuning and unlock flags
    pub levels: LevelTable,
    rng: Pcg32,
}

impl GameState {
    /// Create a fresh session at the main menu
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::MainMenu,
            level: 1,
            score: 0,
            arrows_left: 0,
            bow: Bow::default(),
            bubbles: Vec::new(),
            arrows: Vec::new(),
            levels: LevelTable::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Whether simulation updates and gameplay input are live
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Start a level: reset score and arrow budget, spawn the bubble batch.
    /// No-op when the level is locked or out of range.
    pub fn start_level(&mut self, level: u32) {
        if !self.levels.is_unlocked(level) {
            return;
        }
        let config = match self.levels.get(level) {
            Some(c) => *c,
            None => return,
        };

        self.level = level;
        self.score = 0;
        self.arrows_left = config.arrows;
        self.arrows.clear();
        self.bubbles.clear();
        self.spawn_bubbles(config.bubbles, config.speed);
        self.phase = GamePhase::Playing;

        log::info!(
            "Level {} started: {} bubbles, {} arrows",
            level,
            config.bubbles,
            config.arrows
        );
    }

    /// Restart the current level with a fresh session
    pub fn restart_level(&mut self) {
        self.start_level(self.level);
    }

    /// Advance after a completed level: unlock and start the next level,
    /// or return to the menu after the final level.
    pub fn advance_level(&mut self) {
        if self.level < MAX_LEVEL {
            self.levels.unlock(self.level + 1);
            self.start_level(self.level + 1);
        } else {
            self.return_to_menu();
        }
    }

    /// Back to the level select screen. Scores and unlocks keep whatever
    /// state they already reached.
    pub fn return_to_menu(&mut self) {
        self.phase = GamePhase::MainMenu;
    }

    /// Fire one arrow from the bow at its current angle.
    ///
    /// Guarded no-op while inactive or with an empty arrow budget; the
    /// budget never goes negative. Returns whether an arrow was spawned.
    pub fn fire(&mut self) -> bool {
        if !self.is_active() || self.arrows_left == 0 {
            return false;
        }
        self.arrows.push(Arrow {
            pos: self.bow.pos,
            angle: self.bow.angle,
        });
        self.arrows_left -= 1;
        true
    }

    /// Spawn a batch of bubbles at randomized positions in the upper half
    /// of the field, with per-axis velocity `(rand - 0.5) * speed`.
    fn spawn_bubbles(&mut self, count: usize, speed: f32) {
        for _ in 0..count {
            let pos = Vec2::new(
                self.rng.random_range(SPAWN_MARGIN..FIELD_WIDTH - SPAWN_MARGIN),
                self.rng
                    .random_range(SPAWN_MARGIN..FIELD_HEIGHT / 2.0 - SPAWN_MARGIN),
            );
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * speed,
                (self.rng.random::<f32>() - 0.5) * speed,
            );
            self.bubbles.push(Bubble {
                pos,
                vel,
                radius: BUBBLE_RADIUS,
                hue: self.rng.random_range(0.0..360.0),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bubble_reflects_at_right_bound() {
        let mut bubble = Bubble {
            pos: Vec2::new(FIELD_WIDTH - BUBBLE_RADIUS + 1.0, 300.0),
            vel: Vec2::new(3.0, 0.0),
            radius: BUBBLE_RADIUS,
            hue: 0.0,
        };
        bubble.update();
        assert!(bubble.vel.x < 0.0);
        assert!(bubble.pos.x < FIELD_WIDTH - BUBBLE_RADIUS + 1.0);
    }

    #[test]
    fn test_bubble_reflects_at_top_bound() {
        let mut bubble = Bubble {
            pos: Vec2::new(400.0, BUBBLE_RADIUS - 1.0),
            vel: Vec2::new(0.0, -2.5),
            radius: BUBBLE_RADIUS,
            hue: 0.0,
        };
        bubble.update();
        assert!(bubble.vel.y > 0.0);
    }

    #[test]
    fn test_arrow_travels_straight() {
        let mut arrow = Arrow {
            pos: Vec2::new(400.0, 550.0),
            angle: -std::f32::consts::FRAC_PI_2, // straight up in y-down coords
        };
        arrow.update();
        assert!((arrow.pos.x - 400.0).abs() < 0.001);
        assert!((arrow.pos.y - (550.0 - ARROW_SPEED)).abs() < 0.001);
    }

    #[test]
    fn test_arrow_off_screen() {
        let inside = Arrow {
            pos: Vec2::new(400.0, 300.0),
            angle: 0.0,
        };
        assert!(!inside.is_off_screen());

        let outside = Arrow {
            pos: Vec2::new(805.0, 300.0),
            angle: 0.0,
        };
        assert!(outside.is_off_screen());
    }

    #[test]
    fn test_fire_guards() {
        let mut state = GameState::new(7);

        // Inactive: no arrow, no decrement
        assert!(!state.fire());
        assert!(state.arrows.is_empty());

        state.start_level(1);
        assert_eq!(state.arrows_left, 10);

        // Drain the budget
        for _ in 0..10 {
            assert!(state.fire());
        }
        assert_eq!(state.arrows_left, 0);
        assert_eq!(state.arrows.len(), 10);

        // Empty budget: guarded no-op, never negative
        assert!(!state.fire());
        assert_eq!(state.arrows_left, 0);
        assert_eq!(state.arrows.len(), 10);
    }

    #[test]
    fn test_start_level_locked_is_noop() {
        let mut state = GameState::new(7);
        state.start_level(2);
        assert_eq!(state.phase, GamePhase::MainMenu);
        assert!(state.bubbles.is_empty());
    }

    #[test]
    fn test_start_level_spawns_in_upper_half() {
        let mut state = GameState::new(42);
        state.start_level(1);
        assert_eq!(state.bubbles.len(), 5);
        for bubble in &state.bubbles {
            assert!(bubble.pos.x >= SPAWN_MARGIN);
            assert!(bubble.pos.x <= FIELD_WIDTH - SPAWN_MARGIN);
            assert!(bubble.pos.y >= SPAWN_MARGIN);
            assert!(bubble.pos.y <= FIELD_HEIGHT / 2.0 - SPAWN_MARGIN);
        }
    }

    proptest! {
        /// After any number of updates, a bubble that starts inside the
        /// field stays within one tick's displacement of the play band.
        #[test]
        fn prop_bubble_never_escapes(
            x in BUBBLE_RADIUS..(FIELD_WIDTH - BUBBLE_RADIUS),
            y in BUBBLE_RADIUS..(FIELD_HEIGHT - BUBBLE_RADIUS),
            dx in -5.0f32..5.0,
            dy in -5.0f32..5.0,
            steps in 1usize..500,
        ) {
            let mut bubble = Bubble {
                pos: Vec2::new(x, y),
                vel: Vec2::new(dx, dy),
                radius: BUBBLE_RADIUS,
                hue: 0.0,
            };
            for _ in 0..steps {
                bubble.update();
                prop_assert!(bubble.pos.x >= BUBBLE_RADIUS - dx.abs());
                prop_assert!(bubble.pos.x <= FIELD_WIDTH - BUBBLE_RADIUS + dx.abs());
                prop_assert!(bubble.pos.y >= BUBBLE_RADIUS - dy.abs());
                prop_assert!(bubble.pos.y <= FIELD_HEIGHT - BUBBLE_RADIUS + dy.abs());
            }
        }
    }
}
