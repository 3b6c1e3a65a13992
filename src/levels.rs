//! Static per-level tuning values and unlock flags
//!
//! Level 1 starts unlocked; each level unlocks when the previous one is
//! completed. Unlock state lives in-process only and is lost on reload.

use crate::consts::MAX_LEVEL;

/// Tuning for a single level
#[derive(Debug, Clone, Copy)]
pub struct LevelConfig {
    /// Bubbles spawned at level start
    pub bubbles: usize,
    /// Arrow allowance for the level
    pub arrows: u32,
    /// Bubble speed scale (per-axis velocity is `(rand - 0.5) * speed`)
    pub speed: f32,
    /// Whether the level can be started
    pub unlocked: bool,
}

/// The level table, indexed by level number 1..=3
#[derive(Debug, Clone)]
pub struct LevelTable {
    configs: [LevelConfig; MAX_LEVEL as usize],
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            configs: [
                LevelConfig {
                    bubbles: 5,
                    arrows: 10,
                    speed: 3.0,
                    unlocked: true,
                },
                LevelConfig {
                    bubbles: 8,
                    arrows: 12,
                    speed: 4.0,
                    unlocked: false,
                },
                LevelConfig {
                    bubbles: 12,
                    arrows: 15,
                    speed: 5.0,
                    unlocked: false,
                },
            ],
        }
    }
}

impl LevelTable {
    /// Config for a level number, or `None` if out of range
    pub fn get(&self, level: u32) -> Option<&LevelConfig> {
        if (1..=MAX_LEVEL).contains(&level) {
            self.configs.get(level as usize - 1)
        } else {
            None
        }
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        self.get(level).map(|c| c.unlocked).unwrap_or(false)
    }

    /// Unlock a level (called by the level-completion transition)
    pub fn unlock(&mut self, level: u32) {
        if (1..=MAX_LEVEL).contains(&level) {
            self.configs[level as usize - 1].unlocked = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let table = LevelTable::default();
        assert!(table.is_unlocked(1));
        assert!(!table.is_unlocked(2));
        assert!(!table.is_unlocked(3));

        let l1 = table.get(1).unwrap();
        assert_eq!(l1.bubbles, 5);
        assert_eq!(l1.arrows, 10);

        let l3 = table.get(3).unwrap();
        assert_eq!(l3.bubbles, 12);
        assert_eq!(l3.arrows, 15);
    }

    #[test]
    fn test_out_of_range() {
        let mut table = LevelTable::default();
        assert!(table.get(0).is_none());
        assert!(table.get(4).is_none());
        assert!(!table.is_unlocked(0));

        // Out-of-range unlock is a no-op
        table.unlock(4);
        assert!(!table.is_unlocked(4));
    }

    #[test]
    fn test_unlock() {
        let mut table = LevelTable::default();
        table.unlock(2);
        assert!(table.is_unlocked(2));
        assert!(!table.is_unlocked(3));
    }
}
