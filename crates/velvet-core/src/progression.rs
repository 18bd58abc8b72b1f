//! Level progression shared by summon and fusion rewards.
//!
//! Levels live in 1-99 for both players and personas. Rewards raise
//! the player level, excess above the cap is silently discarded.

use std::ops::RangeInclusive;

/// Lowest valid level.
pub const LEVEL_MIN: u32 = 1;

/// Absolute level cap. No reward raises a player past it.
pub const LEVEL_CAP: u32 = 99;

/// Level reward for a successful summon.
pub const SUMMON_REWARD: u32 = 1;

/// Level reward for a successful fusion.
pub const FUSION_REWARD: u32 = 3;

/// New level after a reward: `min(99, current + delta)`.
pub fn raised(current: u32, delta: u32) -> u32 {
    current.saturating_add(delta).min(LEVEL_CAP)
}

/// The inclusive candidate window around a player level, clamped to
/// the valid range: `[max(1, level - 3), min(99, level + 3)]`.
pub fn level_window(level: u32) -> RangeInclusive<u32> {
    let min = level.saturating_sub(3).max(LEVEL_MIN);
    let max = (level + 3).min(LEVEL_CAP);
    min..=max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raised_adds_delta() {
        assert_eq!(raised(1, SUMMON_REWARD), 2);
        assert_eq!(raised(5, FUSION_REWARD), 8);
    }

    #[test]
    fn raised_caps_at_99() {
        assert_eq!(raised(99, 1), 99);
        assert_eq!(raised(98, 3), 99);
        assert_eq!(raised(97, 100), 99);
    }

    #[test]
    fn raised_saturates_on_huge_delta() {
        assert_eq!(raised(1, u32::MAX), 99);
        assert_eq!(raised(u32::MAX, u32::MAX), 99);
    }

    #[test]
    fn raised_never_decreases() {
        let mut level = 1;
        for delta in [1, 3, 0, 3, 1] {
            let next = raised(level, delta);
            assert!(next >= level);
            level = next;
        }
    }

    #[test]
    fn window_clamps_low_end() {
        assert_eq!(level_window(2), 1..=5);
        assert_eq!(level_window(1), 1..=4);
        assert_eq!(level_window(4), 1..=7);
    }

    #[test]
    fn window_clamps_high_end() {
        assert_eq!(level_window(99), 96..=99);
        assert_eq!(level_window(97), 94..=99);
    }

    #[test]
    fn window_mid_range() {
        assert_eq!(level_window(50), 47..=53);
    }
}
