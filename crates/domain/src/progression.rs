//! Level progression thresholds.
//!
//! Experience requirements are a fixed ten-level matrix. Characters past
//! the last configured level no longer advance.

/// Experience required to finish the given level, or `None` past the cap.
pub fn required_experience(level: i64) -> Option<i64> {
    match level {
        1 => Some(100),
        2 => Some(200),
        3 => Some(450),
        4 => Some(900),
        5 => Some(1_800),
        6 => Some(3_500),
        7 => Some(6_500),
        8 => Some(10_500),
        9 => Some(15_000),
        10 => Some(20_000),
        _ => None,
    }
}

/// Whether a character at `level` with `experience` has earned the next
/// level. Always false past the last configured level.
pub fn reached_new_level(level: i64, experience: i64) -> bool {
    match required_experience(level) {
        Some(required) => experience >= required,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_level_requires_one_hundred() {
        assert!(!reached_new_level(1, 99));
        assert!(reached_new_level(1, 100));
        assert!(reached_new_level(1, 150));
    }

    #[test]
    fn second_level_requires_two_hundred() {
        assert!(!reached_new_level(2, 199));
        assert!(reached_new_level(2, 200));
    }

    #[test]
    fn last_level_requires_twenty_thousand() {
        assert!(!reached_new_level(10, 19_999));
        assert!(reached_new_level(10, 20_000));
    }

    #[test]
    fn no_progression_past_the_cap() {
        assert!(!reached_new_level(11, 1_000_000));
        assert!(!reached_new_level(42, i64::MAX));
    }

    #[test]
    fn thresholds_grow_monotonically() {
        let mut previous = 0;
        for level in 1..=10 {
            let required = required_experience(level).unwrap_or(0);
            assert!(required > previous, "level {level} must cost more");
            previous = required;
        }
    }
}
