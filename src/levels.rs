//! Levels

use rust_decimal::Decimal;
use thiserror::Error;

/// Default point thresholds for the loyalty tiers.
pub const DEFAULT_THRESHOLDS: [u64; 6] = [0, 100, 300, 600, 1000, 2000];

/// Errors raised while constructing a level threshold table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelTableError {
    /// The threshold table must contain at least one entry.
    #[error("level threshold table must not be empty")]
    Empty,

    /// The first threshold must be zero.
    #[error("first level threshold must be zero, got {0}")]
    FirstNotZero(u64),

    /// Thresholds must be strictly ascending.
    #[error("level thresholds must be strictly ascending at index {index}")]
    NotAscending {
        /// Index of the first out-of-order threshold.
        index: usize,
    },
}

/// Derived loyalty standing for a point balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelStatus {
    /// Index of the highest tier whose threshold the balance reached.
    pub level: usize,

    /// Index of the next tier; equal to `level` at the top tier.
    pub next_level: usize,

    /// Progress towards the next tier, clamped to `[0, 100]`.
    pub progress_percent: Decimal,

    /// Points still needed to reach the next tier; zero at the top tier.
    pub points_to_next: u64,
}

/// Fixed ascending table mapping cumulative points to tier boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    thresholds: Vec<u64>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
        }
    }
}

impl LevelTable {
    /// Build a table from ascending thresholds starting at zero.
    ///
    /// # Errors
    ///
    /// - [`LevelTableError::Empty`]: no thresholds given.
    /// - [`LevelTableError::FirstNotZero`]: the first threshold is not zero.
    /// - [`LevelTableError::NotAscending`]: a threshold is not strictly greater
    ///   than its predecessor.
    pub fn new(thresholds: Vec<u64>) -> Result<Self, LevelTableError> {
        let first = *thresholds.first().ok_or(LevelTableError::Empty)?;
        if first != 0 {
            return Err(LevelTableError::FirstNotZero(first));
        }

        for (index, pair) in thresholds.windows(2).enumerate() {
            if let [previous, next] = pair {
                if next <= previous {
                    return Err(LevelTableError::NotAscending { index: index + 1 });
                }
            }
        }

        Ok(Self { thresholds })
    }

    /// The tier boundaries.
    pub fn thresholds(&self) -> &[u64] {
        &self.thresholds
    }

    /// Index of the top tier.
    pub fn max_level(&self) -> usize {
        self.thresholds.len().saturating_sub(1)
    }

    /// Map a point balance to its level and progress towards the next tier.
    ///
    /// Monotonically non-decreasing in `level` as `points` grows; there is no
    /// demotion path.
    pub fn status_of(&self, points: u64) -> LevelStatus {
        // T[0] = 0, so there is always a matching threshold.
        let level = self
            .thresholds
            .iter()
            .rposition(|&threshold| points >= threshold)
            .unwrap_or(0);

        if level == self.max_level() {
            return LevelStatus {
                level,
                next_level: level,
                progress_percent: Decimal::ONE_HUNDRED,
                points_to_next: 0,
            };
        }

        let current = self.thresholds.get(level).copied().unwrap_or(0);
        let next = self.thresholds.get(level + 1).copied().unwrap_or(current);
        let span = next.saturating_sub(current);

        let progress_percent = (Decimal::from(points.saturating_sub(current))
            * Decimal::ONE_HUNDRED)
            .checked_div(Decimal::from(span))
            .unwrap_or(Decimal::ONE_HUNDRED)
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

        LevelStatus {
            level,
            next_level: level + 1,
            progress_percent,
            points_to_next: next.saturating_sub(points),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn default_table_is_valid() -> TestResult {
        let table = LevelTable::new(DEFAULT_THRESHOLDS.to_vec())?;

        assert_eq!(table, LevelTable::default());

        Ok(())
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(LevelTable::new(vec![]), Err(LevelTableError::Empty));
    }

    #[test]
    fn nonzero_first_threshold_is_rejected() {
        assert_eq!(
            LevelTable::new(vec![10, 100]),
            Err(LevelTableError::FirstNotZero(10))
        );
    }

    #[test]
    fn non_ascending_thresholds_are_rejected() {
        assert_eq!(
            LevelTable::new(vec![0, 100, 100, 300]),
            Err(LevelTableError::NotAscending { index: 2 })
        );
    }

    #[test]
    fn zero_points_sit_at_level_zero() {
        let status = LevelTable::default().status_of(0);

        assert_eq!(status.level, 0);
        assert_eq!(status.next_level, 1);
        assert_eq!(status.progress_percent, Decimal::ZERO);
        assert_eq!(status.points_to_next, 100);
    }

    #[test]
    fn midway_between_tiers() -> TestResult {
        // 450 points against [0, 100, 300, 600, ...]: level 2, halfway to 600.
        let table = LevelTable::new(vec![0, 100, 300, 600, 1000])?;

        let status = table.status_of(450);

        assert_eq!(status.level, 2);
        assert_eq!(status.next_level, 3);
        assert_eq!(status.progress_percent, Decimal::from(50));
        assert_eq!(status.points_to_next, 150);

        Ok(())
    }

    #[test]
    fn exact_threshold_enters_the_tier() {
        let status = LevelTable::default().status_of(300);

        assert_eq!(status.level, 2);
        assert_eq!(status.progress_percent, Decimal::ZERO);
    }

    #[test]
    fn top_tier_is_pinned_at_one_hundred_percent() {
        let table = LevelTable::default();

        for points in [2000, 2001, 1_000_000] {
            let status = table.status_of(points);

            assert_eq!(status.level, table.max_level());
            assert_eq!(status.next_level, status.level);
            assert_eq!(status.progress_percent, Decimal::ONE_HUNDRED);
            assert_eq!(status.points_to_next, 0);
        }
    }

    #[test]
    fn level_is_monotonic_and_progress_stays_in_bounds() {
        let table = LevelTable::default();
        let mut previous_level = 0;

        for points in 0..2500 {
            let status = table.status_of(points);

            assert!(
                status.level >= previous_level,
                "level regressed at {points} points"
            );
            assert!(
                status.progress_percent >= Decimal::ZERO
                    && status.progress_percent <= Decimal::ONE_HUNDRED,
                "progress out of bounds at {points} points"
            );

            previous_level = status.level;
        }
    }
}
