//! Points

use serde::{Deserialize, Serialize};

/// Flat bonus for completing registration.
pub const REGISTRATION_BONUS: u64 = 100;

/// Flat bonus granted to each side of a valid referral.
pub const REFERRAL_BONUS: u64 = 500;

/// Flat bonus for writing a product review.
pub const REVIEW_BONUS: u64 = 50;

/// A single point-award event.
///
/// A valid referral-code use at registration produces two independent
/// [`PointAward::Referral`] awards, one for the new user and one for the
/// code's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointAward {
    /// Completing registration.
    Registration,

    /// Either side of a valid referral-code use.
    Referral,

    /// Writing a product review.
    Review,

    /// A generic activity grant of the given size.
    Activity(u64),
}

impl PointAward {
    /// Number of points this award grants.
    pub fn points(self) -> u64 {
        match self {
            PointAward::Registration => REGISTRATION_BONUS,
            PointAward::Referral => REFERRAL_BONUS,
            PointAward::Review => REVIEW_BONUS,
            PointAward::Activity(points) => points,
        }
    }
}

/// A monotonically increasing point balance.
///
/// There is no decay, expiry or demotion path; awards only ever add.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointsAccount {
    balance: u64,
}

impl PointsAccount {
    /// A fresh account with a zero balance.
    pub fn new() -> Self {
        Self::default()
    }

    /// An account rehydrated with an existing balance.
    pub fn with_balance(balance: u64) -> Self {
        Self { balance }
    }

    /// Current point balance.
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Apply an award and return the new balance.
    pub fn award(&mut self, award: PointAward) -> u64 {
        self.balance = self.balance.saturating_add(award.points());
        self.balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn awards_accumulate() {
        let mut account = PointsAccount::new();

        assert_eq!(account.award(PointAward::Registration), REGISTRATION_BONUS);
        assert_eq!(
            account.award(PointAward::Referral),
            REGISTRATION_BONUS + REFERRAL_BONUS
        );
        assert_eq!(
            account.award(PointAward::Activity(25)),
            REGISTRATION_BONUS + REFERRAL_BONUS + 25
        );
    }

    #[test]
    fn award_sizes() {
        assert_eq!(PointAward::Registration.points(), REGISTRATION_BONUS);
        assert_eq!(PointAward::Referral.points(), REFERRAL_BONUS);
        assert_eq!(PointAward::Review.points(), REVIEW_BONUS);
        assert_eq!(PointAward::Activity(7).points(), 7);
    }

    #[test]
    fn with_balance_rehydrates() {
        let account = PointsAccount::with_balance(450);

        assert_eq!(account.balance(), 450);
    }

    #[test]
    fn serializes_as_bare_integer() -> testresult::TestResult {
        let account = PointsAccount::with_balance(650);

        assert_eq!(serde_json::to_string(&account)?, "650");

        Ok(())
    }
}
