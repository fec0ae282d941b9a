//! Referral codes

use rand::{Rng, distributions::Alphanumeric};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Length of generated referral codes.
pub const CODE_LENGTH: usize = 8;

/// Maximum draws before code generation gives up.
pub const MAX_ATTEMPTS: usize = 16;

/// Errors raised while issuing referral codes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReferralError {
    /// No unused code was drawn within the attempt cap.
    #[error("gave up generating a unique referral code after {max} attempts", max = MAX_ATTEMPTS)]
    AttemptsExhausted,
}

/// Maps issued referral codes to the usernames that own them.
#[derive(Debug, Default, Clone)]
pub struct ReferralLedger {
    codes: FxHashMap<String, String>,
}

impl ReferralLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh code owned by `owner`.
    ///
    /// Draws are retried on collision up to [`MAX_ATTEMPTS`] times; a bounded
    /// loop rather than recursion.
    ///
    /// # Errors
    ///
    /// Returns [`ReferralError::AttemptsExhausted`] if every draw collided
    /// with an already-issued code.
    pub fn issue<R: Rng>(&mut self, rng: &mut R, owner: &str) -> Result<String, ReferralError> {
        for _ in 0..MAX_ATTEMPTS {
            let code = draw_code(rng);
            if !self.codes.contains_key(&code) {
                self.codes.insert(code.clone(), owner.to_owned());
                return Ok(code);
            }
        }

        Err(ReferralError::AttemptsExhausted)
    }

    /// Username that owns `code`, if it was ever issued.
    pub fn owner_of(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    /// Number of issued codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check whether any codes have been issued.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Draw one uppercase alphanumeric code.
fn draw_code<R: Rng>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn issued_codes_resolve_to_their_owner() -> TestResult {
        let mut ledger = ReferralLedger::new();
        let mut rng = rand::thread_rng();

        let code = ledger.issue(&mut rng, "valentina")?;

        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.chars().all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit()));
        assert_eq!(ledger.owner_of(&code), Some("valentina"));
        assert_eq!(ledger.len(), 1);

        Ok(())
    }

    #[test]
    fn unknown_code_has_no_owner() {
        let ledger = ReferralLedger::new();

        assert_eq!(ledger.owner_of("ZZZZZZZZ"), None);
        assert!(ledger.is_empty());
    }

    #[test]
    fn generation_gives_up_after_the_attempt_cap() -> TestResult {
        // A constant RNG draws the same code every time, so the second issue
        // can only ever collide.
        let mut rng = StepRng::new(42, 0);
        let mut ledger = ReferralLedger::new();

        ledger.issue(&mut rng, "valentina")?;
        let result = ledger.issue(&mut rng, "matias");

        assert_eq!(result, Err(ReferralError::AttemptsExhausted));
        assert_eq!(ledger.len(), 1);

        Ok(())
    }
}
