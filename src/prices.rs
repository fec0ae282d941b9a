//! Prices

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Represents a price in whole Chilean pesos.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price {
    value: u64,
}

impl Price {
    /// A zero price.
    pub const ZERO: Price = Price { value: 0 };

    /// Creates a new Price
    pub fn new(value: u64) -> Self {
        Price { value }
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl fmt::Display for Price {
    /// Formats with a dot as the thousands separator, e.g. `$24.990`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.value.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        write!(f, "${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_price() {
        let price = Price::new(1000);

        assert_eq!(price.value, 1000);
    }

    #[test]
    fn price_derefs_to_u64() {
        let price = Price { value: 100 };

        assert_eq!(*price, 100);
    }

    #[test]
    fn display_groups_thousands() {
        assert_eq!(Price::new(0).to_string(), "$0");
        assert_eq!(Price::new(999).to_string(), "$999");
        assert_eq!(Price::new(5000).to_string(), "$5.000");
        assert_eq!(Price::new(1_249_990).to_string(), "$1.249.990");
    }

    #[test]
    fn serializes_as_bare_integer() -> testresult::TestResult {
        let json = serde_json::to_string(&Price::new(24_990))?;

        assert_eq!(json, "24990");

        Ok(())
    }
}
