//! Quantity validation

use thiserror::Error;

/// Maximum quantity of a single product allowed in a cart line.
pub const MAX_QUANTITY: u32 = 999;

/// Errors raised while validating a candidate quantity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    /// The quantity must be at least one.
    #[error("quantity must be a positive integer")]
    NotPositive,

    /// The quantity exceeds the per-line maximum.
    #[error("quantity {quantity} exceeds the maximum of {max}", max = MAX_QUANTITY)]
    ExceedsMaximum {
        /// The rejected quantity.
        quantity: u32,
    },

    /// More units were requested than the product has in stock.
    #[error("requested {requested} units but only {stock} in stock")]
    InsufficientStock {
        /// The rejected quantity.
        requested: u32,
        /// Units available at validation time.
        stock: u32,
    },
}

/// Validate a candidate quantity against the global bounds and, when given,
/// a stock ceiling.
///
/// # Errors
///
/// - [`QuantityError::NotPositive`]: the quantity is zero.
/// - [`QuantityError::ExceedsMaximum`]: the quantity is above [`MAX_QUANTITY`].
/// - [`QuantityError::InsufficientStock`]: a stock bound was given and exceeded.
pub fn validate_quantity(quantity: u32, stock: Option<u32>) -> Result<(), QuantityError> {
    if quantity == 0 {
        return Err(QuantityError::NotPositive);
    }

    if quantity > MAX_QUANTITY {
        return Err(QuantityError::ExceedsMaximum { quantity });
    }

    if let Some(stock) = stock {
        if quantity > stock {
            return Err(QuantityError::InsufficientStock {
                requested: quantity,
                stock,
            });
        }
    }

    Ok(())
}
