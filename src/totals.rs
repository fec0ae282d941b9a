//! Totals

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

use crate::{cart::CartLineItem, prices::Price};

/// Errors that can occur while computing cart totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalsError {
    /// The tax amount could not be represented in whole pesos.
    #[error("tax amount overflowed or was not representable in whole pesos")]
    TaxConversion,
}

/// Fixed pricing configuration for totals computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Tax rate applied to the subtotal (IVA).
    pub tax_rate: Decimal,

    /// Subtotal at or above which the shipping fee is waived.
    pub free_shipping_threshold: Price,

    /// Flat shipping fee charged below the threshold.
    pub standard_shipping_fee: Price,
}

impl Default for CartConfig {
    /// 19% IVA, free shipping from $50.000, $5.000 standard shipping.
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(19, 2),
            free_shipping_threshold: Price::new(50_000),
            standard_shipping_fee: Price::new(5_000),
        }
    }
}

/// Derived cart totals.
///
/// Never stored; recomputed from the full line list on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totals {
    /// Sum of unit price times quantity over all lines.
    pub subtotal: Price,

    /// Tax on the subtotal, rounded half away from zero to whole pesos.
    pub tax: Price,

    /// Shipping fee; zero at or above the free-shipping threshold.
    pub shipping: Price,

    /// Subtotal plus tax plus shipping.
    pub total: Price,

    /// Total units across all lines.
    pub item_count: u64,

    /// The shipping fee avoided by reaching the free-shipping threshold.
    pub savings: Price,

    /// Whether the subtotal reached the free-shipping threshold.
    pub free_shipping_reached: bool,

    /// Subtotal still needed to reach the free-shipping threshold.
    pub free_shipping_remaining: Price,
}

impl Totals {
    /// Totals of an empty cart.
    pub const EMPTY: Totals = Totals {
        subtotal: Price::ZERO,
        tax: Price::ZERO,
        shipping: Price::ZERO,
        total: Price::ZERO,
        item_count: 0,
        savings: Price::ZERO,
        free_shipping_reached: false,
        free_shipping_remaining: Price::ZERO,
    };
}

/// Compute totals for the given cart lines.
///
/// An empty line list yields [`Totals::EMPTY`].
///
/// # Errors
///
/// Returns [`TotalsError::TaxConversion`] if the tax amount cannot be
/// represented in whole pesos.
pub fn compute_totals(lines: &[CartLineItem], config: &CartConfig) -> Result<Totals, TotalsError> {
    if lines.is_empty() {
        return Ok(Totals::EMPTY);
    }

    let subtotal: u64 = lines.iter().map(|line| *line.line_total()).sum();
    let item_count: u64 = lines.iter().map(|line| u64::from(line.quantity())).sum();

    let tax = (Decimal::from(subtotal) * config.tax_rate)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(TotalsError::TaxConversion)?;

    let free_shipping_reached = subtotal >= *config.free_shipping_threshold;
    let shipping = if free_shipping_reached {
        0
    } else {
        *config.standard_shipping_fee
    };
    let savings = if free_shipping_reached {
        *config.standard_shipping_fee
    } else {
        0
    };

    Ok(Totals {
        subtotal: Price::new(subtotal),
        tax: Price::new(tax),
        shipping: Price::new(shipping),
        total: Price::new(subtotal + tax + shipping),
        item_count,
        savings: Price::new(savings),
        free_shipping_reached,
        free_shipping_remaining: Price::new(
            config.free_shipping_threshold.saturating_sub(subtotal),
        ),
    })
}
