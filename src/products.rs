//! Products

use thiserror::Error;

use crate::prices::Price;

/// Errors raised while parsing a product record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// The product code is missing or blank.
    #[error("product code must not be empty")]
    EmptyCode,

    /// The product name is missing or blank.
    #[error("product name must not be empty")]
    EmptyName,

    /// The unit price must be a positive amount.
    #[error("product unit price must be greater than zero")]
    NonPositivePrice,
}

/// A catalogue product snapshot.
///
/// Construction goes through [`Product::new`], which rejects malformed input
/// at the boundary; a held `Product` is always shape-valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    code: String,
    name: String,
    brand: String,
    description: String,
    unit_price: Price,
    stock: u32,
    rating: f32,
}

impl Product {
    /// Parse a product record.
    ///
    /// # Errors
    ///
    /// - [`ProductError::EmptyCode`]: the code is empty or whitespace-only.
    /// - [`ProductError::EmptyName`]: the name is empty or whitespace-only.
    /// - [`ProductError::NonPositivePrice`]: the unit price is zero.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        brand: impl Into<String>,
        description: impl Into<String>,
        unit_price: Price,
        stock: u32,
        rating: f32,
    ) -> Result<Self, ProductError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(ProductError::EmptyCode);
        }

        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProductError::EmptyName);
        }

        if *unit_price == 0 {
            return Err(ProductError::NonPositivePrice);
        }

        Ok(Self {
            code,
            name,
            brand: brand.into(),
            description: description.into(),
            unit_price,
            stock,
            rating,
        })
    }

    /// Unique product code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Brand name.
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Display description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Price per unit in whole pesos.
    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Units available for purchase.
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Customer rating in `[0, 5]`.
    pub fn rating(&self) -> f32 {
        self.rating
    }
}
