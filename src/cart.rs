//! Cart

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    prices::Price,
    products::Product,
    quantity::{QuantityError, validate_quantity},
};

/// Errors surfaced by cart mutations.
///
/// Every failed operation leaves the cart exactly as it was.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// No line in the cart carries this product code.
    #[error("no cart line with product code {0:?}")]
    ItemNotFound(String),

    /// Wrapped quantity validation error.
    #[error(transparent)]
    Quantity(#[from] QuantityError),
}

/// One product-code-keyed row in a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineItem {
    product: Product,
    quantity: u32,
    added_at: Timestamp,
    updated_at: Timestamp,
}

impl CartLineItem {
    pub(crate) fn new(
        product: Product,
        quantity: u32,
        added_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            product,
            quantity,
            added_at,
            updated_at,
        }
    }

    /// The product snapshot taken when the line was created.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Units of the product in this line.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// When the line was first added. Informational only.
    pub fn added_at(&self) -> Timestamp {
        self.added_at
    }

    /// When the line was last changed. Informational only.
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Price {
        Price::new(*self.product.unit_price() * u64::from(self.quantity))
    }
}

/// An insertion-ordered cart holding at most one line per product code.
///
/// Mutations go through [`Cart::add_item`], [`Cart::remove_item`],
/// [`Cart::update_quantity`] and [`Cart::clear`]; persistence is the
/// caller's responsibility after each successful mutation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_lines(lines: Vec<CartLineItem>) -> Self {
        Self { lines }
    }

    /// Add `quantity` units of `product` to the cart.
    ///
    /// If a line with the same product code already exists, its quantity is
    /// incremented rather than a second line appended; the original product
    /// snapshot is kept. The combined quantity is validated against the
    /// incoming product's stock.
    ///
    /// # Errors
    ///
    /// Returns a [`QuantityError`] if `quantity` is zero, or if the combined
    /// quantity exceeds the per-line maximum or the product's stock. The cart
    /// is unchanged on failure.
    pub fn add_item(&mut self, product: Product, quantity: u32) -> Result<(), CartError> {
        validate_quantity(quantity, None)?;

        let existing = self.line(product.code()).map_or(0, CartLineItem::quantity);
        let combined = existing.saturating_add(quantity);
        validate_quantity(combined, Some(product.stock()))?;

        let now = Timestamp::now();

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.code() == product.code())
        {
            line.quantity = combined;
            line.updated_at = now;
        } else {
            self.lines.push(CartLineItem::new(product, quantity, now, now));
        }

        Ok(())
    }

    /// Remove the line with the given product code, returning it.
    ///
    /// The order of the remaining lines is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no line has that code.
    pub fn remove_item(&mut self, code: &str) -> Result<CartLineItem, CartError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.product.code() == code)
            .ok_or_else(|| CartError::ItemNotFound(code.to_owned()))?;

        Ok(self.lines.remove(index))
    }

    /// Replace the quantity of the line with the given product code.
    ///
    /// The line keeps its position; the new quantity is validated against the
    /// stock recorded in the line's product snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no line has that code, or a
    /// [`QuantityError`] if the new quantity is out of bounds. The cart is
    /// unchanged on failure.
    pub fn update_quantity(&mut self, code: &str, quantity: u32) -> Result<(), CartError> {
        let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.code() == code)
        else {
            return Err(CartError::ItemNotFound(code.to_owned()));
        };

        validate_quantity(quantity, Some(line.product.stock()))?;

        line.quantity = quantity;
        line.updated_at = Timestamp::now();

        Ok(())
    }

    /// Empty the cart. Always succeeds.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The line with the given product code, if present.
    pub fn line(&self, code: &str) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| line.product.code() == code)
    }

    /// All lines, in insertion order.
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }
}
