//! Catalogue

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::products::Product;

/// Errors raised while building a catalogue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two products share the same code.
    #[error("duplicate product code {0:?}")]
    DuplicateCode(String),
}

/// A read-only product catalogue with code lookup.
///
/// The cart engine never mutates catalogue stock; stock figures only bound
/// quantity validation at the time a product snapshot enters a cart.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<String, usize>,
}

impl Catalog {
    /// Build a catalogue from a product list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateCode`] if two products share a code.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = FxHashMap::default();

        for (position, product) in products.iter().enumerate() {
            if index.insert(product.code().to_owned(), position).is_some() {
                return Err(CatalogError::DuplicateCode(product.code().to_owned()));
            }
        }

        Ok(Self { products, index })
    }

    /// The product with the given code, if present.
    pub fn get(&self, code: &str) -> Option<&Product> {
        self.index
            .get(code)
            .and_then(|&position| self.products.get(position))
    }

    /// Iterate over the products in catalogue order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
