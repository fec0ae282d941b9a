//! Storage

use std::{fs, io, path::PathBuf};

use jiff::Timestamp;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cart::{Cart, CartLineItem},
    prices::Price,
    products::Product,
    quantity::validate_quantity,
};

/// Well-known key for the persisted cart record.
pub const CART_KEY: &str = "levelup.cart";

/// Well-known key for the persisted profile record.
pub const PROFILE_KEY: &str = "levelup.profile";

/// Errors raised by the persistence layer.
///
/// Always recoverable: a failed write leaves the in-memory state valid, and
/// the durable copy simply stays stale until the next successful write.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying store I/O failure.
    #[error("storage backend error: {0}")]
    Io(#[from] io::Error),

    /// A record could not be encoded or decoded.
    #[error("failed to encode or decode stored record: {0}")]
    Json(#[from] serde_json::Error),
}

/// A durable string key-value store with whole-value overwrite semantics.
///
/// Reads and writes are not transactional; concurrent writers race and the
/// last writer wins. Single-session sequential use is consistent.
pub trait KeyValueStore {
    /// Fetch the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend read fails.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend write fails.
    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend delete fails.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl KeyValueStore for Box<dyn KeyValueStore> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).put(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Volatile in-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One-file-per-key store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// Wire shape of one persisted cart line.
///
/// Deliberately a loose bag of fields; [`load_cart`] re-validates each record
/// before it becomes a live [`CartLineItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRecord {
    /// Product code.
    pub code: String,
    /// Product name.
    pub name: String,
    /// Brand name.
    pub brand: String,
    /// Product description.
    pub description: String,
    /// Unit price in whole pesos.
    pub unit_price: u64,
    /// Stock recorded when the snapshot was taken.
    pub stock: u32,
    /// Customer rating.
    pub rating: f32,
    /// Units in the line.
    pub quantity: u32,
    /// When the line was first added.
    pub added_at: Timestamp,
    /// When the line was last changed.
    pub updated_at: Timestamp,
}

impl From<&CartLineItem> for LineRecord {
    fn from(line: &CartLineItem) -> Self {
        let product = line.product();
        Self {
            code: product.code().to_owned(),
            name: product.name().to_owned(),
            brand: product.brand().to_owned(),
            description: product.description().to_owned(),
            unit_price: *product.unit_price(),
            stock: product.stock(),
            rating: product.rating(),
            quantity: line.quantity(),
            added_at: line.added_at(),
            updated_at: line.updated_at(),
        }
    }
}

impl LineRecord {
    /// Re-validate a stored record into a live cart line.
    fn into_line(self) -> Option<CartLineItem> {
        let product = Product::new(
            self.code,
            self.name,
            self.brand,
            self.description,
            Price::new(self.unit_price),
            self.stock,
            self.rating,
        )
        .ok()?;

        validate_quantity(self.quantity, Some(self.stock)).ok()?;

        Some(CartLineItem::new(
            product,
            self.quantity,
            self.added_at,
            self.updated_at,
        ))
    }
}

/// A rehydrated cart plus the indices of persisted entries that failed
/// validation and were dropped.
#[derive(Debug)]
pub struct RehydratedCart {
    /// The cart rebuilt from the surviving records.
    pub cart: Cart,

    /// Zero-based indices of dropped entries, in document order.
    pub dropped: SmallVec<[usize; 8]>,
}

/// Overwrite the persisted cart record with the full line list.
///
/// # Errors
///
/// Returns a [`StorageError`] if encoding or the store write fails; the
/// in-memory cart is unaffected either way.
pub fn save_cart<S: KeyValueStore>(store: &mut S, cart: &Cart) -> Result<(), StorageError> {
    let records: Vec<LineRecord> = cart.lines().iter().map(LineRecord::from).collect();
    let document = serde_json::to_string(&records)?;
    store.put(CART_KEY, &document)
}

/// Load the persisted cart record, re-validating every entry.
///
/// This is the load-time invariant enforcement point: entries failing product
/// or quantity validation, and entries duplicating an earlier product code,
/// are silently dropped and reported by index. A missing record yields an
/// empty cart.
///
/// # Errors
///
/// Returns a [`StorageError`] if the store read fails or the document as a
/// whole is not valid JSON.
pub fn load_cart<S: KeyValueStore>(store: &S) -> Result<RehydratedCart, StorageError> {
    let Some(document) = store.get(CART_KEY)? else {
        return Ok(RehydratedCart {
            cart: Cart::new(),
            dropped: SmallVec::new(),
        });
    };

    let records: Vec<LineRecord> = serde_json::from_str(&document)?;

    let mut lines = Vec::with_capacity(records.len());
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut dropped = SmallVec::new();

    for (index, record) in records.into_iter().enumerate() {
        let code = record.code.clone();
        match record.into_line() {
            Some(line) => {
                if seen.insert(code) {
                    lines.push(line);
                } else {
                    dropped.push(index);
                }
            }
            None => dropped.push(index),
        }
    }

    Ok(RehydratedCart {
        cart: Cart::from_lines(lines),
        dropped,
    })
}
