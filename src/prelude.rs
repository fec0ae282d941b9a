//! LevelUp prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLineItem},
    catalog::{Catalog, CatalogError},
    fixtures::FixtureError,
    levels::{DEFAULT_THRESHOLDS, LevelStatus, LevelTable, LevelTableError},
    points::{PointAward, PointsAccount},
    prices::Price,
    products::{Product, ProductError},
    quantity::{MAX_QUANTITY, QuantityError, validate_quantity},
    referral::{ReferralError, ReferralLedger},
    session::{Profile, Registration, Session, SessionError},
    storage::{
        CART_KEY, FileStore, KeyValueStore, LineRecord, MemoryStore, PROFILE_KEY, RehydratedCart,
        StorageError, load_cart, save_cart,
    },
    totals::{CartConfig, Totals, TotalsError, compute_totals},
};
