//! LevelUp
//!
//! LevelUp is the cart, totals and loyalty engine behind the LevelUp Gaming
//! storefront: typed product records, a code-keyed cart state machine, a pure
//! totals calculator and a threshold-based leveling function, with JSON
//! persistence over a pluggable key-value store.

pub mod cart;
pub mod catalog;
pub mod fixtures;
pub mod levels;
pub mod points;
pub mod prelude;
pub mod prices;
pub mod products;
pub mod quantity;
pub mod referral;
pub mod session;
pub mod storage;
pub mod totals;
