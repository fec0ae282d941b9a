//! Session

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError, CartLineItem},
    levels::{LevelStatus, LevelTable},
    points::{PointAward, PointsAccount},
    products::Product,
    referral::{ReferralError, ReferralLedger},
    storage::{self, KeyValueStore, PROFILE_KEY, StorageError},
    totals::{CartConfig, Totals, TotalsError, compute_totals},
};

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No user is logged in for this session.
    #[error("no user is logged in")]
    NotLoggedIn,

    /// A user is already logged in for this session.
    #[error("a user is already logged in")]
    AlreadyLoggedIn,

    /// A registrant supplied their own referral code.
    #[error("a referral code cannot be redeemed by its owner")]
    SelfReferral,

    /// Wrapped cart mutation error.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Wrapped totals computation error.
    #[error(transparent)]
    Totals(#[from] TotalsError),

    /// Wrapped storage error.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Wrapped referral code error.
    #[error(transparent)]
    Referral(#[from] ReferralError),
}

/// Persisted user profile record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name chosen at registration.
    pub username: String,

    /// Accumulated loyalty points.
    pub points: PointsAccount,

    /// Referral code owned by this user.
    pub referral_code: String,
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Referral code issued to the new user.
    pub referral_code: String,

    /// Owner of the redeemed referral code, if a valid one was supplied.
    ///
    /// Crediting the owner is the caller's side of the two independent
    /// referral awards; the new user's side is already applied.
    pub referrer: Option<String>,
}

/// A session context owning one user's cart and profile state.
///
/// Every successful cart mutation is followed by a full overwrite of the
/// persisted cart record. If the write fails the in-memory cart stays valid
/// and usable; the durable copy is stale until the next successful write.
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    store: S,
    cart: Cart,
    profile: Option<Profile>,
    config: CartConfig,
    levels: LevelTable,
    dropped_on_load: SmallVec<[usize; 8]>,
}

impl<S: KeyValueStore> Session<S> {
    /// Open a session over `store`, rehydrating any persisted cart and
    /// profile.
    ///
    /// A corrupt cart or profile document is treated as absent rather than
    /// fatal; entries dropped during cart rehydration are reported by
    /// [`Session::dropped_on_load`].
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if a store read itself fails.
    pub fn open(store: S, config: CartConfig, levels: LevelTable) -> Result<Self, SessionError> {
        let (cart, dropped_on_load) = match storage::load_cart(&store) {
            Ok(rehydrated) => (rehydrated.cart, rehydrated.dropped),
            Err(StorageError::Json(_)) => (Cart::new(), SmallVec::new()),
            Err(error) => return Err(error.into()),
        };

        let profile = match store.get(PROFILE_KEY)? {
            Some(document) => serde_json::from_str(&document).ok(),
            None => None,
        };

        Ok(Self {
            store,
            cart,
            profile,
            config,
            levels,
            dropped_on_load,
        })
    }

    /// The live cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The logged-in profile, if any.
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// The pricing configuration.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Indices of persisted cart entries dropped during rehydration.
    pub fn dropped_on_load(&self) -> &[usize] {
        &self.dropped_on_load
    }

    /// Add `quantity` units of `product` to the cart and persist.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if validation fails (cart unchanged), or a
    /// [`StorageError`] if the write fails (cart mutated in memory).
    pub fn add_item(&mut self, product: Product, quantity: u32) -> Result<(), SessionError> {
        self.cart.add_item(product, quantity)?;
        self.persist_cart()
    }

    /// Remove the line with the given product code and persist.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no line has that code, or a
    /// [`StorageError`] if the write fails.
    pub fn remove_item(&mut self, code: &str) -> Result<CartLineItem, SessionError> {
        let removed = self.cart.remove_item(code)?;
        self.persist_cart()?;
        Ok(removed)
    }

    /// Replace the quantity of the line with the given product code and
    /// persist.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if validation fails, or a [`StorageError`] if
    /// the write fails.
    pub fn update_quantity(&mut self, code: &str, quantity: u32) -> Result<(), SessionError> {
        self.cart.update_quantity(code, quantity)?;
        self.persist_cart()
    }

    /// Empty the cart and persist.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the write fails.
    pub fn clear_cart(&mut self) -> Result<(), SessionError> {
        self.cart.clear();
        self.persist_cart()
    }

    /// Recompute totals from the live cart.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalsError`] if the tax amount is not representable.
    pub fn totals(&self) -> Result<Totals, SessionError> {
        Ok(compute_totals(self.cart.lines(), &self.config)?)
    }

    /// Register a new user, issuing a referral code and applying the
    /// registration bonus.
    ///
    /// If `referral_code` names a code in `ledger`, the new user is also
    /// credited with the referral bonus and the code owner's username is
    /// returned so the owning collaborator can apply the second, independent
    /// award. An unknown code is ignored.
    ///
    /// # Errors
    ///
    /// - [`SessionError::AlreadyLoggedIn`]: this session has a profile.
    /// - [`SessionError::SelfReferral`]: the supplied code belongs to the
    ///   registrant.
    /// - [`ReferralError::AttemptsExhausted`]: code issuing gave up.
    /// - [`StorageError`]: the profile write failed.
    pub fn register<R: Rng>(
        &mut self,
        rng: &mut R,
        username: &str,
        referral_code: Option<&str>,
        ledger: &mut ReferralLedger,
    ) -> Result<Registration, SessionError> {
        if self.profile.is_some() {
            return Err(SessionError::AlreadyLoggedIn);
        }

        let referrer = match referral_code.map(|code| (code, ledger.owner_of(code))) {
            Some((_, Some(owner))) if owner == username => {
                return Err(SessionError::SelfReferral);
            }
            Some((_, Some(owner))) => Some(owner.to_owned()),
            _ => None,
        };

        let own_code = ledger.issue(rng, username)?;

        let mut points = PointsAccount::new();
        points.award(PointAward::Registration);
        if referrer.is_some() {
            points.award(PointAward::Referral);
        }

        self.profile = Some(Profile {
            username: username.to_owned(),
            points,
            referral_code: own_code.clone(),
        });
        self.persist_profile()?;

        Ok(Registration {
            referral_code: own_code,
            referrer,
        })
    }

    /// Log an existing profile into this session and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyLoggedIn`] if a profile is present, or
    /// a [`StorageError`] if the write fails.
    pub fn login(&mut self, profile: Profile) -> Result<(), SessionError> {
        if self.profile.is_some() {
            return Err(SessionError::AlreadyLoggedIn);
        }

        self.profile = Some(profile);
        self.persist_profile()
    }

    /// Log out, removing the persisted profile record.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the delete fails.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.profile = None;
        self.store.remove(PROFILE_KEY)?;
        Ok(())
    }

    /// Apply a point award to the logged-in profile, persist it, and return
    /// the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotLoggedIn`] without a profile, or a
    /// [`StorageError`] if the write fails.
    pub fn award_points(&mut self, award: PointAward) -> Result<u64, SessionError> {
        let profile = self.profile.as_mut().ok_or(SessionError::NotLoggedIn)?;
        let balance = profile.points.award(award);
        self.persist_profile()?;
        Ok(balance)
    }

    /// Level standing of the logged-in profile.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotLoggedIn`] without a profile.
    pub fn level_status(&self) -> Result<LevelStatus, SessionError> {
        let profile = self.profile.as_ref().ok_or(SessionError::NotLoggedIn)?;
        Ok(self.levels.status_of(profile.points.balance()))
    }

    fn persist_cart(&mut self) -> Result<(), SessionError> {
        storage::save_cart(&mut self.store, &self.cart)?;
        Ok(())
    }

    fn persist_profile(&mut self) -> Result<(), SessionError> {
        if let Some(profile) = &self.profile {
            let document = serde_json::to_string(profile).map_err(StorageError::Json)?;
            self.store.put(PROFILE_KEY, &document)?;
        }
        Ok(())
    }
}
