//! Application state shared with UI-adjacent callers.
//!
//! [`AppState`] is the single writer for the session, cart, wishlist, and
//! order history. Views receive a clone of the handle (cheap, `Arc`-backed)
//! and read snapshots through accessors; every mutation goes through the
//! methods in [`crate::session`], [`crate::cart`], and [`crate::checkout`].
//!
//! Execution is event-driven: callbacks run to completion, so the inner
//! mutex is only ever held for short synchronous sections and never across
//! an `await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use aurelia_core::{CartItem, Order, UserProfile, WishlistItem};

use crate::config::ClientConfig;
use crate::gateway::ApiGateway;
use crate::store::{LocalStore, StoreError};

/// The authenticated-identity state.
///
/// Authentication truth is carried by the variant: an `Authenticated`
/// session always has both a user and a non-empty token, so the invariant
/// "authenticated iff a current user exists" holds by construction.
#[derive(Debug, Clone, Default)]
pub enum Session {
    /// No user is signed in.
    #[default]
    Anonymous,
    /// A user is signed in.
    Authenticated {
        /// The signed-in user.
        user: UserProfile,
        /// The session token, mirrored in the local store.
        token: String,
    },
}

impl Session {
    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { user, .. } => Some(user),
        }
    }
}

/// Mutable client state guarded by the [`AppState`] mutex.
#[derive(Debug, Default)]
pub(crate) struct AppData {
    pub(crate) session: Session,
    pub(crate) profile: Option<UserProfile>,
    pub(crate) cart: Vec<CartItem>,
    pub(crate) wishlist: Vec<WishlistItem>,
    pub(crate) orders: Vec<Order>,
    pub(crate) last_placed_order: Option<Order>,
    /// Set once initial session restoration has completed. The snapshot
    /// writer stays off before that, so a half-initialized state never
    /// overwrites real data.
    pub(crate) restored: bool,
}

impl AppData {
    /// Drop everything tied to the current user.
    pub(crate) fn clear_user_data(&mut self) {
        self.profile = None;
        self.cart.clear();
        self.wishlist.clear();
        self.orders.clear();
        self.last_placed_order = None;
    }
}

/// Client application state.
///
/// Cheaply cloneable via `Arc`; all clones observe and mutate the same
/// session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ClientConfig,
    gateway: ApiGateway,
    store: LocalStore,
    data: Mutex<AppData>,
}

impl AppState {
    /// Create the application state.
    ///
    /// Opens the local store and seeds the gateway's bearer token from it,
    /// so requests issued before [`restore_session`](Self::restore_session)
    /// already carry a stored credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the local store cannot be opened or read.
    pub fn new(config: ClientConfig) -> Result<Self, StoreError> {
        let store = LocalStore::open(&config.data_dir)?;
        let gateway = ApiGateway::new(&config, store.clone());
        gateway.set_token(store.auth_token()?);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                gateway,
                store,
                data: Mutex::new(AppData::default()),
            }),
        })
    }

    /// Get a reference to the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Get a reference to the remote data gateway.
    #[must_use]
    pub fn gateway(&self) -> &ApiGateway {
        &self.inner.gateway
    }

    /// Get a reference to the persistent local store.
    #[must_use]
    pub fn store(&self) -> &LocalStore {
        &self.inner.store
    }

    /// Lock the mutable state. Internal callers keep the guard short-lived
    /// and never hold it across an `await`.
    pub(crate) fn data(&self) -> MutexGuard<'_, AppData> {
        self.inner.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.data().session.is_authenticated()
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.data().session.user().cloned()
    }

    /// The signed-in user's profile, if loaded.
    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        self.data().profile.clone()
    }

    /// Snapshot of the cart.
    #[must_use]
    pub fn cart(&self) -> Vec<CartItem> {
        self.data().cart.clone()
    }

    /// Snapshot of the wishlist.
    #[must_use]
    pub fn wishlist(&self) -> Vec<WishlistItem> {
        self.data().wishlist.clone()
    }

    /// Snapshot of the order history, most recent first.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.data().orders.clone()
    }

    /// The most recently placed order, shown on the confirmation screen.
    #[must_use]
    pub fn last_placed_order(&self) -> Option<Order> {
        self.data().last_placed_order.clone()
    }

    /// Whether initial session restoration has completed.
    #[must_use]
    pub fn is_restored(&self) -> bool {
        self.data().restored
    }
}
