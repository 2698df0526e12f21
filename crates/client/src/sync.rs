//! Snapshot synchronization.
//!
//! Every user-data mutation funnels through [`AppState::sync_user_data`],
//! which persists the whole snapshot (profile, cart, wishlist, orders) in
//! one write, last writer wins. The local store is authoritative; the
//! remote mirror is best-effort and a failed mirror never rolls back local
//! state.
//!
//! The writer is armed only once the session has been restored and a user
//! is signed in. Anonymous browsing mutates memory freely without writing
//! anything, and nothing is persisted before restoration has had the chance
//! to load the previous snapshot.

use tracing::{debug, instrument, warn};

use aurelia_core::UserSnapshot;

use crate::state::AppState;
use crate::store::StoreError;

impl AppState {
    /// Persist the current user snapshot, locally then remotely.
    ///
    /// Does nothing while anonymous or before session restoration.
    ///
    /// # Errors
    ///
    /// Returns an error if the local write fails. A failed remote mirror is
    /// logged and swallowed.
    #[instrument(skip(self))]
    pub async fn persist_user_data(&self) -> Result<(), StoreError> {
        let (user_key, snapshot) = {
            let data = self.data();
            if !data.restored {
                return Ok(());
            }
            let Some(user) = data.session.user() else {
                return Ok(());
            };
            (
                user.storage_key().to_owned(),
                UserSnapshot {
                    profile: data.profile.clone(),
                    cart: data.cart.clone(),
                    wishlist: data.wishlist.clone(),
                    orders: data.orders.clone(),
                },
            )
        };

        self.store().save_snapshot(&user_key, &snapshot)?;
        debug!(user = %user_key, "snapshot saved");

        if let Err(err) = self.gateway().persist_snapshot(&user_key, &snapshot).await {
            warn!(error = %err, "remote snapshot mirror failed, local copy kept");
        }
        Ok(())
    }

    /// Fire-and-forget variant used after mutations: a failed local write is
    /// logged rather than bubbled into UI paths that cannot act on it.
    pub(crate) async fn sync_user_data(&self) {
        if let Err(err) = self.persist_user_data().await {
            warn!(error = %err, "failed to persist user data");
        }
    }
}
