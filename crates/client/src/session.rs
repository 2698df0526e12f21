//! Session lifecycle: restore, login, registration, social login, logout.
//!
//! Restoration fails closed: a stored token that cannot be validated (and
//! cannot be decoded offline) is discarded and the client starts anonymous,
//! never half-signed-in with a dead credential.

use thiserror::Error;
use tracing::{info, instrument, warn};

use aurelia_core::UserProfile;

use crate::gateway::{ApiError, AuthSession, SocialUser};
use crate::state::{AppState, Session};
use crate::store::StoreError;

/// Errors raised by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The local store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The backend accepted the credentials but issued no session token.
    #[error("authentication response did not include a token")]
    MissingToken,
}

impl AppState {
    // =========================================================================
    // Restoration
    // =========================================================================

    /// Restore the session from the locally stored token, once at startup.
    ///
    /// With no stored token the client simply becomes restored-and-anonymous.
    /// With a token, the profile is fetched to validate it; a rejected or
    /// undecodable token is cleared everywhere and the client ends anonymous.
    /// Either way the state is marked restored, which arms the snapshot
    /// writer.
    ///
    /// # Errors
    ///
    /// Returns an error only on local store failures; backend rejection is
    /// handled by signing out, not reported as an error.
    #[instrument(skip(self))]
    pub async fn restore_session(&self) -> Result<(), SessionError> {
        let Some(token) = self.store().auth_token()? else {
            self.data().restored = true;
            return Ok(());
        };

        self.gateway().set_token(Some(token.clone()));
        match self.gateway().fetch_profile().await {
            Ok(profile) => {
                self.store().set_user_info(&profile)?;
                {
                    let mut data = self.data();
                    data.session = Session::Authenticated {
                        user: profile.clone(),
                        token,
                    };
                    data.profile = Some(profile.clone());
                    data.restored = true;
                }
                info!(email = %profile.email, "session restored");
                self.load_user_data(profile.storage_key()).await
            }
            Err(err) => {
                warn!(error = %err, "stored token could not be validated, signing out");
                // Mark restored even if the cleanup fails, so the snapshot
                // writer is not left disarmed for the rest of the process.
                let cleared = self.sign_out_locally();
                self.data().restored = true;
                cleared.map_err(Into::into)
            }
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Log in with an email (or username) and password.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected, the response is
    /// incomplete, or the local store fails.
    #[instrument(skip(self, password), fields(identifier = %identifier))]
    pub async fn login(&self, identifier: &str, password: &str) -> Result<(), SessionError> {
        let session = self.gateway().login(identifier, password).await?;
        let fallback = UserProfile {
            email: identifier.to_owned(),
            ..UserProfile::default()
        };
        self.complete_sign_in(session, fallback).await
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// Returns an error if the registration is rejected, the response is
    /// incomplete, or the local store fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), SessionError> {
        let session = self.gateway().register(name, email, password).await?;
        let fallback = UserProfile {
            name: name.to_owned(),
            email: email.to_owned(),
            ..UserProfile::default()
        };
        self.complete_sign_in(session, fallback).await
    }

    /// Sign in with a provider-supplied identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the identity is rejected, the response is
    /// incomplete, or the local store fails.
    #[instrument(skip(self, user), fields(provider = %user.provider))]
    pub async fn social_login(&self, user: &SocialUser) -> Result<(), SessionError> {
        let session = self.gateway().social_login(user).await?;
        let fallback = UserProfile {
            name: user.name.clone(),
            email: user.email.clone(),
            ..UserProfile::default()
        };
        self.complete_sign_in(session, fallback).await
    }

    /// Sign out. Clears the token and cached profile everywhere and resets
    /// the in-memory user data. Calling this while anonymous is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the local store fails.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), SessionError> {
        self.sign_out_locally()?;
        info!("signed out");
        Ok(())
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Replace the signed-in user's profile (name, addresses).
    ///
    /// # Errors
    ///
    /// Returns an error if the local store fails. Remote persistence is
    /// best-effort via the snapshot writer.
    #[instrument(skip(self, profile))]
    pub async fn update_profile(&self, profile: UserProfile) -> Result<(), SessionError> {
        self.store().set_user_info(&profile)?;
        {
            let mut data = self.data();
            if let Session::Authenticated { user, .. } = &mut data.session {
                *user = profile.clone();
            }
            data.profile = Some(profile);
        }
        self.sync_user_data().await;
        Ok(())
    }

    /// Change the signed-in user's password.
    ///
    /// # Errors
    ///
    /// Returns an error if the current password is wrong or the backend
    /// cannot be reached. There is no offline path for credential changes.
    #[instrument(skip(self, current_password, new_password))]
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), SessionError> {
        self.gateway()
            .change_password(current_password, new_password)
            .await?;
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Finish a successful authentication exchange: persist the token,
    /// resolve the profile, switch to the authenticated session, and load
    /// the user's saved data.
    async fn complete_sign_in(
        &self,
        session: AuthSession,
        fallback: UserProfile,
    ) -> Result<(), SessionError> {
        let token = session.token.ok_or(SessionError::MissingToken)?;

        self.store().set_auth_token(&token)?;
        self.gateway().set_token(Some(token.clone()));

        let profile = match session.profile {
            Some(profile) => profile,
            None => self.gateway().fetch_profile().await.unwrap_or(fallback),
        };
        self.store().set_user_info(&profile)?;

        {
            let mut data = self.data();
            data.session = Session::Authenticated {
                user: profile.clone(),
                token,
            };
            data.profile = Some(profile.clone());
            data.restored = true;
        }
        info!(email = %profile.email, "signed in");

        self.load_user_data(profile.storage_key()).await
    }

    /// Load the saved snapshot for `user_key` and then try to refresh the
    /// order history from the backend (best-effort).
    ///
    /// A local store failure here signs the user out: a session whose data
    /// cannot be read would silently overwrite it on the next write.
    async fn load_user_data(&self, user_key: &str) -> Result<(), SessionError> {
        let snapshot = match self.store().load_snapshot(user_key) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "failed to load user data, signing out");
                self.sign_out_locally()?;
                return Err(err.into());
            }
        };

        {
            let mut data = self.data();
            data.cart = snapshot.cart;
            data.wishlist = snapshot.wishlist;
            data.orders = snapshot.orders;
            if let Some(profile) = snapshot.profile {
                data.profile = Some(profile);
            }
        }

        match self.gateway().fetch_orders().await {
            Ok(orders) => self.data().orders = orders,
            Err(err) => warn!(error = %err, "order history refresh failed, keeping local copy"),
        }

        self.sync_user_data().await;
        Ok(())
    }

    /// Clear the credential and user data from the gateway, the store, and
    /// memory. Safe to call repeatedly.
    fn sign_out_locally(&self) -> Result<(), StoreError> {
        self.gateway().set_token(None);
        self.store().clear_auth_token()?;
        self.store().clear_user_info()?;

        let mut data = self.data();
        data.session = Session::Anonymous;
        data.clear_user_data();
        Ok(())
    }
}
