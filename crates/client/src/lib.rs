//! Aurelia client state manager.
//!
//! This crate owns the browser-side state of the Aurelia jewelry storefront:
//! the authenticated session, the shopping cart and wishlist, order
//! placement, and the local-first persistence that keeps all of it durable
//! when the backend is unreachable.
//!
//! # Architecture
//!
//! - [`gateway`] - authenticated HTTP calls to the backend, each with a
//!   defined offline fallback
//! - [`store`] - durable JSON key-value storage (token, profile, per-user
//!   snapshots, offline order log)
//! - [`state`] - the [`state::AppState`] handle that single-writes session,
//!   cart, wishlist, and order history
//! - [`session`], [`cart`], [`checkout`], [`sync`] - the operations grouped
//!   by concern, all implemented on `AppState`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod config;
pub mod gateway;
pub mod session;
pub mod state;
pub mod store;
pub mod sync;

pub use checkout::OrderError;
pub use config::{ClientConfig, ConfigError};
pub use gateway::{ApiError, ApiGateway, AuthSession, PaymentResult, SocialUser};
pub use session::SessionError;
pub use state::{AppState, Session};
pub use store::{LocalStore, StoreError};
