//! Aurelia Core - Shared domain types.
//!
//! This crate provides the common types used across all Aurelia components:
//! - `client` - Session, cart, and order state manager with offline support
//! - `integration-tests` - End-to-end tests against a mock backend
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Products, cart lines, orders, profiles, and snapshots

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
