//! Core types for Aurelia.
//!
//! This module provides the domain vocabulary shared by the client state
//! manager and its tests.

pub mod cart;
pub mod email;
pub mod id;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{CartItem, WishlistItem};
pub use email::{Email, EmailError};
pub use id::*;
pub use order::{Order, PaymentInfo};
pub use product::{Product, ProductDetails, Review};
pub use user::{UserProfile, UserSnapshot};
