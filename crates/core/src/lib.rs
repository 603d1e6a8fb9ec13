//! ArtConnect Core - Shared domain types library.
//!
//! This crate provides the types used across ArtConnect components:
//! - `marketplace` - The JSON HTTP API serving artists and buyers
//! - `integration-tests` - End-to-end tests against the in-process router
//!
//! # Architecture
//!
//! The core crate contains only types and pure state logic - no I/O, no
//! storage access, no HTTP clients. This keeps it lightweight and allows it to
//! be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses
//! - [`cart`] - Session cart state with derived totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartItem, QuantityChange};
pub use types::*;
