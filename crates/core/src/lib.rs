//! Golden Crumb Core - Shared domain library.
//!
//! This crate provides the types and pure logic used across the Golden Crumb
//! components:
//! - `storefront` - JSON API server backed by `SQLite`
//! - `cli` - Command-line client (cart, checkout, migrations)
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. Database encoding for the newtypes is
//! available behind the `sqlite` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for prices, emails, and ids
//! - [`catalog`] - Catalog rows, site settings, and the content snapshot
//! - [`cart`] - Client cart state and the derived rows/totals
//! - [`checkout`] - Checkout validation and order payload building
//! - [`order`] - Order payload schemas shared by client and server
//! - [`contact`] - Contact form validation
//! - [`admin`] - Replace-all request schema for the admin editor

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod contact;
pub mod errors;
pub mod order;
pub mod types;

pub use errors::FieldErrors;
pub use types::*;
