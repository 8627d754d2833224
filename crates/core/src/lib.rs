//! Local Market Core - Shared types library.
//!
//! This crate provides the types used across all Local Market components:
//! - `configurator` - Step selection, completeness and pricing engine
//! - `client` - REST catalog client that fetches definitions and add-ons
//! - `cli` - Command-line front end for quoting and fetching
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, catalog products, custom-product
//!   definitions, cart line items and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
