//! Core types for Local Market.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod custom_product;
pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use cart::{AddonLine, CartLineItem, LineComponent, LineProduct, VariationRef};
pub use custom_product::{
    CustomProductDefinition, DefinitionError, LoadError, StepDefinition, StepItem,
};
pub use id::*;
pub use price::{CurrencyCode, MINOR_UNIT_DIGITS, Price, round_minor_unit};
pub use product::{AddonOffer, DEFAULT_MAX_CART_QUANTITY, Priced, Product, Variation};
pub use status::*;
