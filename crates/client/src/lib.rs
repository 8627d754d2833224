//! Local Market catalog client.
//!
//! Fetches catalog products, add-on offers and custom-product definitions
//! from the catalog API. Definitions are validated on arrival so sessions
//! only ever see well-formed input.
//!
//! # Example
//!
//! ```rust,ignore
//! use local_market_client::{CatalogClient, ClientConfig};
//! use local_market_core::CustomProductId;
//!
//! let config = ClientConfig::from_env()?;
//! let client = CatalogClient::new(&config)?;
//! let definition = client.custom_product(CustomProductId::new(12)).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod cache;
mod catalog;
pub mod config;
mod error;

pub use cache::CacheKey;
pub use catalog::CatalogClient;
pub use config::{ClientConfig, ConfigError};
pub use error::CatalogError;
