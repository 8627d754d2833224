//! Subcommand implementations.

pub mod fetch;
pub mod price;
pub mod quote;
