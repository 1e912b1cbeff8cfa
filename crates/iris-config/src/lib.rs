//! # Iris Config
//!
//! Type-safe configuration for the Iris Wallet message catalogs.
//!
//! This crate provides configuration loading from TOML, YAML or JSON,
//! environment overrides, validation, and atomic persistence.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use error::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
