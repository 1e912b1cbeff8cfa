//! # Iris Common
//!
//! Shared types, utilities, and common functionality for the Iris Wallet
//! message catalog crates.
//!
//! This crate provides the foundational types used by the configuration
//! layer, the catalog loader, and the tooling binary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use types::*;
pub use utils::*;
