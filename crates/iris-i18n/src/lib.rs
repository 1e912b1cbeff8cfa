//! # Iris I18n
//!
//! Message catalog loading and lookup for Iris Wallet.
//!
//! Catalogs are read from Qt Linguist `TS` files or JSON maps, resolved by
//! locale with `en_IN` → `en` fallback, and served through an
//! [`I18nManager`] that can switch locale atomically while other threads
//! keep reading.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod codec;
pub mod coverage;
pub mod error;
pub mod format;
pub mod locale;
pub mod manager;
pub mod resource;

pub use catalog::{Catalog, CatalogBuilder, Context, MessageEntry};
pub use codec::ParseOptions;
pub use coverage::*;
pub use error::*;
pub use format::{arity, placeholders};
pub use locale::*;
pub use manager::*;
pub use resource::*;
