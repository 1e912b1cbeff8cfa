//! # Iris Catalog
//!
//! Command-line tooling for translators and the build. It reports catalog
//! coverage against a reference locale and converts between `TS` and JSON.
//!
//! The binary is a thin wrapper; every command is a function over a loaded
//! [`iris_config::Config`] that writes to any [`std::io::Write`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

pub use cli::*;
pub use error::*;
