//! Materialize function templates into a project directory.
//!
//! A run takes a list of [`materialize::FileDescriptor`]s and, concurrently:
//! downloads the function source into `functions/`, merges the function's
//! environment variables into the project's `.env` without overwriting
//! existing values, and installs the function's dependencies.

pub mod cli;
pub mod config;
pub mod envfile;
pub mod error;
pub mod fetch;
pub mod installer;
pub mod materialize;
pub mod probe;
pub mod progress;
pub mod utils;

pub use error::{FnStampError, Result};
