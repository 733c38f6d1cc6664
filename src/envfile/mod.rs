//! Environment document handling.
//!
//! - `document` - lenient, order-preserving parser on top of `dotenvy`
//! - `merge` - combines a project's `.env` with a function's `.env`

mod document;
mod merge;

pub use document::{line_key, EnvDocument};
pub use merge::{initial_env, merge_env, plan_env, separator, MergeResult, DISABLED_PREFIX};
