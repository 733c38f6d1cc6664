//! Function materialization.
//!
//! ## Module structure
//! - `descriptor` - the requested steps (function code, env document, manifest)
//! - `context` - per-run result slots
//! - `orchestrator` - runs one task per descriptor concurrently

mod context;
mod descriptor;
mod orchestrator;

pub use context::{EnvOutcome, TaskContext, TaskOutput};
pub use descriptor::{DescriptorKind, FileDescriptor};
pub use orchestrator::{Materializer, ProjectLayout};
