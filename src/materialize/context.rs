use std::path::PathBuf;

use crate::envfile::MergeResult;
use crate::installer::Dependencies;

/// What the env task did to the project's environment document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvOutcome {
    pub path: PathBuf,
    /// `true` when the document did not exist and was written from scratch.
    pub created: bool,
    pub result: MergeResult,
}

/// Value produced by one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutput {
    Function(PathBuf),
    Env(EnvOutcome),
    Dependencies(Dependencies),
}

/// Results of one `materialize` run, one slot per task kind.
///
/// Tasks never touch the context while running; each returns a [`TaskOutput`]
/// and the orchestrator files them into their slot after every task resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskContext {
    pub function: Option<PathBuf>,
    pub env: Option<EnvOutcome>,
    pub dependencies: Option<Dependencies>,
}

impl TaskContext {
    pub(crate) fn record(&mut self, output: TaskOutput) {
        match output {
            TaskOutput::Function(path) => self.function = Some(path),
            TaskOutput::Env(outcome) => self.env = Some(outcome),
            TaskOutput::Dependencies(deps) => self.dependencies = Some(deps),
        }
    }

    /// Environment variables the user still has to configure.
    pub fn new_env_keys(&self) -> &[String] {
        self.env
            .as_ref()
            .map(|env| env.result.new_keys.as_slice())
            .unwrap_or(&[])
    }
}
