//! Materializer - runs the installation tasks for one function.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::mpsc;

use super::context::{EnvOutcome, TaskContext, TaskOutput};
use super::descriptor::FileDescriptor;
use crate::config::AppConfig;
use crate::envfile::{initial_env, merge_env};
use crate::error::{FnStampError, Result};
use crate::fetch::{ContentFetcher, HttpTransport};
use crate::installer::{install_dependencies, Installer, PackageManagerInstaller};
use crate::progress::{ProgressMessage, TaskState};
use crate::probe;
use crate::utils::validate_function_name;

/// Where things live inside a target project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub functions_dir: PathBuf,
    pub source_extension: String,
    pub env_file: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl ProjectLayout {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            functions_dir: PathBuf::from(&config.functions_dir),
            source_extension: config.source_extension.clone(),
            env_file: config.env_file.clone(),
        }
    }

    pub fn function_path(&self, target_dir: &Path, function_name: &str) -> PathBuf {
        target_dir
            .join(&self.functions_dir)
            .join(format!("{}.{}", function_name, self.source_extension))
    }

    pub fn env_path(&self, target_dir: &Path) -> PathBuf {
        target_dir.join(&self.env_file)
    }
}

/// Runs one task per [`FileDescriptor`] against a target project.
pub struct Materializer {
    fetcher: ContentFetcher,
    installer: Arc<dyn Installer>,
    layout: ProjectLayout,
    progress: Option<mpsc::UnboundedSender<ProgressMessage>>,
}

impl Materializer {
    pub fn new(fetcher: ContentFetcher, installer: Arc<dyn Installer>) -> Self {
        Self {
            fetcher,
            installer,
            layout: ProjectLayout::default(),
            progress: None,
        }
    }

    /// Build a materializer with the HTTP transport and package manager
    /// described by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let transport = HttpTransport::with_options(config.http_timeout(), &config.user_agent)?;
        let installer = PackageManagerInstaller::new(config.package_manager);

        Ok(Self::new(ContentFetcher::new(Arc::new(transport)), Arc::new(installer))
            .with_layout(ProjectLayout::from_config(config)))
    }

    pub fn with_layout(mut self, layout: ProjectLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_progress(mut self, tx: mpsc::UnboundedSender<ProgressMessage>) -> Self {
        self.progress = Some(tx);
        self
    }

    /// Materialize `function_name` into `target_dir`.
    ///
    /// Every precondition is checked before any task starts. Tasks then run
    /// concurrently and are all awaited; if any failed, the first failure in
    /// descriptor order is returned and the side effects of the others stay
    /// on disk.
    pub async fn materialize(
        &self,
        descriptors: &[FileDescriptor],
        target_dir: &Path,
        function_name: &str,
    ) -> Result<TaskContext> {
        validate_function_name(function_name)?;

        if !probe::is_writable_dir(target_dir).await {
            return Err(FnStampError::TargetDirectory {
                path: target_dir.to_path_buf(),
                reason: "directory does not exist or is not writable".to_string(),
            });
        }

        let function_path = self.layout.function_path(target_dir, function_name);
        if probe::exists(&function_path).await {
            return Err(FnStampError::DuplicateFunction {
                name: function_name.to_string(),
                path: function_path,
            });
        }

        let mut seen = HashSet::new();
        for descriptor in descriptors {
            if !seen.insert(descriptor.kind()) {
                return Err(FnStampError::DuplicateDescriptor {
                    kind: descriptor.kind().to_string(),
                });
            }
        }

        tracing::info!(
            function = function_name,
            target = %target_dir.display(),
            tasks = descriptors.len(),
            "Materializing function"
        );
        self.report(ProgressMessage::Started(
            descriptors
                .iter()
                .map(|d| d.title(&self.layout.env_file))
                .collect(),
        ));

        let tasks = descriptors
            .iter()
            .enumerate()
            .map(|(idx, descriptor)| self.run_task(idx, descriptor, target_dir, &function_path));
        let outcomes = join_all(tasks).await;

        let mut context = TaskContext::default();
        let mut first_error = None;
        for (descriptor, outcome) in descriptors.iter().zip(outcomes) {
            match outcome {
                Ok(output) => context.record(output),
                Err(e) if first_error.is_none() => first_error = Some(e),
                Err(e) => {
                    tracing::warn!(task = %descriptor.title(&self.layout.env_file), error = %e, "Task failed")
                }
            }
        }

        if let Some(e) = first_error {
            self.report(ProgressMessage::Failed(e.to_string()));
            return Err(e);
        }

        self.report(ProgressMessage::Complete);
        Ok(context)
    }

    async fn run_task(
        &self,
        idx: usize,
        descriptor: &FileDescriptor,
        target_dir: &Path,
        function_path: &Path,
    ) -> Result<TaskOutput> {
        let title = descriptor.title(&self.layout.env_file);
        self.report(ProgressMessage::SetTask(idx, TaskState::Running));
        tracing::debug!(task = %title, url = descriptor.content(), "Task started");

        let result = match descriptor {
            FileDescriptor::Function { content } => self
                .write_function(content, function_path)
                .await
                .map(TaskOutput::Function),
            FileDescriptor::Env {
                content,
                function_name,
            } => self
                .write_env(content, target_dir, function_name)
                .await
                .map(TaskOutput::Env),
            FileDescriptor::Manifest { content } => {
                install_dependencies(&self.fetcher, self.installer.as_ref(), content, target_dir)
                    .await
                    .map(TaskOutput::Dependencies)
            }
        };

        match &result {
            Ok(output) => {
                if let Some(detail) = describe(output) {
                    self.report(ProgressMessage::SetDetail(idx, detail));
                }
                self.report(ProgressMessage::SetTask(idx, TaskState::Succeeded));
                tracing::debug!(task = %title, "Task succeeded");
            }
            Err(e) => {
                self.report(ProgressMessage::SetTask(idx, TaskState::Failed));
                tracing::debug!(task = %title, error = %e, "Task failed");
            }
        }

        result
    }

    async fn write_function(&self, url: &str, function_path: &Path) -> Result<PathBuf> {
        if let Some(parent) = function_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        self.fetcher.fetch_to_file(url, function_path).await?;
        Ok(function_path.to_path_buf())
    }

    async fn write_env(&self, url: &str, target_dir: &Path, function_label: &str) -> Result<EnvOutcome> {
        let env_path = self.layout.env_path(target_dir);

        if !probe::exists(&env_path).await {
            self.fetcher.fetch_to_file(url, &env_path).await?;
            let written = tokio::fs::read_to_string(&env_path).await?;
            return Ok(EnvOutcome {
                path: env_path,
                created: true,
                result: initial_env(&written),
            });
        }

        let current = tokio::fs::read_to_string(&env_path).await?;
        let incoming = self.fetcher.fetch_body(url).await?;
        let result = merge_env(&current, &incoming, function_label);
        tokio::fs::write(&env_path, &result.merged_text).await?;

        if !result.disabled_keys.is_empty() {
            tracing::info!(
                keys = %result.disabled_keys.join(","),
                "Kept existing values for variables already in the environment file"
            );
        }

        Ok(EnvOutcome {
            path: env_path,
            created: false,
            result,
        })
    }

    fn report(&self, message: ProgressMessage) {
        if let Some(tx) = &self.progress {
            // the receiver going away only means nobody is watching
            let _ = tx.send(message);
        }
    }
}

fn describe(output: &TaskOutput) -> Option<String> {
    match output {
        TaskOutput::Function(path) => Some(format!("Wrote {}", path.display())),
        TaskOutput::Env(env) if env.result.new_keys.is_empty() => None,
        TaskOutput::Env(env) => Some(format!("New variables: {}", env.result.new_keys.join(", "))),
        TaskOutput::Dependencies(deps) if deps.is_empty() => None,
        TaskOutput::Dependencies(deps) => Some(format!("{} package(s)", deps.len())),
    }
}
