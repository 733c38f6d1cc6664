use std::path::{Path, PathBuf};

use console::style;
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::error::{FnStampError, Result};
use crate::materialize::{FileDescriptor, Materializer};
use crate::progress::run_text_progress;

/// Where the descriptors for a `new` run come from.
#[derive(Debug, Default)]
pub struct Sources {
    pub function: Option<String>,
    pub env: Option<String>,
    pub manifest: Option<String>,
    pub descriptors: Option<PathBuf>,
}

pub async fn execute(config: &AppConfig, name: String, target_dir: String, sources: Sources) -> Result<()> {
    let target_dir = PathBuf::from(shellexpand::tilde(&target_dir).as_ref());
    let descriptors = collect_descriptors(&name, sources)?;

    let (tx, rx) = mpsc::unbounded_channel();
    let materializer = Materializer::from_config(config)?.with_progress(tx);
    let ui = tokio::spawn(run_text_progress(rx));

    let result = materializer.materialize(&descriptors, &target_dir, &name).await;
    // closes the channel so the progress printer can finish
    drop(materializer);
    if let Err(e) = ui.await {
        tracing::warn!(error = %e, "Progress printer stopped unexpectedly");
    }

    let context = result?;

    if let Some(path) = &context.function {
        println!(
            "{} Created {}",
            style("✓").green().bold(),
            style(path.display()).cyan()
        );
    }

    let new_keys = context.new_env_keys();
    if !new_keys.is_empty() {
        println!(
            "{} Make sure to configure {} in the {} file",
            style("INFO").cyan(),
            new_keys.join(","),
            config.env_file
        );
    }

    Ok(())
}

fn collect_descriptors(name: &str, sources: Sources) -> Result<Vec<FileDescriptor>> {
    let mut descriptors = match &sources.descriptors {
        Some(path) => read_descriptor_file(path)?,
        None => Vec::new(),
    };

    if let Some(content) = sources.function {
        descriptors.push(FileDescriptor::Function { content });
    }
    if let Some(content) = sources.env {
        descriptors.push(FileDescriptor::Env {
            content,
            function_name: name.to_string(),
        });
    }
    if let Some(content) = sources.manifest {
        descriptors.push(FileDescriptor::Manifest { content });
    }

    if descriptors.is_empty() {
        return Err(FnStampError::NoDescriptors);
    }
    Ok(descriptors)
}

fn read_descriptor_file(path: &Path) -> Result<Vec<FileDescriptor>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
