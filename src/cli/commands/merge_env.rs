use std::path::PathBuf;

use console::style;

use crate::envfile::plan_env;
use crate::error::Result;

/// Print the merge of two local environment files. Nothing is written.
pub async fn execute(current: PathBuf, incoming: PathBuf, label: String) -> Result<()> {
    let current_text = match tokio::fs::read_to_string(&current).await {
        Ok(text) => Some(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(e.into()),
    };
    let incoming_text = tokio::fs::read_to_string(&incoming).await?;

    let result = plan_env(current_text.as_deref(), &incoming_text, &label);

    print!("{}", result.merged_text);
    if !result.new_keys.is_empty() {
        eprintln!(
            "{} New variables: {}",
            style("INFO").cyan(),
            result.new_keys.join(",")
        );
    }
    if !result.disabled_keys.is_empty() {
        eprintln!(
            "{} Already set, kept existing: {}",
            style("INFO").cyan(),
            result.disabled_keys.join(",")
        );
    }

    Ok(())
}
