//! Task progress reporting.
//!
//! The orchestrator publishes [`ProgressMessage`]s on a channel; the CLI turns
//! them into terminal lines with [`run_text_progress`].

use tokio::sync::mpsc;

/// Lifecycle of a single task. There is no retry state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl TaskState {
    pub fn symbol(&self) -> &'static str {
        match self {
            TaskState::Pending => "○",
            TaskState::Running => "→",
            TaskState::Succeeded => "✓",
            TaskState::Failed => "✕",
        }
    }
}

/// Messages to update the progress output
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    /// Announce the task titles, in descriptor order
    Started(Vec<String>),
    /// Update task state
    SetTask(usize, TaskState),
    /// Extra information about a task
    SetDetail(usize, String),
    /// Every task succeeded
    Complete,
    /// At least one task failed
    Failed(String),
}

/// Print progress messages as plain text until the sender side is dropped.
pub async fn run_text_progress(mut rx: mpsc::UnboundedReceiver<ProgressMessage>) {
    use console::style;

    let mut titles: Vec<String> = Vec::new();

    while let Some(message) = rx.recv().await {
        match message {
            ProgressMessage::Started(names) => {
                println!();
                for name in &names {
                    println!("  {} {}", style(TaskState::Pending.symbol()).dim(), style(name).dim());
                }
                titles = names;
            }
            ProgressMessage::SetTask(idx, state) => {
                let Some(title) = titles.get(idx) else {
                    continue;
                };
                match state {
                    TaskState::Running => {
                        println!("  {} {}", style(state.symbol()).cyan(), style(title).white())
                    }
                    TaskState::Succeeded => {
                        println!("  {} {}", style(state.symbol()).green(), style(title).dim())
                    }
                    TaskState::Failed => {
                        println!("  {} {}", style(state.symbol()).red(), style(title).red())
                    }
                    TaskState::Pending => {}
                }
            }
            ProgressMessage::SetDetail(_, detail) => {
                if !detail.is_empty() {
                    println!("    {}", style(&detail).dim().italic());
                }
            }
            ProgressMessage::Complete => {}
            ProgressMessage::Failed(msg) => {
                println!();
                println!("  {} {}", style("✕").red().bold(), style(&msg).red());
            }
        }
    }

    println!();
}
