pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::error::Result;

#[derive(Parser)]
#[command(name = "fnstamp")]
#[command(version)]
#[command(about = "Materialize function templates into a project")]
#[command(long_about = "Fetch a function's source, merge its environment variables into the project's .env\nand install its dependencies, all in one go.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new function to a project
    New {
        /// Name of the function to create
        name: String,

        /// Project directory (must already exist)
        #[arg(short, long, default_value = ".")]
        target_dir: String,

        /// URL of the function source
        #[arg(long)]
        function: Option<String>,

        /// URL of the function's .env template
        #[arg(long)]
        env: Option<String>,

        /// URL of the function's package.json
        #[arg(long)]
        manifest: Option<String>,

        /// JSON file with a list of file descriptors
        #[arg(long)]
        descriptors: Option<PathBuf>,
    },

    /// Merge two local .env files and print the result
    MergeEnv {
        /// The project's current .env file
        current: PathBuf,

        /// The .env file to merge in
        incoming: PathBuf,

        /// Label used in the separator comment
        #[arg(short, long, default_value = "local")]
        label: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::New {
                name,
                target_dir,
                function,
                env,
                manifest,
                descriptors,
            } => {
                let config = AppConfig::load()?;
                let sources = commands::new::Sources {
                    function,
                    env,
                    manifest,
                    descriptors,
                };
                commands::new::execute(&config, name, target_dir, sources).await
            }
            Commands::MergeEnv {
                current,
                incoming,
                label,
            } => commands::merge_env::execute(current, incoming, label).await,
            Commands::Config { command } => match command {
                ConfigCommands::Show => commands::config::show().await,
                ConfigCommands::Set { key, value } => commands::config::set(key, value).await,
            },
        }
    }
}
