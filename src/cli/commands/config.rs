use std::path::Path;

use console::style;

use crate::config::AppConfig;
use crate::error::{FnStampError, Result};
use crate::installer::PackageManagerPreference;

pub async fn show() -> Result<()> {
    let config_path = AppConfig::config_path()?;
    let config = AppConfig::load()?;

    println!("{}", style("Current Configuration").bold().cyan());
    println!();
    println!("  Functions dir:   {}", style(&config.functions_dir).white());
    println!("  Extension:       {}", style(&config.source_extension).white());
    println!("  Env file:        {}", style(&config.env_file).white());
    println!("  Package manager: {}", style(config.package_manager.as_str()).white());
    println!("  HTTP timeout:    {}", style(format!("{}s", config.http_timeout_secs)).yellow());
    println!("  User agent:      {}", style(&config.user_agent).dim());
    println!();
    if config_path.exists() {
        println!("Config file: {}", style(config_path.display()).dim());
    } else {
        println!("{}", style("No config file found, showing defaults.").dim());
    }

    Ok(())
}

pub async fn set(key: String, value: String) -> Result<()> {
    set_at(&AppConfig::config_path()?, &key, &value)
}

fn set_at(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = AppConfig::load_from(path)?;

    match key {
        "functions_dir" | "functions-dir" => config.functions_dir = value.to_string(),
        "source_extension" | "extension" => config.source_extension = value.to_string(),
        "env_file" | "env-file" => config.env_file = value.to_string(),
        "package_manager" | "package-manager" => {
            config.package_manager = value.parse::<PackageManagerPreference>().map_err(|_| {
                FnStampError::Config(format!(
                    "Unknown package manager '{}'. Use auto, npm, yarn or pnpm",
                    value
                ))
            })?;
        }
        "http_timeout" | "http-timeout" => {
            config.http_timeout_secs = value.trim().parse().map_err(|_| {
                FnStampError::Config(format!(
                    "Invalid http_timeout '{}'. Use a number of seconds",
                    value
                ))
            })?;
        }
        "user_agent" | "user-agent" => config.user_agent = value.to_string(),
        _ => {
            println!(
                "{} Unknown config key: {}",
                style("!").yellow().bold(),
                style(key).red()
            );
            println!("\nAvailable keys:");
            println!("  functions_dir, source_extension, env_file,");
            println!("  package_manager, http_timeout, user_agent");
            return Ok(());
        }
    }

    config.validate()?;
    config.save_to(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green().bold(),
        style(key).cyan(),
        style(value).white()
    );

    Ok(())
}
