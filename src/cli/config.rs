//
//  tonicpow
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Reads and writes the `[client]` table of `config.toml`. Values set here
//! are overridden by `TONICPOW_API_KEY`, `TONICPOW_ENVIRONMENT` and the
//! global flags.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, CONFIG_KEYS};

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Show all configuration values
    #[command(visible_aliases = ["list", "ls"])]
    Show,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Show => self.show(global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        if !CONFIG_KEYS.contains(&args.key.as_str()) {
            bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                args.key,
                CONFIG_KEYS.join(", ")
            );
        }

        let config = Config::load()?;
        let value = config.get(&args.key);

        if global.json {
            let result = serde_json::json!({
                "key": args.key,
                "value": value,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if let Some(v) = value {
            println!("{}", v);
        }

        Ok(())
    }

    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        let mut config = Config::load()?;
        config.set(&args.key, &args.value)?;
        config.save()?;

        let shown = display_value(&args.key, &args.value);
        if global.json {
            let result = serde_json::json!({
                "success": true,
                "key": args.key,
                "value": shown,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{} Set {} = {}",
                style("✓").green(),
                style(&args.key).cyan(),
                shown
            );
        }

        Ok(())
    }

    fn show(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;

        if global.json {
            let values: serde_json::Map<String, serde_json::Value> = CONFIG_KEYS
                .iter()
                .map(|key| {
                    let value = config
                        .get(key)
                        .map(|v| serde_json::Value::String(display_value(key, &v)))
                        .unwrap_or(serde_json::Value::Null);
                    (key.to_string(), value)
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&values)?);
            return Ok(());
        }

        println!();
        println!("{}", style("Client Configuration").bold());
        println!("{}", "-".repeat(50));
        for key in CONFIG_KEYS {
            match config.get(key) {
                Some(value) => println!("  {}: {}", style(key).cyan(), display_value(key, &value)),
                None => println!("  {}: {}", style(key).cyan(), style("(not set)").dim()),
            }
        }
        println!();

        Ok(())
    }

    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let path = Config::config_path()?;

        if global.json {
            let result = serde_json::json!({
                "path": path.display().to_string(),
                "exists": path.exists(),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", path.display());
        }

        Ok(())
    }
}

/// Masks all but the first four characters of the API key.
fn display_value(key: &str, value: &str) -> String {
    if key != "api_key" {
        return value.to_string();
    }
    let visible: String = value.chars().take(4).collect();
    if value.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
