//! Config command implementation.
//!
//! Manages CLI configuration settings.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::config::{Config, ConfigKey};
use crate::output::{print_header, print_info, print_output, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: ConfigKey,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: ConfigKey,

    /// Configuration value
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<ConfigKey>,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, config: Config, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(&config, ctx),
        ConfigCommand::Get(get_args) => execute_get(&config, get_args, ctx.format),
        ConfigCommand::Set(set_args) => execute_set(config, set_args, ctx),
        ConfigCommand::List => execute_list(ctx),
        ConfigCommand::Reset(reset_args) => execute_reset(config, reset_args, ctx),
        ConfigCommand::Path => execute_path(),
    }
}

/// Show current configuration.
fn execute_show(config: &Config, ctx: &Context) -> Result<()> {
    match ctx.format {
        OutputFormat::Table | OutputFormat::Csv => {
            let results: Vec<KeyValue> = ConfigKey::all()
                .iter()
                .map(|key| KeyValue::new(key.as_str(), config.get(*key)))
                .collect();
            if ctx.chatty() {
                print_header("Current Configuration");
            }
            print_output(&results, ctx.format)?;
        }
        OutputFormat::Json => {
            let output: BTreeMap<&str, &str> = ConfigKey::all()
                .iter()
                .map(|key| (key.as_str(), config.get(*key)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}={}", key.as_str(), config.get(*key));
            }
        }
    }

    Ok(())
}

/// Get a configuration value.
fn execute_get(config: &Config, args: GetArgs, format: OutputFormat) -> Result<()> {
    let key = args.key;
    let value = config.get(key);

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            println!("{}: {}", key.as_str(), value);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            println!("{value}");
        }
    }

    Ok(())
}

/// Set a configuration value.
fn execute_set(mut config: Config, args: SetArgs, ctx: &Context) -> Result<()> {
    config.set(args.key, &args.value)?;
    config.save()?;

    if !ctx.quiet {
        print_success(&format!("Set {} = {}", args.key.as_str(), args.value));
    }
    Ok(())
}

/// List available configuration keys.
fn execute_list(ctx: &Context) -> Result<()> {
    match ctx.format {
        OutputFormat::Table => {
            let results: Vec<KeyValue> = ConfigKey::all()
                .iter()
                .map(|key| {
                    KeyValue::new(
                        key.as_str(),
                        format!("{} (default: {})", key.description(), key.default_value()),
                    )
                })
                .collect();
            if ctx.chatty() {
                print_header("Available Configuration Keys");
            }
            print_output(&results, ctx.format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::all()
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": key.default_value()
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["key", "description", "default"])?;
            for key in ConfigKey::all() {
                wtr.write_record([key.as_str(), key.description(), key.default_value()])?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}", key.as_str());
            }
        }
    }

    Ok(())
}

/// Reset configuration.
fn execute_reset(mut config: Config, args: ResetArgs, ctx: &Context) -> Result<()> {
    if args.all {
        config.clear();
        config.save()?;
        if !ctx.quiet {
            print_success("Reset all configuration to defaults");
        }
    } else if let Some(key) = args.key {
        config.remove(key);
        config.save()?;
        if !ctx.quiet {
            print_success(&format!(
                "Reset {} to default ({})",
                key.as_str(),
                key.default_value()
            ));
        }
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path() -> Result<()> {
    let path = Config::path()?;
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}
