pub mod commands;
pub mod logging;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use assetdesk_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use assetdesk_core::ApplicationError;
use chrono::Utc;
use clap::{Parser, Subcommand};
use commands::list::ListArgs;
use commands::CommandResult;

#[derive(Debug, Parser)]
#[command(
    name = "assetdesk",
    about = "AssetDesk operator CLI",
    long_about = "Filter, sort and page exported device, approval and directory snapshots the way the admin console does, with urgency and approval-stage labels.",
    after_help = "Examples:\n  assetdesk approvals --input approvals.json --chip 승인대기 --sort deadline\n  assetdesk devices --input devices.json --keyword macbook --page-size 20\n  assetdesk config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Override logging.level for this run")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List approval requests with status class, stage label and urgency")]
    Approvals(ListArgs),
    #[command(about = "List the device ledger; --field all searches the common columns")]
    Devices(ListArgs),
    #[command(about = "List directory (LDAP) users")]
    Users(ListArgs),
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Approvals(_) => "approvals",
            Self::Devices(_) => "devices",
            Self::Users(_) => "users",
            Self::Config => "config",
        }
    }
}

pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let overrides =
        ConfigOverrides { log_level: cli.log_level.clone(), ..ConfigOverrides::default() };
    let result = match load_config(&overrides) {
        Ok(config) => {
            logging::init(&config);
            dispatch(&cli.command, &config, &overrides)
        }
        Err(error) => CommandResult::from_error(cli.command.name(), error),
    };

    writeln!(io::stdout().lock(), "{}", result.output)
        .context("failed to write command output")?;
    Ok(ExitCode::from(result.exit_code))
}

fn load_config(overrides: &ConfigOverrides) -> Result<AppConfig, ApplicationError> {
    let options = LoadOptions { overrides: overrides.clone(), ..LoadOptions::default() };
    AppConfig::load(options).map_err(|error| ApplicationError::Configuration(error.to_string()))
}

fn dispatch(command: &Command, config: &AppConfig, overrides: &ConfigOverrides) -> CommandResult {
    let now = Utc::now().with_timezone(&config.display_offset());
    tracing::debug!(
        event_name = "cli.command.started",
        correlation_id = command.name(),
        utc_offset_secs = now.offset().local_minus_utc(),
        "command started"
    );

    match command {
        Command::Approvals(args) => commands::approvals::run(args, config, now),
        Command::Devices(args) => commands::devices::run(args, config, now),
        Command::Users(args) => commands::users::run(args, config),
        Command::Config => {
            CommandResult::success("config", commands::config::run(config, overrides))
        }
    }
}
