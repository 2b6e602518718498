// Shift Desk - CLI entry point

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use shift_desk::commands;
use shift_desk::services::today_window;
use shift_desk::utils::logging::{init_logging, LogHandle, DEFAULT_LOG_FILTER};
use shift_desk::{AppConfig, AppState, CommandResponse, ConfigService, SettingsUpdate};

#[derive(Parser)]
#[command(name = "shift-desk", version)]
#[command(about = "Submit shift-change requests and view the on-call schedule")]
struct Cli {
    /// Config file to use instead of ~/.shift-desk/config.json
    #[arg(long, global = true, env = "SHIFT_DESK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a request; approved changes are committed
    Submit {
        /// The request, e.g. "switch my Friday shift with Bob"
        text: String,

        /// Let the service classify the text instead of treating it as a change request
        #[arg(long)]
        freeform: bool,

        /// Show what an approval would do without committing anything
        #[arg(long)]
        preview: bool,

        /// Any date in the week to display (YYYY-MM-DD, default today)
        #[arg(long, value_parser = parse_date)]
        date: Option<String>,
    },
    /// Print the joined schedule for a week
    Show {
        /// Any date in the week to display (YYYY-MM-DD, default today)
        #[arg(long, value_parser = parse_date)]
        date: Option<String>,
    },
    /// Print the effective configuration, optionally updating it first
    Config {
        #[arg(long)]
        api_url: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        #[arg(long, conflicts_with = "no_proxy")]
        proxy: Option<String>,

        /// Remove the configured proxy
        #[arg(long)]
        no_proxy: bool,

        #[arg(long)]
        log_filter: Option<String>,

        /// Restore defaults
        #[arg(long, conflicts_with_all = ["api_url", "timeout", "proxy", "no_proxy", "log_filter"])]
        reset: bool,
    },
}

fn parse_date(value: &str) -> Result<String, String> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn print_response<T: Serialize>(response: &CommandResponse<T>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn open_config(path: Option<&Path>) -> anyhow::Result<ConfigService> {
    let service = match path {
        Some(path) => ConfigService::open(path),
        None => ConfigService::new(),
    }
    .context("failed to load configuration")?;
    Ok(service)
}

/// The validated configuration used to reach the scheduling service.
fn load_run_config(path: Option<&Path>, logging: &LogHandle) -> anyhow::Result<AppConfig> {
    let service = open_config(path)?;
    let config = service.effective_config()?;
    logging.set_filter(&config.log_filter)?;
    tracing::debug!("[Main] Using config at {}", service.path().display());
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let logging = init_logging(DEFAULT_LOG_FILTER)?;

    match cli.command {
        Command::Config {
            api_url,
            timeout,
            proxy,
            no_proxy,
            log_filter,
            reset,
        } => {
            // A stored config that fails validation must still be repairable here.
            let mut config_service = match cli.config.as_deref() {
                Some(path) => ConfigService::open_unvalidated(path),
                None => ConfigService::new_unvalidated(),
            }
            .context("failed to load configuration")?;
            if let Err(e) = logging.set_filter(&config_service.get_config().log_filter) {
                tracing::warn!("[Main] Keeping default log filter: {}", e);
            }

            let update = SettingsUpdate {
                api_base_url: api_url,
                request_timeout_secs: timeout,
                proxy_url: if no_proxy { Some(None) } else { proxy.map(Some) },
                log_filter,
            };
            let response = if reset {
                commands::reset_settings(&mut config_service)
            } else if update.is_empty() {
                commands::get_settings(&config_service)
            } else {
                commands::update_settings(&mut config_service, update)
            };
            print_response(&response)?;
            Ok(exit_code(response.success))
        }
        Command::Show { date } => {
            let config = load_run_config(cli.config.as_deref(), &logging)?;
            let state = AppState::from_config(config)?;
            let window = date.unwrap_or_else(today_window);
            let response = commands::show_schedule(&state, &window).await;
            print_response(&response)?;
            Ok(exit_code(response.success))
        }
        Command::Submit {
            text,
            freeform,
            preview,
            date,
        } => {
            let config = load_run_config(cli.config.as_deref(), &logging)?;
            let state = AppState::from_config(config)?;
            let window = date.unwrap_or_else(today_window);
            if preview {
                let response = commands::preview_request(&state, &text, freeform, &window).await;
                print_response(&response)?;
                let failed = response.data.as_ref().is_some_and(|o| o.is_failed());
                Ok(exit_code(response.success && !failed))
            } else {
                let response = commands::submit_request(&state, &text, freeform, &window).await;
                print_response(&response)?;
                let failed = response.data.as_ref().is_some_and(|o| o.is_failed());
                Ok(exit_code(response.success && !failed))
            }
        }
    }
}
