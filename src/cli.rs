use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};

use dm_app::{ExecutionOutcome, SetupTrigger};
use dm_core::setup::SetupState;
use dm_core::{AppearanceStyle, SandboxMode, ScriptAction};

use crate::bootstrap::AppServices;

#[derive(Debug, Parser)]
#[command(name = "dynamic", version, about = "Switch the macOS appearance between light and dark")]
pub struct Cli {
    /// Configuration file. Defaults to `<config dir>/dynamic/config.toml`.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Flip between light and dark
    Toggle,
    /// Turn dark mode on
    On,
    /// Turn dark mode off
    Off,
    /// Install the scripts, asking for folder access if needed
    Setup,
    /// Show sandbox, setup and appearance state
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct StatusReport {
    sandbox: SandboxMode,
    setup_complete: bool,
    style: AppearanceStyle,
    scripts_dir: PathBuf,
    resources_dir: PathBuf,
}

pub async fn execute(command: Command, services: &AppServices) -> anyhow::Result<ExitCode> {
    let span = info_span!("cli.execute", command = ?command);
    async {
        let code = match command {
            Command::Toggle => switch(services, ScriptAction::Toggle).await?,
            Command::On => switch(services, ScriptAction::Enable).await?,
            Command::Off => switch(services, ScriptAction::Disable).await?,
            Command::Setup => setup(services).await,
            Command::Status { json } => status(services, json).await?,
        };
        // Alerts queued by the commands must be dismissed before exiting.
        services.ui_executor.flush().await;
        Ok(code)
    }
    .instrument(span)
    .await
}

async fn switch(services: &AppServices, action: ScriptAction) -> anyhow::Result<ExitCode> {
    let outcome = match action {
        ScriptAction::Toggle => services.switcher.toggle().await?,
        ScriptAction::Enable => services.switcher.enable().await?,
        ScriptAction::Disable => services.switcher.disable().await?,
    };

    match outcome {
        ExecutionOutcome::Declined => {
            println!("Dark mode scripts are not installed yet.");
            match services.setup.wait_if_running().await {
                Some(state) => report_setup(&state),
                None => eprintln!(
                    "Setup did not start; scripts found in {}",
                    services.dirs.scripts_dir.display()
                ),
            }
            println!("Run `dynamic {action}` again once setup completed.");
            Ok(ExitCode::FAILURE)
        }
        ExecutionOutcome::Submitted(handle) => match handle.await {
            Ok(Ok(())) => Ok(ExitCode::SUCCESS),
            Ok(Err(err)) => {
                eprintln!("{action} failed: {err}");
                Ok(ExitCode::FAILURE)
            }
            Err(err) => {
                warn!(error = %err, "script task did not finish");
                Ok(ExitCode::FAILURE)
            }
        },
        ExecutionOutcome::Completed => Ok(ExitCode::SUCCESS),
        ExecutionOutcome::Failed(err) => {
            eprintln!("{action} failed: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn setup(services: &AppServices) -> ExitCode {
    match services.setup.setup_if_needed().await {
        SetupTrigger::NotNeeded => {
            println!("Not sandboxed; scripts run from {}", services.dirs.resources_dir.display());
            ExitCode::SUCCESS
        }
        SetupTrigger::AlreadyDone => {
            println!("Scripts already installed in {}", services.dirs.scripts_dir.display());
            ExitCode::SUCCESS
        }
        SetupTrigger::InProgress => {
            println!("Setup is already running.");
            ExitCode::SUCCESS
        }
        SetupTrigger::Started => {
            info!("waiting for the user to grant folder access");
            let state = services.setup.wait_until_settled().await;
            report_setup(&state);
            if state == SetupState::Completed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn status(services: &AppServices, json: bool) -> anyhow::Result<ExitCode> {
    let report = StatusReport {
        sandbox: services.sandbox,
        setup_complete: services.setup_status.get_status().await?.did_setup_apple_script,
        style: services.switcher.current_style().await?,
        scripts_dir: services.dirs.scripts_dir.clone(),
        resources_dir: services.dirs.resources_dir.clone(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("sandbox:        {:?}", report.sandbox);
        println!("setup complete: {}", report.setup_complete);
        println!("style:          {:?}", report.style);
        println!("scripts dir:    {}", report.scripts_dir.display());
        println!("resources dir:  {}", report.resources_dir.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn report_setup(state: &SetupState) {
    match state {
        SetupState::Completed => println!("Setup completed."),
        SetupState::Failed { error } => eprintln!("Setup failed: {error}"),
        SetupState::Abandoned { error } => eprintln!("Setup abandoned: {error}"),
        other => eprintln!("Setup stopped in state {other:?}"),
    }
}
