//! Dynamic
//!
//! Switches the macOS appearance by running bundled AppleScripts, and
//! negotiates their installation when sandboxed.

pub mod bootstrap;
pub mod cli;

use std::process::ExitCode;

use tracing::{error, info};

use crate::bootstrap::{
    create_runtime, logs_dir, resolve_app_dirs, resolve_config, tracing::init_tracing_subscriber,
    wire_dependencies,
};
use crate::cli::Cli;

/// Load config, install logging, wire services and run one command.
pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = resolve_config(cli.config.as_deref())?;
    let dirs = resolve_app_dirs(&config)?;

    if let Err(err) = init_tracing_subscriber(&logs_dir(&dirs)) {
        eprintln!("Failed to initialize tracing: {err:#}");
    }

    let sandbox = dm_platform::detect_sandbox_mode();
    info!(
        ?sandbox,
        scripts_dir = %dirs.scripts_dir.display(),
        resources_dir = %dirs.resources_dir.display(),
        "starting dynamic"
    );

    let runtime = create_runtime()?;
    runtime.block_on(async move {
        let services = wire_dependencies(&config, dirs, sandbox);
        cli::execute(cli.command, &services).await.inspect_err(|err| {
            error!(error = %err, "command failed");
        })
    })
}
