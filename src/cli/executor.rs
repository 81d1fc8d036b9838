//! Command executor for dispatching CLI commands

use super::handlers::ServeCommandHandler;
use super::parser::Cli;
use crate::config::{Environment, Settings};

/// Execute a CLI command with merged and validated settings
///
/// No subcommand behaves like a plain `serve`.
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    let environment = cli.env.map(Environment::from).unwrap_or_else(Environment::from_env);

    ServeCommandHandler::new(settings, environment)
        .execute(cli.is_dry_run())
        .await
}
