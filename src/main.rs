use clap::Parser;

use reservo::cli::{self, Cli, Commands};
use reservo::config::Environment;
use reservo::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The --env flag must land before the configuration loader reads it.
    if let Some(env) = &cli.env {
        let env: Environment = (*env).into();
        unsafe {
            std::env::set_var(Environment::ENV_VAR, env.as_str());
        }
    }

    let settings = cli::resolve_settings(&cli)?;

    reservo::logging::init(&settings.logger)?;

    cli::dispatch(&cli, settings.clone()).await?;

    // Migrations and dry runs complete inside dispatch; everything
    // else falls through to serving.
    if should_serve(&cli) {
        server::start(settings).await?;
    }

    Ok(())
}

fn should_serve(cli: &Cli) -> bool {
    match &cli.command {
        None => true,
        Some(Commands::Serve { dry_run, .. }) => !*dry_run,
        Some(Commands::Migrate { .. }) => false,
    }
}
