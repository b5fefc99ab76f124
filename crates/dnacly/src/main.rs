mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dnacly_core::Controller;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config and logout never talk to the controller
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),
        Command::Logout => commands::logout::handle(&cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "dnacly", &mut std::io::stdout());
            Ok(())
        }

        // Everything else runs inside one controller session
        cmd => {
            let cfg = config::load_config()?;
            let profile_name = config::active_profile_name(&cli.global, &cfg);
            let controller_config =
                config::build_controller_config(&cli.global, &cfg, &profile_name)?;
            let store = config::open_audit_store(&cli.global, &cfg).await?;
            let session = config::open_session(&cli.global, &profile_name);

            let mut controller = Controller::new(
                &controller_config,
                session,
                config::audit_sink(store.as_ref()),
            )?;

            tracing::debug!(command = ?cmd, profile = %profile_name, "dispatching command");
            let result = commands::dispatch(cmd, &mut controller, &cli.global).await;

            // Queued audit documents are written before the process exits
            if let Some(store) = store {
                store.close().await;
            }
            result
        }
    }
}
