use std::{io, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use portfolio_tracker::{
    app::{App, Portfolio},
    cli::{self, Cli, Command},
    config::Settings,
    db::SqliteHoldingStore,
};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    let settings = Settings::from_env().with_database(args.database.clone());

    // Logging would draw over the terminal UI.
    if !matches!(args.command, Command::Tui) {
        init_tracing(&settings, args.verbose);
    }

    match run(args, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(cli::exit_code(&err) as u8)
        }
    }
}

fn init_tracing(settings: &Settings, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run(args: Cli, settings: &Settings) -> Result<()> {
    let database = settings.database_path();
    debug!(database = %database, "connecting");

    let store = SqliteHoldingStore::connect(&database).await?;
    let portfolio = Portfolio::new(store);

    match args.command {
        Command::Tui => {
            let mut app = App::load(portfolio).await?;
            app.run().await
        }
        command => {
            let mut stdout = io::stdout().lock();
            cli::execute(&portfolio, command, args.json, &mut stdout).await
        }
    }
}
