use std::process::ExitCode;

use clap::Parser;
use coinprice_bot::cli::Cli;
use coinprice_bot::config::BotConfig;
use coinprice_bot::error::CliError;
use coinprice_bot::{app, logging};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_filter);

    let config = BotConfig::from_cli(&cli)?;
    app::run(&cli.command, &config).await
}
