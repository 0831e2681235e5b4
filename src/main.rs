use clap::Parser;
use courtedge::app::Config;
use courtedge::cli::{self, output, CheckCommand, Cli, Commands};
use courtedge::error::Result;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!(error = %e, "Command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Check(CheckCommand::Config) = &cli.command {
        return cli::check::execute_config(&cli.config);
    }

    let mut config = Config::load(&cli.config)?;
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    config.init_logging();
    info!(config = %cli.config.display(), "courtedge starting");

    match &cli.command {
        Commands::Evaluate(args) => cli::evaluate::execute(&config, args).await,
        Commands::Aggregate(args) => cli::aggregate::execute(&config, args).await,
        Commands::Check(_) => Ok(()),
    }
}
