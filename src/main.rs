use clap::Parser;
use dotenvy::dotenv;
use payday_planner::{
    cli::{Cli, Commands, run_command},
    config::{database, settings},
    errors::Result,
};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Initialize tracing; RUST_LOG wins over -v
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(cli.verbose >= 2)
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    debug!("Started with verbosity level: {}", cli.verbose);

    // 3. Load the budget configuration
    let config = settings::load_config_or_default(&cli.config)
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Open the store
    let database_url = database::get_database_url();
    let db = database::create_connection(&database_url)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Run the command
    let command = cli.command.unwrap_or(Commands::Plan { today: None });
    let output = run_command(command, &db, &config)
        .await
        .inspect_err(|e| error!("Command failed: {}", e))?;
    print!("{output}");

    Ok(())
}
