// file: src/main.rs
// version: 2.0.0
// guid: h8i9j0k1-l2m3-4567-8901-234567hijklm

//! katello-filter - Main entry point

use clap::Parser;
use colored::Colorize;
use katello_filter::{
    api::HttpApi,
    cli::{run_command, Cli},
    config::loader::{ConfigLoader, ConfigOverrides},
    logging::logger,
    Result,
};
use tokio::signal;
use tracing::{debug, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_logger(cli.verbose, cli.quiet) {
        eprintln!("{}", e);
    }

    // Run command with signal handling
    let code = tokio::select! {
        result = run(cli) => match result {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                e.exit_code()
            }
        },
        _ = signal::ctrl_c() => {
            warn!("Interrupted by user");
            130 // Standard exit code for Ctrl+C
        }
    };

    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<()> {
    let overrides = ConfigOverrides {
        server: cli.server.clone(),
        username: cli.username.clone(),
        password: cli.password.clone(),
    };
    let config = ConfigLoader::new().load(cli.config.as_deref(), &overrides)?;
    debug!("Using server {}", config.server.url);

    let api = HttpApi::new(&config.server)?;
    let mut stdout = std::io::stdout().lock();
    run_command(&api, &mut stdout, cli.command, cli.json).await
}
