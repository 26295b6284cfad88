//! OrbDeck - Terminal launcher and agent tools for OrbStack machines

use clap::Parser;

use orbdeck::cli::Cli;
use orbdeck::logging;
use orbdeck::output::json::{error_code, format_error};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let json = cli.json;
    if let Err(e) = cli.run().await {
        tracing::debug!(error = ?e, "command failed");
        if json {
            match format_error(&format!("{e:#}"), error_code(&e)) {
                Ok(obj) => println!("{obj}"),
                Err(_) => eprintln!("Error: {e:#}"),
            }
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}
