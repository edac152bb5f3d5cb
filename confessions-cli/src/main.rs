//! Confessions CLI
//!
//! Command-line interface for the Confessions API.

use std::io::Read;

use anyhow::Result;
use clap::{Parser, Subcommand};

use confessions_client::ConfessionsClient;

#[derive(Parser)]
#[command(name = "confessions")]
#[command(author, version, about = "Confessions API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Confessions API
    #[arg(
        long,
        env = "CONFESSIONS_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a confession
    Confess {
        /// Confession text; use `-` to read it from stdin
        text: String,
    },
    /// Show which store credentials the server has configured
    CheckEnv,
    /// Check API health
    Health,
}

fn read_text(arg: String) -> Result<String> {
    if arg == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(arg)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = ConfessionsClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Confess { text } => {
            let text = read_text(text)?;
            let response = client.confess(&text).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::CheckEnv => {
            let report = client.check_env().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_confess() {
        let cli = Cli::try_parse_from(["confessions", "--api-url", "http://x:1", "confess", "hi"])
            .unwrap();
        assert_eq!(cli.api_url, "http://x:1");
        assert!(matches!(cli.command, Commands::Confess { text } if text == "hi"));
    }
}
