use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process;

mod commands;

/// Exit codes: 0 = OK, 2 = input error, 4 = auth (401/403), 5 = remote
/// rejection (502), 1 = other.
const EXIT_OTHER: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_AUTH: i32 = 4;
const EXIT_REMOTE: i32 = 5;

#[derive(Parser)]
#[command(name = "carx", version, about = "CAR API client: pack, upload, normalize CIDs")]
struct Cli {
    /// CAR API server URL
    #[arg(long, env = "CAR_API_URL", default_value = "http://localhost:8080")]
    gate: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the server is alive
    Health,
    /// Pack the players directory into the CAR archive
    Generate,
    /// Upload the packed archive to remote storage
    Upload {
        /// Storage API token, forwarded verbatim
        #[arg(long, env = "NFT_STORAGE_API_KEY", hide_env_values = true)]
        token: String,
    },
    /// Normalize base58 CIDs through the server
    Cid {
        /// One or more base58 (CIDv0) identifiers
        #[arg(required = true)]
        base58: Vec<String>,
    },
    /// Normalize base58 CIDs locally, without a server
    Normalize {
        #[arg(required = true)]
        base58: Vec<String>,
    },
}

fn exit_code_for(err: &str) -> i32 {
    if err.contains("HTTP 401") || err.contains("HTTP 403") {
        EXIT_AUTH
    } else if err.contains("HTTP 502") {
        EXIT_REMOTE
    } else if err.contains("HTTP 400") || err.contains("invalid ") || err.contains("parse ") {
        EXIT_INPUT
    } else {
        EXIT_OTHER
    }
}

fn main() {
    let cli = Cli::parse();
    let client = commands::Client::new(&cli.gate);

    let result = match cli.command {
        Commands::Health => commands::health(&client),
        Commands::Generate => commands::generate(&client),
        Commands::Upload { token } => commands::upload(&client, &token),
        Commands::Cid { base58 } => commands::cid(&client, &base58),
        Commands::Normalize { base58 } => commands::normalize(&base58),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(exit_code_for(&e));
    }
}
