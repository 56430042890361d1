//! Contact Book CLI - Database setup and inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the data directory and contacts table
//! cb-cli init
//!
//! # Print every contact
//! cb-cli list
//!
//! # Use a different data directory
//! cb-cli --data-dir /var/lib/contacts init
//! ```
//!
//! # Commands
//!
//! - `init` - Ensure the data directory and schema exist
//! - `list` - Print contacts as tab-separated `id name phone`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use contactbook_web::config::DEFAULT_DATABASE_FILE;

mod commands;

#[derive(Parser)]
#[command(name = "cb-cli")]
#[command(author, version, about = "Contact Book CLI tools")]
struct Cli {
    /// Directory holding the database file
    #[arg(long, env = "CONTACTS_DATA_DIR", default_value = "instance", global = true)]
    data_dir: PathBuf,

    /// Database file name inside the data directory
    #[arg(long, env = "CONTACTS_DATABASE_FILE", default_value = DEFAULT_DATABASE_FILE, global = true)]
    database_file: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and contacts table if missing
    Init,
    /// Print all contacts
    List,
}

#[tokio::main]
async fn main() {
    // Load .env before clap reads env-backed arguments
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Init => commands::init::run(&cli.data_dir, &cli.database_file).await?,
        Commands::List => {
            let stdout = std::io::stdout();
            commands::list::run(&cli.data_dir, &cli.database_file, &mut stdout.lock()).await?;
        }
    }
    Ok(())
}
