//! Server configuration

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the server binary
#[derive(Debug, Parser)]
#[command(name = "sheetstore-server")]
#[command(author, version, about = "Spreadsheet blob store with a REST interface")]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// SQLite database path
    #[arg(long, default_value = "sheetstore.db")]
    pub db: PathBuf,
}
