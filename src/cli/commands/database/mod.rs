pub mod download;
pub mod list;

use clap::{Parser, Subcommand};

/// List and download the published alignment sequence databases.
#[derive(Parser)]
#[command(
    name = "download-dbs",
    version,
    about = "List and download reference alignment databases from object storage"
)]
pub struct DatabaseCli {
    #[command(subcommand)]
    pub command: DatabaseCommands,
}

#[derive(Subcommand)]
pub enum DatabaseCommands {
    /// List available database archives in the storage bucket
    List,

    /// Download database archives and unpack them
    Download(download::DownloadArgs),
}

pub fn run(cli: DatabaseCli) -> anyhow::Result<()> {
    match cli.command {
        DatabaseCommands::List => list::run(),
        DatabaseCommands::Download(args) => download::run(args),
    }
}
