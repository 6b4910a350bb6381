use clap::Parser;
use colored::*;
use std::process;

use foldprep::cli::commands::preparse::{self, PreparseArgs};
use foldprep::FoldprepError;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging with FOLDPREP_LOG environment variable support
    let log_level = std::env::var("FOLDPREP_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();

    let args = PreparseArgs::parse();

    if let Err(e) = preparse::run(args) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<FoldprepError>() {
            Some(FoldprepError::Config(_)) => 2,
            Some(FoldprepError::Io(_)) => 3,
            Some(FoldprepError::Parse(_)) | Some(FoldprepError::Array(_)) => 4,
            Some(FoldprepError::Storage(_)) => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}
