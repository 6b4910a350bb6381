pub mod cli;
pub mod download;
pub mod msa;
pub mod utils;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoldprepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Array error: {0}")]
    Array(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, FoldprepError>;
