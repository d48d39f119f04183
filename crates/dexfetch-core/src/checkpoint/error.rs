//! Storage error type. Any of these terminates a run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("read table {}: {source}", .path.display())]
    Decode { path: PathBuf, source: csv::Error },
    #[error("write table {}: {source}", .path.display())]
    Encode { path: PathBuf, source: csv::Error },
    #[error("flush {}: {source}", .path.display())]
    Flush {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("rename into {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}
