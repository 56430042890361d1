//! CLI command implementations.

pub mod init;
pub mod list;

use thiserror::Error;

use contactbook_web::db::{InitError, RepositoryError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Opening the database failed.
    #[error(transparent)]
    Init(#[from] InitError),

    /// A query failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Writing output failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}
