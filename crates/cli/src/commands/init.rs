//! `cb-cli init` - ensure the data directory and schema exist.
//!
//! Safe to run repeatedly; existing contacts are left untouched.

use std::path::Path;

use contactbook_web::db::{ContactRepository, open_data_dir};

use super::CommandError;

/// Create the data directory and `contacts` table if missing.
///
/// # Errors
///
/// Returns `CommandError::Init` if the directory or database cannot be created.
pub async fn run(data_dir: &Path, database_file: &str) -> Result<(), CommandError> {
    let pool = open_data_dir(data_dir, database_file, 1).await?;
    let count = ContactRepository::new(&pool).count().await?;
    pool.close().await;

    tracing::info!(
        path = %data_dir.join(database_file).display(),
        contacts = count,
        "Database initialized"
    );
    Ok(())
}
