//! Database operations for the contacts `SQLite` file.
//!
//! # Database: `<data_dir>/contacts_updated.db`
//!
//! ## Tables
//!
//! - `contacts` - One row per contact (`id`, `name`, `phone`)
//!
//! # Schema
//!
//! There are no migrations. [`init_database`] creates the data directory and
//! the `contacts` table once at process start; the statement is idempotent,
//! so it is also safe to run from `cb-cli init` against an existing file.

pub mod contacts;

use std::path::Path;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

use crate::config::AppConfig;

pub use contacts::ContactRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors that can occur while preparing the database at startup.
#[derive(Debug, Error)]
pub enum InitError {
    /// The data directory could not be created.
    #[error("failed to create data directory {path}: {source}")]
    DataDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The database file does not exist yet.
    #[error("database not found at {path}; run `cb-cli init` first")]
    Missing { path: String },

    /// Opening the database or creating the schema failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    phone TEXT NOT NULL
)
";

/// Create a `SQLite` connection pool for the database file at `path`.
///
/// The file is created if it does not exist; its parent directory must
/// already exist.
///
/// # Errors
///
/// Returns `sqlx::Error` if the file cannot be opened or created.
pub async fn create_pool(path: &Path, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create the `contacts` table if it does not exist.
///
/// # Errors
///
/// Returns `sqlx::Error` if the statement fails.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(SCHEMA).execute(pool).await?;
    Ok(())
}

/// One-time startup step: data directory, pool, and schema.
///
/// # Errors
///
/// Returns `InitError::DataDir` if the directory cannot be created and
/// `InitError::Database` if the file cannot be opened or the schema fails.
pub async fn init_database(config: &AppConfig) -> Result<SqlitePool, InitError> {
    open_data_dir(&config.data_dir, &config.database_file, config.max_connections).await
}

/// Create `data_dir` if needed, open `database_file` inside it, and ensure
/// the schema exists.
///
/// # Errors
///
/// See [`init_database`].
pub async fn open_data_dir(
    data_dir: &Path,
    database_file: &str,
    max_connections: u32,
) -> Result<SqlitePool, InitError> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|source| InitError::DataDir {
            path: data_dir.display().to_string(),
            source,
        })?;

    let path = data_dir.join(database_file);
    let pool = create_pool(&path, max_connections).await?;
    ensure_schema(&pool).await?;

    tracing::info!(path = %path.display(), "Contacts database ready");
    Ok(pool)
}

/// Open an existing database file read-only.
///
/// Nothing is created: neither the data directory nor the file. Used by
/// commands that only inspect contacts.
///
/// # Errors
///
/// Returns `InitError::Missing` if the file does not exist and
/// `InitError::Database` if it cannot be opened.
pub async fn open_existing(data_dir: &Path, database_file: &str) -> Result<SqlitePool, InitError> {
    let path = data_dir.join(database_file);
    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Err(InitError::Missing {
            path: path.display().to_string(),
        });
    }

    let options = SqliteConnectOptions::new()
        .filename(&path)
        .read_only(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn config_in(dir: &Path) -> AppConfig {
        AppConfig::for_data_dir(dir.join("nested/instance"), SecretString::from("k".repeat(32)))
    }

    #[tokio::test]
    async fn test_init_creates_directory_and_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config = config_in(tmp.path());

        let pool = init_database(&config).await.expect("init");

        assert!(config.data_dir.is_dir());
        assert!(config.database_path().is_file());
        pool.close().await;
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config = config_in(tmp.path());

        let pool = init_database(&config).await.expect("first init");
        sqlx::query("INSERT INTO contacts (name, phone) VALUES ('Ada', '1')")
            .execute(&pool)
            .await
            .expect("insert");
        pool.close().await;

        let pool = init_database(&config).await.expect("second init");
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_init_fails_when_data_dir_is_a_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").expect("write");
        let config = AppConfig::for_data_dir(&blocker, SecretString::from("k".repeat(32)));

        let err = init_database(&config).await.expect_err("must fail");
        assert!(matches!(err, InitError::DataDir { .. }));
    }

    #[tokio::test]
    async fn test_open_existing_creates_nothing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let data_dir = tmp.path().join("instance");

        let err = open_existing(&data_dir, "contacts.db")
            .await
            .expect_err("must fail");
        assert!(matches!(err, InitError::Missing { .. }));
        assert!(!data_dir.exists());
    }

    #[tokio::test]
    async fn test_open_existing_is_read_only() {
        let tmp = tempfile::tempdir().expect("tempdir");
        open_data_dir(tmp.path(), "contacts.db", 1)
            .await
            .expect("init")
            .close()
            .await;

        let pool = open_existing(tmp.path(), "contacts.db").await.expect("open");
        let write = sqlx::query("INSERT INTO contacts (name, phone) VALUES ('Ada', '1')")
            .execute(&pool)
            .await;
        assert!(write.is_err());
    }
}
