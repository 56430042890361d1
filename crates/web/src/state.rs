//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::middleware::FlashSigner;

/// Application state shared across all handlers.
///
/// Built once at startup from an explicit [`AppConfig`] and handed to the
/// router. Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: SqlitePool,
    flash: FlashSigner,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration (supplies the flash signing secret)
    /// * `pool` - `SQLite` connection pool with the schema already in place
    #[must_use]
    pub fn new(config: AppConfig, pool: SqlitePool) -> Self {
        let flash = FlashSigner::new(&config.session_secret, config.is_secure());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                flash,
            }),
        }
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the flash cookie signer.
    #[must_use]
    pub fn flash(&self) -> &FlashSigner {
        &self.inner.flash
    }
}
