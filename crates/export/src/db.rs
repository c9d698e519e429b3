//! Database connection management.

use exn::ResultExt;
use sqlx::AnyPool;
use sqlx::any::{AnyPoolOptions, install_default_drivers};
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// A single connection is held for the whole export run; pages are resolved
/// one after another, never concurrently.
const MAX_CONNECTIONS: u32 = 1;
const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Connection to the wiki database.
///
/// Backed by the `Any` driver so the same queries run against MySQL/MariaDB
/// in production and SQLite in tests. The database is only ever read.
#[derive(Debug, Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    /// Connect using a `sqlx` connection URL (`mysql://…`, `sqlite:…`).
    ///
    /// The connection is established eagerly, so an unreachable server or bad
    /// credentials are reported here rather than on the first query.
    #[instrument(skip_all)]
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        // Idempotent; guarded by a `Once` inside sqlx.
        install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .min_connections(MAX_CONNECTIONS)
            // Never recycle the connection mid-run. For in-memory databases
            // dropping it would also drop every table.
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(url.as_ref())
            .await
            .or_raise(|| ErrorKind::Connection)?;
        Ok(Self { pool })
    }

    /// Connect to an empty in-memory SQLite database.
    ///
    /// Public rather than `#[cfg(test)]` so that crates embedding the
    /// exporter can build their own fixtures on it.
    pub async fn connect_in_memory() -> Result<Self> {
        Self::connect(IN_MEMORY_URL).await
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Close the connection.
    ///
    /// Safe to call more than once.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
