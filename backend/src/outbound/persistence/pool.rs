//! Connection pool for Diesel SQLite connections.

use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;

/// Shared r2d2 pool over SQLite connections.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// A checked-out pooled connection.
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout {
        /// Underlying r2d2 failure detail.
        message: String,
    },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build {
        /// Underlying r2d2 failure detail.
        message: String,
    },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Build a pool over the SQLite database at `database_url`.
///
/// # Errors
///
/// Returns [`PoolError::Build`] when the pool cannot be constructed, for
/// example because the database file is not creatable.
pub fn build_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(8)
        .build(manager)
        .map_err(|error| PoolError::build(error.to_string()))
}

/// Check a connection out of the pool.
///
/// # Errors
///
/// Returns [`PoolError::Checkout`] when the pool is exhausted or the
/// connection cannot be established.
pub fn checkout(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get().map_err(|error| PoolError::checkout(error.to_string()))
}
