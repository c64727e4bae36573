//! Port abstraction for user persistence adapters and their errors.

use uuid::Uuid;

use crate::domain::User;

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-level failure detail.
        message: String,
    },
}

impl UserPersistenceError {
    /// Connection failure with the given detail.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Query failure with the given detail.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Row store for users, reachable by primary key.
pub trait UserRepository: Send + Sync {
    /// Fetch every user, with any related company loaded.
    fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, UserPersistenceError>;

    /// Persist a new user record.
    fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Persist changes to an existing user record.
    fn update(&self, user: &User) -> Result<(), UserPersistenceError>;
}
