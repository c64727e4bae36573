//! Port abstraction for company persistence adapters and their errors.

use uuid::Uuid;

use crate::domain::Company;

/// Persistence errors raised by company repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompanyPersistenceError {
    /// Repository connection could not be established.
    #[error("company repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("company repository query failed: {message}")]
    Query {
        /// Adapter-level failure detail.
        message: String,
    },
}

impl CompanyPersistenceError {
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

/// Row store for companies, reachable by primary key.
pub trait CompanyRepository: Send + Sync {
    /// Fetch every company.
    fn list(&self) -> Result<Vec<Company>, CompanyPersistenceError>;

    /// Fetch a company by identifier.
    fn find_by_id(&self, id: &Uuid) -> Result<Option<Company>, CompanyPersistenceError>;

    /// Persist a new company record.
    fn insert(&self, company: &Company) -> Result<(), CompanyPersistenceError>;

    /// Persist changes to an existing company record.
    fn update(&self, company: &Company) -> Result<(), CompanyPersistenceError>;
}
