//! Shared application state handed to HTTP handlers.

use std::sync::Arc;

use mapper::{Schema, SchemaError};

use crate::domain::ports::{CompanyRepository, UserRepository};
use crate::domain::{Company, User};
use crate::inbound::http::mapping;

/// Repositories and mapping schemas shared across requests.
///
/// Schemas are immutable once built; all per-request mutable state lives in
/// the individual serialize/marshal calls.
pub struct AppState {
    /// User row store.
    pub users: Arc<dyn UserRepository>,
    /// Company row store.
    pub companies: Arc<dyn CompanyRepository>,
    /// Mapping schema for users.
    pub user_schema: Arc<Schema<User>>,
    /// Mapping schema for companies.
    pub company_schema: Arc<Schema<Company>>,
}

impl AppState {
    /// Wire the schemas against the given repositories.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when a schema declaration is inconsistent;
    /// callers treat this as a startup failure.
    pub fn new(
        users: Arc<dyn UserRepository>,
        companies: Arc<dyn CompanyRepository>,
    ) -> Result<Self, SchemaError> {
        let company_schema = Arc::new(mapping::company_schema()?);
        let user_schema = Arc::new(mapping::user_schema(
            Arc::clone(&companies),
            Arc::clone(&company_schema),
        )?);
        Ok(Self {
            users,
            companies,
            user_schema,
            company_schema,
        })
    }
}
