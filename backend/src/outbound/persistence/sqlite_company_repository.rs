//! SQLite-backed `CompanyRepository` implementation using Diesel ORM.

use diesel::prelude::*;
use tracing::debug;
use uuid::Uuid;

use crate::domain::Company;
use crate::domain::ports::{CompanyPersistenceError, CompanyRepository};

use super::models::{CompanyRow, CompanyRowUpdate, NewCompanyRow};
use super::pool::{DbPool, PoolError, checkout};
use super::schema::companies;

/// Diesel-backed implementation of the `CompanyRepository` port.
#[derive(Clone)]
pub struct SqliteCompanyRepository {
    pool: DbPool,
}

impl SqliteCompanyRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CompanyPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CompanyPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> CompanyPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "diesel operation failed");

    match error {
        DieselError::NotFound => CompanyPersistenceError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CompanyPersistenceError::connection("database connection error")
        }
        _ => CompanyPersistenceError::query("database error"),
    }
}

fn row_to_company(row: CompanyRow) -> Result<Company, CompanyPersistenceError> {
    let id = Uuid::parse_str(&row.id).map_err(|_| {
        CompanyPersistenceError::query(format!("invalid company id in store: {}", row.id))
    })?;
    Ok(Company { id, name: row.name })
}

impl CompanyRepository for SqliteCompanyRepository {
    fn list(&self) -> Result<Vec<Company>, CompanyPersistenceError> {
        let mut conn = checkout(&self.pool).map_err(map_pool_error)?;

        let rows: Vec<CompanyRow> = companies::table
            .select(CompanyRow::as_select())
            .order(companies::name.asc())
            .load(&mut conn)
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_company).collect()
    }

    fn find_by_id(&self, id: &Uuid) -> Result<Option<Company>, CompanyPersistenceError> {
        let mut conn = checkout(&self.pool).map_err(map_pool_error)?;

        let row: Option<CompanyRow> = companies::table
            .filter(companies::id.eq(id.to_string()))
            .select(CompanyRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_company).transpose()
    }

    fn insert(&self, company: &Company) -> Result<(), CompanyPersistenceError> {
        let mut conn = checkout(&self.pool).map_err(map_pool_error)?;

        let id = company.id.to_string();
        let new_row = NewCompanyRow {
            id: &id,
            name: &company.name,
        };

        diesel::insert_into(companies::table)
            .values(&new_row)
            .execute(&mut conn)
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    fn update(&self, company: &Company) -> Result<(), CompanyPersistenceError> {
        let mut conn = checkout(&self.pool).map_err(map_pool_error)?;

        let changes = CompanyRowUpdate {
            name: &company.name,
        };

        let updated =
            diesel::update(companies::table.filter(companies::id.eq(company.id.to_string())))
                .set(&changes)
                .execute(&mut conn)
                .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(CompanyPersistenceError::query(
                "company not found for update",
            ));
        }
        Ok(())
    }
}
