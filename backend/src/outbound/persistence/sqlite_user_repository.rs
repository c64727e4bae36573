//! SQLite-backed `UserRepository` implementation using Diesel ORM.
//!
//! Loads users with their related company through a left join; writes commit
//! per statement, which is the "commit persists" contract the ports expose.

use diesel::prelude::*;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Company, User};

use super::models::{CompanyRow, NewUserRow, UserRow, UserRowUpdate};
use super::pool::{DbPool, PoolError, checkout};
use super::schema::{companies, users};

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain user repository errors.
fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to domain user repository errors.
fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "diesel operation failed");

    match error {
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

/// Convert a joined row pair to a domain [`User`].
fn row_to_user(
    row: UserRow,
    company: Option<CompanyRow>,
) -> Result<User, UserPersistenceError> {
    let id = Uuid::parse_str(&row.id)
        .map_err(|_| UserPersistenceError::query(format!("invalid user id in store: {}", row.id)))?;
    let company = company
        .map(|related| -> Result<Company, UserPersistenceError> {
            let company_id = Uuid::parse_str(&related.id).map_err(|_| {
                UserPersistenceError::query(format!("invalid company id in store: {}", related.id))
            })?;
            Ok(Company {
                id: company_id,
                name: related.name,
            })
        })
        .transpose()?;

    Ok(User {
        id,
        name: row.name,
        password: row.password,
        is_admin: row.is_admin,
        company,
    })
}

impl UserRepository for SqliteUserRepository {
    fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = checkout(&self.pool).map_err(map_pool_error)?;

        let rows: Vec<(UserRow, Option<CompanyRow>)> = users::table
            .left_join(companies::table)
            .select((UserRow::as_select(), Option::<CompanyRow>::as_select()))
            .order(users::name.asc())
            .load(&mut conn)
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(row, company)| row_to_user(row, company))
            .collect()
    }

    fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = checkout(&self.pool).map_err(map_pool_error)?;

        let row: Option<(UserRow, Option<CompanyRow>)> = users::table
            .left_join(companies::table)
            .filter(users::id.eq(id.to_string()))
            .select((UserRow::as_select(), Option::<CompanyRow>::as_select()))
            .first(&mut conn)
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|(user, company)| row_to_user(user, company))
            .transpose()
    }

    fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = checkout(&self.pool).map_err(map_pool_error)?;

        let id = user.id.to_string();
        let company_id = user.company.as_ref().map(|company| company.id.to_string());
        let new_row = NewUserRow {
            id: &id,
            name: &user.name,
            password: &user.password,
            is_admin: user.is_admin,
            company_id: company_id.as_deref(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = checkout(&self.pool).map_err(map_pool_error)?;

        let company_id = user.company.as_ref().map(|company| company.id.to_string());
        let changes = UserRowUpdate {
            name: &user.name,
            password: &user.password,
            is_admin: user.is_admin,
            company_id: company_id.as_deref(),
        };

        let updated = diesel::update(users::table.filter(users::id.eq(user.id.to_string())))
            .set(&changes)
            .execute(&mut conn)
            .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(UserPersistenceError::query("user not found for update"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Adapter round trips against a throwaway SQLite database.
    use super::*;
    use crate::domain::ports::CompanyRepository;
    use crate::outbound::persistence::{MIGRATIONS, SqliteCompanyRepository, build_pool};
    use diesel_migrations::MigrationHarness;
    use rstest::rstest;

    fn test_pool() -> (tempfile::TempDir, DbPool) {
        let dir = tempfile::tempdir().expect("temp dir");
        let url = dir.path().join("test.db").display().to_string();
        let pool = build_pool(&url).expect("pool");
        let mut conn = pool.get().expect("connection");
        conn.run_pending_migrations(MIGRATIONS).expect("migrations");
        (dir, pool)
    }

    fn sample_user(company: Option<Company>) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ada".to_owned(),
            password: "correct horse".to_owned(),
            is_admin: false,
            company,
        }
    }

    #[rstest]
    fn insert_then_find_round_trips_with_company() {
        let (_dir, pool) = test_pool();
        let companies = SqliteCompanyRepository::new(pool.clone());
        let repo = SqliteUserRepository::new(pool);

        let company = Company {
            id: Uuid::new_v4(),
            name: "Initech".to_owned(),
        };
        companies.insert(&company).expect("insert company");
        let user = sample_user(Some(company.clone()));
        repo.insert(&user).expect("insert user");

        let found = repo
            .find_by_id(&user.id)
            .expect("query")
            .expect("user exists");
        assert_eq!(found, user);
        assert_eq!(found.company.as_ref().map(|c| c.name.as_str()), Some("Initech"));
    }

    #[rstest]
    fn find_by_unknown_id_returns_none() {
        let (_dir, pool) = test_pool();
        let repo = SqliteUserRepository::new(pool);

        let found = repo.find_by_id(&Uuid::new_v4()).expect("query");
        assert!(found.is_none());
    }

    #[rstest]
    fn update_persists_changes_and_clears_relation() {
        let (_dir, pool) = test_pool();
        let companies = SqliteCompanyRepository::new(pool.clone());
        let repo = SqliteUserRepository::new(pool);

        let company = Company {
            id: Uuid::new_v4(),
            name: "Initech".to_owned(),
        };
        companies.insert(&company).expect("insert company");
        let mut user = sample_user(Some(company));
        repo.insert(&user).expect("insert user");

        user.name = "Grace".to_owned();
        user.company = None;
        repo.update(&user).expect("update user");

        let found = repo
            .find_by_id(&user.id)
            .expect("query")
            .expect("user exists");
        assert_eq!(found.name, "Grace");
        assert!(found.company.is_none());
    }

    #[rstest]
    fn update_of_missing_user_is_a_query_error() {
        let (_dir, pool) = test_pool();
        let repo = SqliteUserRepository::new(pool);

        let err = repo
            .update(&sample_user(None))
            .expect_err("nothing to update");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn list_orders_users_by_name() {
        let (_dir, pool) = test_pool();
        let repo = SqliteUserRepository::new(pool);

        let mut grace = sample_user(None);
        grace.name = "Grace".to_owned();
        let ada = sample_user(None);
        repo.insert(&grace).expect("insert");
        repo.insert(&ada).expect("insert");

        let names: Vec<String> = repo
            .list()
            .expect("list")
            .into_iter()
            .map(|user| user.name)
            .collect();
        assert_eq!(names, ["Ada", "Grace"]);
    }
}
