//! Diesel/SQLite persistence adapters for the domain's repository ports.

pub mod models;
pub mod pool;
pub mod schema;
pub mod sqlite_company_repository;
pub mod sqlite_user_repository;

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub use pool::{DbPool, PoolError, build_pool, checkout};
pub use sqlite_company_repository::SqliteCompanyRepository;
pub use sqlite_user_repository::SqliteUserRepository;

/// Migrations compiled into the binary and applied at startup.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
