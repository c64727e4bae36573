//! Port abstractions the domain expects persistence adapters to satisfy.
//!
//! Ports are synchronous: the only adapter in the tree wraps a blocking
//! SQLite connection, and handlers hop onto a blocking thread before
//! touching a repository.

pub mod company_repository;
pub mod user_repository;

pub use company_repository::{CompanyPersistenceError, CompanyRepository};
pub use user_repository::{UserPersistenceError, UserRepository};
