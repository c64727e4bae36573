//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use diesel::prelude::*;

use super::schema::{companies, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: String,
    pub name: String,
    pub password: String,
    pub is_admin: bool,
    #[expect(dead_code, reason = "loaded via the join; kept for completeness")]
    pub company_id: Option<String>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub password: &'a str,
    pub is_admin: bool,
    pub company_id: Option<&'a str>,
}

/// Changeset struct for updating existing user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserRowUpdate<'a> {
    pub name: &'a str,
    pub password: &'a str,
    pub is_admin: bool,
    // None must clear the relation, not skip the column.
    #[diesel(treat_none_as_null = true)]
    pub company_id: Option<&'a str>,
}

/// Row struct for reading from the companies table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct CompanyRow {
    pub id: String,
    pub name: String,
}

/// Insertable struct for creating new company records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = companies)]
pub(crate) struct NewCompanyRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
}

/// Changeset struct for updating existing company records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = companies)]
pub(crate) struct CompanyRowUpdate<'a> {
    pub name: &'a str,
}
