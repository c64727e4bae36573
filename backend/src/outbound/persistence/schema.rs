//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the embedded migrations exactly. Identifiers
//! are stored as UUID text; SQLite has no native UUID column type.

diesel::table! {
    /// Company records referenced by `users.company_id`.
    companies (id) {
        /// Primary key: UUID v4 as text.
        id -> Text,
        /// Company name.
        name -> Text,
    }
}

diesel::table! {
    /// User records.
    users (id) {
        /// Primary key: UUID v4 as text.
        id -> Text,
        /// Display name.
        name -> Text,
        /// Stored credential.
        password -> Text,
        /// Administrative flag.
        is_admin -> Bool,
        /// Optional foreign key into `companies`.
        company_id -> Nullable<Text>,
    }
}

diesel::joinable!(users -> companies (company_id));
diesel::allow_tables_to_appear_in_same_query!(users, companies);
