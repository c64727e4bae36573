//! User entity.

use uuid::Uuid;

use crate::domain::Company;

/// Application user.
///
/// Attribute validation is the mapping layer's job; this type only carries
/// the data. `password` never leaves the process: the serialization roles
/// wired in the inbound layer exclude it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Credential in whatever form the deployment stores it.
    pub password: String,
    /// Administrative flag. Data only; nothing enforces it.
    pub is_admin: bool,
    /// Optional employer, resolved by foreign-key lookup on marshal.
    pub company: Option<Company>,
}

impl User {
    /// Blank user with a freshly assigned identifier, ready to be filled in
    /// by a marshal pass.
    #[must_use]
    pub fn draft() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            password: String::new(),
            is_admin: false,
            company: None,
        }
    }
}
