//! Company entity.

use uuid::Uuid;

/// Employer record referenced by [`crate::domain::User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Company name.
    pub name: String,
}

impl Company {
    /// Blank company with a freshly assigned identifier.
    #[must_use]
    pub fn draft() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
        }
    }
}
