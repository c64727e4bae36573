//! Named field whitelists restricting serialize/marshal operations.

/// Named whitelist of field names.
///
/// A role restricts which declared fields participate in a serialize or
/// marshal call. Membership is validated against the schema's declared
/// fields when the schema is built, never at use time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    name: String,
    fields: Vec<String>,
}

/// Build a whitelist role from field names.
///
/// ```
/// use mapper::whitelist;
///
/// let overview = whitelist("overview", &["id", "name"]);
/// assert!(overview.contains("id"));
/// assert!(!overview.contains("password"));
/// ```
#[must_use]
pub fn whitelist(name: impl Into<String>, fields: &[&str]) -> Role {
    Role {
        name: name.into(),
        fields: fields.iter().map(|field| (*field).to_owned()).collect(),
    }
}

impl Role {
    /// Role name used to look the role up on a schema.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Whether `field` participates in operations restricted by this role.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|name| name == field)
    }

    /// Whitelisted field names in the order they were given.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }
}
