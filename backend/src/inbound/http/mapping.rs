//! Mapper schema definitions for the directory entities.
//!
//! Built once at startup and shared read-only across requests. The `company`
//! field on the user schema resolves `{"id": "..."}` payloads against the
//! company repository captured in its resolver closure.

use std::sync::Arc;

use mapper::{Field, NestedBinding, Resolver, Schema, SchemaError, whitelist};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::domain::ports::CompanyRepository;
use crate::domain::{Company, User};

/// Listing role: identifier and name only.
pub const OVERVIEW_ROLE: &str = "overview";

/// Single-resource role: everything except the stored credential.
pub const DETAIL_ROLE: &str = "detail";

/// Schema for [`Company`].
///
/// # Errors
///
/// Returns [`SchemaError`] if the declaration is inconsistent; this is a
/// wiring bug surfaced at startup.
pub fn company_schema() -> Result<Schema<Company>, SchemaError> {
    Schema::builder()
        .field(Field::string("id", |c: &Company| Some(c.id.to_string()), None).read_only())
        .field(Field::string(
            "name",
            |c: &Company| Some(c.name.clone()),
            Some(|c: &mut Company, v| c.name = v),
        ))
        .role(whitelist(OVERVIEW_ROLE, &["id", "name"]))
        .role(whitelist(DETAIL_ROLE, &["id", "name"]))
        .build()
}

/// Schema for [`User`], resolving the nested `company` field through
/// `companies`.
///
/// # Errors
///
/// Returns [`SchemaError`] if the declaration is inconsistent; this is a
/// wiring bug surfaced at startup.
pub fn user_schema(
    companies: Arc<dyn CompanyRepository>,
    company: Arc<Schema<Company>>,
) -> Result<Schema<User>, SchemaError> {
    let resolve: Resolver<Company> = Arc::new(move |raw: &Value| {
        let id = raw.get("id")?.as_str()?;
        let id = Uuid::parse_str(id).ok()?;
        companies.find_by_id(&id).ok().flatten()
    });

    Schema::builder()
        .field(Field::string("id", |u: &User| Some(u.id.to_string()), None).read_only())
        .field(Field::string(
            "name",
            |u: &User| Some(u.name.clone()),
            Some(|u: &mut User, v| u.name = v),
        ))
        .field(Field::string(
            "password",
            |u: &User| Some(u.password.clone()),
            Some(|u: &mut User, v| u.password = v),
        ))
        .field(
            Field::boolean(
                "is_admin",
                |u: &User| Some(u.is_admin),
                Some(|u: &mut User, v| u.is_admin = v),
            )
            .optional()
            .with_default(json!(false)),
        )
        .field(
            Field::nested(
                "company",
                NestedBinding::new(
                    company,
                    |u: &User| u.company.as_ref(),
                    |u: &mut User, c| u.company = Some(c),
                    resolve,
                ),
            )
            .optional(),
        )
        .role(whitelist(OVERVIEW_ROLE, &["id", "name"]))
        .role(whitelist(DETAIL_ROLE, &["id", "name", "is_admin", "company"]))
        .build()
}
