//! Declarative mapping between domain entities and plain JSON structures.
//!
//! A [`Schema`] binds an ordered set of named [`Field`]s (optionally grouped
//! into [`Role`] whitelists) to one entity type. It exposes two operations:
//!
//! - [`Schema::serialize`] — entity to `serde_json::Map`, honouring an
//!   optional role whitelist;
//! - [`Schema::marshal`] — validated conversion from a JSON object into an
//!   entity, aggregating every field failure into one [`MappingInvalid`].
//!
//! Schemas are immutable once built and safe to share across requests; all
//! per-call state lives inside a single `serialize`/`marshal` invocation.
//! Persistence is never the schema's job: a marshalled entity is handed back
//! to the caller untouched by any store.
//!
//! ```
//! use mapper::{Field, MarshalOptions, Schema, whitelist};
//! use serde_json::json;
//!
//! #[derive(Default)]
//! struct Account {
//!     name: String,
//!     suspended: bool,
//! }
//!
//! let schema = Schema::builder()
//!     .field(Field::string(
//!         "name",
//!         |a: &Account| Some(a.name.clone()),
//!         Some(|a: &mut Account, v| a.name = v),
//!     ))
//!     .field(
//!         Field::boolean(
//!             "suspended",
//!             |a: &Account| Some(a.suspended),
//!             Some(|a: &mut Account, v| a.suspended = v),
//!         )
//!         .optional()
//!         .with_default(json!(false)),
//!     )
//!     .role(whitelist("overview", &["name"]))
//!     .build()
//!     .unwrap();
//!
//! let data = json!({"name": "Ada"});
//! let account = schema
//!     .marshal(
//!         data.as_object().unwrap(),
//!         Account::default(),
//!         &MarshalOptions::default(),
//!     )
//!     .unwrap();
//! assert_eq!(account.name, "Ada");
//! assert!(!account.suspended);
//! ```

pub mod error;
pub mod field;
pub mod role;
pub mod schema;

pub use error::{MappingInvalid, SchemaError};
pub use field::{Field, NestedBinding, Patch, Resolver};
pub use role::{Role, whitelist};
pub use schema::{MarshalOptions, Schema, SchemaBuilder};
