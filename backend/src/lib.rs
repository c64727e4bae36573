//! Directory backend: REST CRUD over users and companies with a declarative
//! mapping layer between JSON payloads and domain entities.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
