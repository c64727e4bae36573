//! Shared validation helpers for inbound HTTP handlers.

use mapper::{Role, Schema};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::inbound::http::error::ApiError;

/// Parse a path identifier, rejecting anything that is not a UUID.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| {
        ApiError::invalid_request("id must be a valid UUID")
            .with_details(json!({ "field": "id", "value": raw }))
    })
}

/// Require the request body to be a JSON object.
pub(crate) fn into_object(body: Value) -> Result<Map<String, Value>, ApiError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::invalid_request(
            "request body must be a JSON object",
        )),
    }
}

/// Look up a role wired at startup; absence is a wiring bug, so surface it
/// as an internal error rather than a client fault.
pub(crate) fn schema_role<'a, E: 'static>(
    schema: &'a Schema<E>,
    name: &str,
) -> Result<&'a Role, ApiError> {
    schema
        .role(name)
        .ok_or_else(|| ApiError::internal(format!("role {name} is not registered")))
}
