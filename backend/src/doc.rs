//! OpenAPI documentation configuration.
//!
//! Aggregates every HTTP endpoint and the error envelope schema into one
//! [`ApiDoc`] specification for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::error::{ApiError, ErrorCode};

/// OpenAPI specification for the directory API.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::replace_user,
        crate::inbound::http::users::patch_user,
        crate::inbound::http::companies::list_companies,
        crate::inbound::http::companies::create_company,
        crate::inbound::http::companies::get_company,
        crate::inbound::http::companies::replace_company,
        crate::inbound::http::companies::patch_company,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ApiError, ErrorCode)),
    tags(
        (name = "users", description = "User directory endpoints"),
        (name = "companies", description = "Company directory endpoints"),
        (name = "health", description = "Probe endpoints"),
    )
)]
pub struct ApiDoc;
