//! Companies API handlers.
//!
//! Same verb-to-mapper conventions as the users endpoints; the company
//! schema has no credential field, so `detail` and `overview` coincide.

use std::sync::Arc;

use actix_web::{get, patch, post, put, web};
use mapper::MarshalOptions;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::Company;
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::mapping::{DETAIL_ROLE, OVERVIEW_ROLE};
use crate::inbound::http::state::AppState;
use crate::inbound::http::validation::{into_object, parse_id, schema_role};

/// List all companies with the overview role.
#[utoipa::path(
    get,
    path = "/api/v1/companies",
    responses(
        (status = 200, description = "Companies, overview fields only"),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["companies"],
    operation_id = "listCompanies"
)]
#[get("/companies")]
pub async fn list_companies(
    state: web::Data<AppState>,
) -> ApiResult<web::Json<Vec<Map<String, Value>>>> {
    let state = state.into_inner();
    let body = web::block(move || -> Result<_, ApiError> {
        let companies = state.companies.list()?;
        let role = schema_role(&state.company_schema, OVERVIEW_ROLE)?;
        Ok(state
            .company_schema
            .serialize_many(companies.iter(), Some(role)))
    })
    .await??;
    Ok(web::Json(body))
}

/// Create a company. The `id` field is read-only and store-assigned.
#[utoipa::path(
    post,
    path = "/api/v1/companies",
    responses(
        (status = 200, description = "Created company"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["companies"],
    operation_id = "createCompany"
)]
#[post("/companies")]
pub async fn create_company(
    state: web::Data<AppState>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<Map<String, Value>>> {
    let data = into_object(payload.into_inner())?;
    let state = state.into_inner();
    let body = web::block(move || -> Result<_, ApiError> {
        let company = state
            .company_schema
            .marshal(&data, Company::draft(), &MarshalOptions::default())?;
        state.companies.insert(&company)?;
        let role = schema_role(&state.company_schema, DETAIL_ROLE)?;
        Ok(state.company_schema.serialize(&company, Some(role)))
    })
    .await??;
    Ok(web::Json(body))
}

/// Fetch one company.
#[utoipa::path(
    get,
    path = "/api/v1/companies/{id}",
    params(("id" = String, Path, description = "Company identifier")),
    responses(
        (status = 200, description = "Company"),
        (status = 400, description = "Malformed identifier", body = ApiError),
        (status = 404, description = "Unknown company", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["companies"],
    operation_id = "getCompany"
)]
#[get("/companies/{id}")]
pub async fn get_company(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Map<String, Value>>> {
    let id = parse_id(&path.into_inner())?;
    let state = state.into_inner();
    let body = web::block(move || -> Result<_, ApiError> {
        let company = state
            .companies
            .find_by_id(&id)?
            .ok_or_else(|| ApiError::not_found("company not found"))?;
        let role = schema_role(&state.company_schema, DETAIL_ROLE)?;
        Ok(state.company_schema.serialize(&company, Some(role)))
    })
    .await??;
    Ok(web::Json(body))
}

/// Replace a company.
#[utoipa::path(
    put,
    path = "/api/v1/companies/{id}",
    params(("id" = String, Path, description = "Company identifier")),
    responses(
        (status = 200, description = "Updated company"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Unknown company", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["companies"],
    operation_id = "replaceCompany"
)]
#[put("/companies/{id}")]
pub async fn replace_company(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<Map<String, Value>>> {
    let id = parse_id(&path.into_inner())?;
    let data = into_object(payload.into_inner())?;
    apply_company_update(state.into_inner(), id, data, false)
        .await
        .map(web::Json)
}

/// Partially update a company.
#[utoipa::path(
    patch,
    path = "/api/v1/companies/{id}",
    params(("id" = String, Path, description = "Company identifier")),
    responses(
        (status = 200, description = "Updated company"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Unknown company", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["companies"],
    operation_id = "patchCompany"
)]
#[patch("/companies/{id}")]
pub async fn patch_company(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<Map<String, Value>>> {
    let id = parse_id(&path.into_inner())?;
    let data = into_object(payload.into_inner())?;
    apply_company_update(state.into_inner(), id, data, true)
        .await
        .map(web::Json)
}

async fn apply_company_update(
    state: Arc<AppState>,
    id: Uuid,
    data: Map<String, Value>,
    partial: bool,
) -> Result<Map<String, Value>, ApiError> {
    web::block(move || -> Result<_, ApiError> {
        let existing = state
            .companies
            .find_by_id(&id)?
            .ok_or_else(|| ApiError::not_found("company not found"))?;
        let updated = state
            .company_schema
            .marshal(&data, existing, &MarshalOptions { role: None, partial })?;
        state.companies.update(&updated)?;
        let role = schema_role(&state.company_schema, DETAIL_ROLE)?;
        Ok(state.company_schema.serialize(&updated, Some(role)))
    })
    .await?
}
