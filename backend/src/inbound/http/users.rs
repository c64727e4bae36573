//! Users API handlers.
//!
//! ```text
//! GET    /api/v1/users
//! POST   /api/v1/users        {"name":"Ada","password":"...","company":{"id":"..."}}
//! GET    /api/v1/users/{id}
//! PUT    /api/v1/users/{id}   full replace
//! PATCH  /api/v1/users/{id}   partial update
//! ```
//!
//! Handlers translate verb and path into mapper invocations: marshal on the
//! way in, role-restricted serialize on the way out. Listing uses the
//! `overview` role; single-resource responses use `detail`, which never
//! includes the stored credential.

use std::sync::Arc;

use actix_web::{get, patch, post, put, web};
use mapper::MarshalOptions;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::User;
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::mapping::{DETAIL_ROLE, OVERVIEW_ROLE};
use crate::inbound::http::state::AppState;
use crate::inbound::http::validation::{into_object, parse_id, schema_role};

/// List all users with the overview role.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users, overview fields only"),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<AppState>) -> ApiResult<web::Json<Vec<Map<String, Value>>>> {
    let state = state.into_inner();
    let body = web::block(move || -> Result<_, ApiError> {
        let users = state.users.list()?;
        let role = schema_role(&state.user_schema, OVERVIEW_ROLE)?;
        Ok(state.user_schema.serialize_many(users.iter(), Some(role)))
    })
    .await??;
    Ok(web::Json(body))
}

/// Create a user. The `id` field is read-only and store-assigned; supplying
/// one in the payload is silently ignored.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Created user, detail fields"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<AppState>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<Map<String, Value>>> {
    let data = into_object(payload.into_inner())?;
    let state = state.into_inner();
    let body = web::block(move || -> Result<_, ApiError> {
        let user = state
            .user_schema
            .marshal(&data, User::draft(), &MarshalOptions::default())?;
        state.users.insert(&user)?;
        let role = schema_role(&state.user_schema, DETAIL_ROLE)?;
        Ok(state.user_schema.serialize(&user, Some(role)))
    })
    .await??;
    Ok(web::Json(body))
}

/// Fetch one user with the detail role.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User, detail fields"),
        (status = 400, description = "Malformed identifier", body = ApiError),
        (status = 404, description = "Unknown user", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Map<String, Value>>> {
    let id = parse_id(&path.into_inner())?;
    let state = state.into_inner();
    let body = web::block(move || -> Result<_, ApiError> {
        let user = state
            .users
            .find_by_id(&id)?
            .ok_or_else(|| ApiError::not_found("user not found"))?;
        let role = schema_role(&state.user_schema, DETAIL_ROLE)?;
        Ok(state.user_schema.serialize(&user, Some(role)))
    })
    .await??;
    Ok(web::Json(body))
}

/// Replace a user. Every required field must be present.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Updated user, detail fields"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Unknown user", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "replaceUser"
)]
#[put("/users/{id}")]
pub async fn replace_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<Map<String, Value>>> {
    let id = parse_id(&path.into_inner())?;
    let data = into_object(payload.into_inner())?;
    apply_user_update(state.into_inner(), id, data, false)
        .await
        .map(web::Json)
}

/// Partially update a user. Missing fields keep their stored values.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Updated user, detail fields"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Unknown user", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "patchUser"
)]
#[patch("/users/{id}")]
pub async fn patch_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<Map<String, Value>>> {
    let id = parse_id(&path.into_inner())?;
    let data = into_object(payload.into_inner())?;
    apply_user_update(state.into_inner(), id, data, true)
        .await
        .map(web::Json)
}

/// Shared PUT/PATCH flow: fetch, marshal over the stored entity, persist,
/// serialize. A failed marshal leaves the stored row untouched.
async fn apply_user_update(
    state: Arc<AppState>,
    id: Uuid,
    data: Map<String, Value>,
    partial: bool,
) -> Result<Map<String, Value>, ApiError> {
    web::block(move || -> Result<_, ApiError> {
        let existing = state
            .users
            .find_by_id(&id)?
            .ok_or_else(|| ApiError::not_found("user not found"))?;
        let updated = state
            .user_schema
            .marshal(&data, existing, &MarshalOptions { role: None, partial })?;
        state.users.update(&updated)?;
        let role = schema_role(&state.user_schema, DETAIL_ROLE)?;
        Ok(state.user_schema.serialize(&updated, Some(role)))
    })
    .await?
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use crate::inbound::http::api_scope;
    use crate::inbound::http::test_utils::{
        InMemoryCompanies, InMemoryUsers, sample_company, sample_user, test_state,
    };

    async fn read_json(response: actix_web::dev::ServiceResponse) -> Value {
        let body = actix_test::read_body(response).await;
        serde_json::from_slice(&body).expect("JSON body")
    }

    #[actix_web::test]
    async fn create_user_returns_detail_payload_without_password() {
        let state = test_state(InMemoryUsers::default(), InMemoryCompanies::default());
        let app = actix_test::init_service(App::new().app_data(state).service(api_scope())).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({"name": "Ada", "password": "correct horse"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body.get("name"), Some(&json!("Ada")));
        assert_eq!(body.get("is_admin"), Some(&json!(false)));
        assert!(body.get("password").is_none());
        assert!(body.get("id").and_then(Value::as_str).is_some());
    }

    #[actix_web::test]
    async fn create_user_aggregates_validation_errors() {
        let state = test_state(InMemoryUsers::default(), InMemoryCompanies::default());
        let app = actix_test::init_service(App::new().app_data(state).service(api_scope())).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({"name": 123, "is_admin": "yes"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body.get("code"), Some(&json!("invalid_request")));
        let field_errors = body
            .get("details")
            .and_then(|d| d.get("field_errors"))
            .expect("field errors present");
        assert_eq!(field_errors.get("name"), Some(&json!("must be a string")));
        assert_eq!(
            field_errors.get("is_admin"),
            Some(&json!("must be a boolean"))
        );
        assert_eq!(
            field_errors.get("password"),
            Some(&json!("this field is required"))
        );
    }

    #[actix_web::test]
    async fn create_user_ignores_read_only_id() {
        let state = test_state(InMemoryUsers::default(), InMemoryCompanies::default());
        let app = actix_test::init_service(App::new().app_data(state).service(api_scope())).await;

        let supplied = Uuid::new_v4().to_string();
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({"id": supplied, "name": "Ada", "password": "pw"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        let assigned = body.get("id").and_then(Value::as_str).expect("id present");
        assert_ne!(assigned, supplied);
    }

    #[actix_web::test]
    async fn create_user_resolves_company_reference() {
        let company = sample_company("Initech");
        let state = test_state(
            InMemoryUsers::default(),
            InMemoryCompanies::seeded([company.clone()]),
        );
        let app = actix_test::init_service(App::new().app_data(state).service(api_scope())).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({
                "name": "Ada",
                "password": "pw",
                "company": {"id": company.id.to_string()}
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(
            body.get("company").and_then(|c| c.get("name")),
            Some(&json!("Initech"))
        );
    }

    #[actix_web::test]
    async fn unresolvable_company_is_a_field_error() {
        let state = test_state(InMemoryUsers::default(), InMemoryCompanies::default());
        let app = actix_test::init_service(App::new().app_data(state).service(api_scope())).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({
                "name": "Ada",
                "password": "pw",
                "company": {"id": Uuid::new_v4().to_string()}
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(
            body.get("details")
                .and_then(|d| d.get("field_errors"))
                .and_then(|e| e.get("company")),
            Some(&json!("could not be resolved"))
        );
    }

    #[actix_web::test]
    async fn list_users_emits_overview_fields_only() {
        let user = sample_user("Ada");
        let state = test_state(
            InMemoryUsers::seeded([user]),
            InMemoryCompanies::default(),
        );
        let app = actix_test::init_service(App::new().app_data(state).service(api_scope())).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/users")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        let first = &body.as_array().expect("array")[0];
        let keys: Vec<&str> = first
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["id", "name"]);
    }

    #[actix_web::test]
    async fn get_user_with_unknown_id_returns_not_found() {
        let state = test_state(InMemoryUsers::default(), InMemoryCompanies::default());
        let app = actix_test::init_service(App::new().app_data(state).service(api_scope())).await;

        let request = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{}", Uuid::new_v4()))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json(response).await;
        assert_eq!(body.get("code"), Some(&json!("not_found")));
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("1234")]
    #[actix_web::test]
    async fn get_user_with_malformed_id_is_rejected(#[case] raw: &str) {
        let state = test_state(InMemoryUsers::default(), InMemoryCompanies::default());
        let app = actix_test::init_service(App::new().app_data(state).service(api_scope())).await;

        let request = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{raw}"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn patch_with_empty_body_leaves_user_unchanged() {
        let user = sample_user("Ada");
        let id = user.id;
        let state = test_state(
            InMemoryUsers::seeded([user]),
            InMemoryCompanies::default(),
        );
        let app = actix_test::init_service(App::new().app_data(state).service(api_scope())).await;

        let request = actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/users/{id}"))
            .set_json(json!({}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body.get("name"), Some(&json!("Ada")));
    }

    #[actix_web::test]
    async fn put_missing_required_field_names_it() {
        let user = sample_user("Ada");
        let id = user.id;
        let state = test_state(
            InMemoryUsers::seeded([user]),
            InMemoryCompanies::default(),
        );
        let app = actix_test::init_service(App::new().app_data(state).service(api_scope())).await;

        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/v1/users/{id}"))
            .set_json(json!({"name": "Grace"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(
            body.get("details")
                .and_then(|d| d.get("field_errors"))
                .and_then(|e| e.get("password")),
            Some(&json!("this field is required"))
        );
    }

    #[actix_web::test]
    async fn patch_updates_single_field() {
        let user = sample_user("Ada");
        let id = user.id;
        let state = test_state(
            InMemoryUsers::seeded([user]),
            InMemoryCompanies::default(),
        );
        let app = actix_test::init_service(App::new().app_data(state).service(api_scope())).await;

        let request = actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/users/{id}"))
            .set_json(json!({"is_admin": true}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body.get("is_admin"), Some(&json!(true)));
        assert_eq!(body.get("name"), Some(&json!("Ada")));
    }

    #[actix_web::test]
    async fn failed_put_does_not_change_stored_user() {
        let user = sample_user("Ada");
        let id = user.id;
        let state = test_state(
            InMemoryUsers::seeded([user]),
            InMemoryCompanies::default(),
        );
        let app = actix_test::init_service(App::new().app_data(state).service(api_scope())).await;

        let bad_put = actix_test::TestRequest::put()
            .uri(&format!("/api/v1/users/{id}"))
            .set_json(json!({"name": "Grace"}))
            .to_request();
        let response = actix_test::call_service(&app, bad_put).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let fetch = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{id}"))
            .to_request();
        let response = actix_test::call_service(&app, fetch).await;
        let body = read_json(response).await;
        assert_eq!(body.get("name"), Some(&json!("Ada")));
    }
}
