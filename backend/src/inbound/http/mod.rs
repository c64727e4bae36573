//! HTTP inbound adapter exposing the REST endpoints.

pub mod companies;
pub mod error;
pub mod health;
pub mod mapping;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// All versioned API routes, ready to mount on an `App`.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .service(users::list_users)
        .service(users::create_user)
        .service(users::get_user)
        .service(users::replace_user)
        .service(users::patch_user)
        .service(companies::list_companies)
        .service(companies::create_company)
        .service(companies::get_company)
        .service(companies::replace_company)
        .service(companies::patch_company)
}
