//! Backend entry-point: wires the REST endpoints over the SQLite store.

use std::env;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use diesel_migrations::MigrationHarness;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use directory_backend::domain::ports::{CompanyRepository, UserRepository};
use directory_backend::inbound::http::health::{self, HealthState};
use directory_backend::inbound::http::{api_scope, state::AppState};
use directory_backend::outbound::persistence::{
    DbPool, MIGRATIONS, SqliteCompanyRepository, SqliteUserRepository, build_pool, checkout,
};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
        warn!("DATABASE_URL not set, using ./directory.db");
        "./directory.db".into()
    });
    let pool = build_pool(&database_url).map_err(|e| std::io::Error::other(e.to_string()))?;
    run_migrations(&pool).map_err(std::io::Error::other)?;

    let users: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool.clone()));
    let companies: Arc<dyn CompanyRepository> = Arc::new(SqliteCompanyRepository::new(pool));
    let state = web::Data::new(
        AppState::new(users, companies).map_err(|e| std::io::Error::other(e.to_string()))?,
    );

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();
    let server_state = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(server_state.clone())
            .app_data(server_health_state.clone())
            .service(api_scope())
            .service(health::ready)
            .service(health::live)
    })
    .bind(bind_addr.as_str())?;

    health_state.mark_ready();
    server.run().await
}

fn run_migrations(pool: &DbPool) -> Result<(), String> {
    let mut conn = checkout(pool).map_err(|e| e.to_string())?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| e.to_string())?;
    Ok(())
}
