//! Route definitions for the AmpFlux HTTP API.
//!
//! Routes are organized by domain. The router receives `AppState` and passes
//! it to all handlers via Axum's `State` extractor. Register, login, and
//! health are the only public routes; everything else authenticates through
//! the `CurrentAccount` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);
    let max_body = state.config.server.max_body_bytes;

    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(project_routes())
        .merge(circuit_routes())
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, refresh, logout.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
}

/// User and company endpoints.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::me))
        .route("/users", get(handlers::user::list))
        .route("/users/company", get(handlers::user::company))
        .route("/users/invite", post(handlers::user::invite))
}

/// Project CRUD, permissions, membership, and sharing.
fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", post(handlers::project::create))
        .route("/projects", get(handlers::project::list))
        .route("/projects/shared/with-me", get(handlers::share::shared_with_me))
        .route("/projects/{id}", get(handlers::project::get))
        .route("/projects/{id}", delete(handlers::project::delete))
        .route(
            "/projects/{id}/permissions",
            get(handlers::project::permissions),
        )
        .route("/projects/{id}/members", get(handlers::project::list_members))
        .route("/projects/{id}/members", post(handlers::project::add_member))
        .route(
            "/projects/{id}/members/{account_id}",
            delete(handlers::project::remove_member),
        )
        .route("/projects/{id}/share", post(handlers::share::create))
        .route("/projects/{id}/accept-share", post(handlers::share::accept))
        .route("/projects/{id}/decline-share", post(handlers::share::decline))
}

/// Circuit versioning and simulation.
fn circuit_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/circuits/{project_id}/save_version",
            post(handlers::circuit::save_version),
        )
        .route(
            "/circuits/{project_id}/versions",
            get(handlers::circuit::list_versions),
        )
        .route(
            "/circuits/{project_id}/simulate",
            post(handlers::simulation::simulate),
        )
        .route(
            "/circuits/simulation_result/{task_id}",
            get(handlers::simulation::simulation_result),
        )
        .route(
            "/circuits/{project_id}/simulations",
            get(handlers::simulation::list),
        )
}

/// Health check endpoint (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
