//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use ampflux_auth::session::SessionManager;
use ampflux_core::config::AppConfig;
use ampflux_database::repositories::account::AccountRepository;
use ampflux_database::repositories::company::CompanyRepository;
use ampflux_service::circuit::CircuitService;
use ampflux_service::notify::EmailNotifier;
use ampflux_service::project::ProjectService;
use ampflux_service::share::ShareService;
use ampflux_service::simulation::SimulationService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,

    /// Session lifecycle (register, login, refresh, logout, authenticate).
    pub session_manager: Arc<SessionManager>,

    /// Account lookups for the user endpoints.
    pub accounts: Arc<AccountRepository>,
    /// Company lookups for the user endpoints.
    pub companies: Arc<CompanyRepository>,
    /// Email side channel for invites.
    pub notifier: Arc<dyn EmailNotifier>,

    /// Project CRUD and membership.
    pub project_service: Arc<ProjectService>,
    /// Sharing lifecycle.
    pub share_service: Arc<ShareService>,
    /// Circuit version history.
    pub circuit_service: Arc<CircuitService>,
    /// Simulation dispatch and polling.
    pub simulation_service: Arc<SimulationService>,
}
