//! AmpFlux Server — multi-tenant circuit design collaboration platform.
//!
//! Main entry point that wires all crates together and starts the HTTP
//! server and the background simulation worker.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use ampflux_core::config::AppConfig;
use ampflux_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("AMPFLUX_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting AmpFlux v{}", env!("CARGO_PKG_VERSION"));

    // ── Database ─────────────────────────────────────────────────
    let db_pool = ampflux_database::connection::create_pool(&config.database).await?;
    ampflux_database::migration::run_migrations(&db_pool).await?;

    // ── Repositories ─────────────────────────────────────────────
    let accounts = Arc::new(ampflux_database::repositories::account::AccountRepository::new(
        db_pool.clone(),
    ));
    let companies = Arc::new(ampflux_database::repositories::company::CompanyRepository::new(
        db_pool.clone(),
    ));
    let projects = Arc::new(ampflux_database::repositories::project::ProjectRepository::new(
        db_pool.clone(),
    ));
    let members = Arc::new(ampflux_database::repositories::member::MemberRepository::new(
        db_pool.clone(),
    ));
    let shares = Arc::new(ampflux_database::repositories::share::ShareRepository::new(
        db_pool.clone(),
    ));
    let versions = Arc::new(ampflux_database::repositories::circuit::CircuitVersionRepository::new(
        db_pool.clone(),
    ));
    let simulations = Arc::new(ampflux_database::repositories::simulation::SimulationRepository::new(
        db_pool.clone(),
    ));
    let jobs = Arc::new(ampflux_database::repositories::job::JobRepository::new(
        db_pool.clone(),
    ));
    let audit_repo = Arc::new(ampflux_database::repositories::audit::AuditLogRepository::new(
        db_pool.clone(),
    ));

    // ── Auth ─────────────────────────────────────────────────────
    tracing::info!("Initializing authentication system...");
    let revocations = Arc::new(ampflux_auth::revocation::RevocationList::new());
    let issuer = Arc::new(ampflux_auth::jwt::TokenIssuer::new(&config.auth));
    let verifier = Arc::new(ampflux_auth::jwt::TokenVerifier::new(
        &config.auth,
        Arc::clone(&revocations),
    ));
    let hasher = Arc::new(ampflux_auth::password::PasswordHasher::new());
    let session_manager = Arc::new(ampflux_auth::session::SessionManager::new(
        Arc::clone(&issuer),
        Arc::clone(&verifier),
        Arc::clone(&hasher),
        Arc::clone(&accounts),
        Arc::clone(&companies),
        config.auth.clone(),
    ));
    let resolver = Arc::new(ampflux_auth::access::AccessResolver::new(
        Arc::clone(&members),
        Arc::clone(&shares),
    ));

    // ── Services ─────────────────────────────────────────────────
    let audit = ampflux_service::audit::AuditRecorder::new(Arc::clone(&audit_repo));
    let notifier: Arc<dyn ampflux_service::notify::EmailNotifier> =
        Arc::new(ampflux_service::notify::LogMailer::new());

    let gateway = Arc::new(ampflux_worker::gateway::TaskGateway::new(
        Arc::clone(&jobs),
        config.worker.max_attempts,
    ));

    let project_service = Arc::new(ampflux_service::project::ProjectService::new(
        Arc::clone(&projects),
        Arc::clone(&members),
        Arc::clone(&accounts),
        Arc::clone(&resolver),
        audit.clone(),
    ));
    let share_service = Arc::new(ampflux_service::share::ShareService::new(
        Arc::clone(&projects),
        Arc::clone(&shares),
        Arc::clone(&accounts),
        audit.clone(),
        Arc::clone(&notifier),
    ));
    let circuit_service = Arc::new(ampflux_service::circuit::CircuitService::new(
        Arc::clone(&projects),
        Arc::clone(&versions),
        Arc::clone(&resolver),
        audit.clone(),
    ));
    let simulation_service = Arc::new(ampflux_service::simulation::SimulationService::new(
        Arc::clone(&projects),
        Arc::clone(&simulations),
        Arc::clone(&gateway),
        Arc::clone(&resolver),
        audit.clone(),
    ));

    // ── Shutdown channel ─────────────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Background worker ────────────────────────────────────────
    let worker_handle = if config.worker.enabled {
        let worker_id = format!("worker-{}", &uuid::Uuid::new_v4().to_string()[..8]);

        let queue = Arc::new(ampflux_worker::queue::JobQueue::new(
            Arc::clone(&jobs),
            worker_id.clone(),
        ));

        let mut executor = ampflux_worker::executor::JobExecutor::new();
        executor.register(Arc::new(
            ampflux_worker::jobs::simulation::ShortCircuitJobHandler::new(),
        ));
        let executor = Arc::new(executor);

        let runner = ampflux_worker::runner::WorkerRunner::new(
            queue,
            executor,
            config.worker.clone(),
            worker_id,
        );

        let worker_cancel = shutdown_rx.clone();
        Some(tokio::spawn(async move {
            runner.run(worker_cancel).await;
        }))
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    // ── HTTP server ──────────────────────────────────────────────
    let app_state = ampflux_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        session_manager,
        accounts,
        companies,
        notifier,
        project_service,
        share_service,
        circuit_service,
        simulation_service,
    };

    let app = ampflux_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("AmpFlux server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(handle) = worker_handle {
        let _ = tokio::time::timeout(std::time::Duration::from_secs(30), handle).await;
    }

    db_pool.close().await;
    tracing::info!("AmpFlux server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
