//! Shared test helpers for integration tests.

use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use ampflux_core::config::server::ServerConfig;
use ampflux_core::config::{AppConfig, DatabaseConfig};
use ampflux_entity::account::AccountRole;

/// Tests share one scratch database; this gate serializes them so one
/// test's cleanup cannot clobber another's rows.
static DB_GATE: OnceLock<Arc<tokio::sync::Mutex<()>>> = OnceLock::new();

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Database pool for direct queries.
    pub db_pool: PgPool,
    /// Application config.
    pub config: AppConfig,
    /// Worker shutdown handle.
    shutdown: tokio::sync::watch::Sender<bool>,
    /// Held for the whole test to keep database access exclusive.
    _db_gate: tokio::sync::OwnedMutexGuard<()>,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

/// Auth cookies captured from a login/register response.
#[derive(Debug, Clone, Default)]
pub struct AuthCookies {
    /// Access token cookie value.
    pub access: String,
    /// Refresh token cookie value.
    pub refresh: String,
}

impl AuthCookies {
    /// Render as a `Cookie` request header value.
    pub fn header(&self) -> String {
        format!(
            "access_token={}; refresh_token={}",
            self.access, self.refresh
        )
    }

    /// Only the access cookie.
    pub fn access_only(&self) -> String {
        format!("access_token={}", self.access)
    }

    /// Only the refresh cookie.
    pub fn refresh_only(&self) -> String {
        format!("refresh_token={}", self.refresh)
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Values of any `Set-Cookie` headers, in order.
    pub set_cookies: Vec<String>,
    /// Parsed JSON body.
    pub body: Value,
}

impl TestResponse {
    /// Extract a cookie value from the `Set-Cookie` headers.
    pub fn cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.set_cookies.iter().find_map(|header| {
            let first = header.split(';').next()?;
            first.strip_prefix(&prefix).map(str::to_string)
        })
    }

    /// Extract both auth cookies.
    pub fn auth_cookies(&self) -> AuthCookies {
        AuthCookies {
            access: self.cookie("access_token").unwrap_or_default(),
            refresh: self.cookie("refresh_token").unwrap_or_default(),
        }
    }
}

impl TestApp {
    /// Create a new test application, or `None` when no test database is
    /// configured.
    pub async fn new() -> Option<Self> {
        let Ok(url) = std::env::var("AMPFLUX_TEST_DATABASE_URL") else {
            eprintln!("AMPFLUX_TEST_DATABASE_URL not set; skipping integration test");
            return None;
        };

        let db_gate = Arc::clone(DB_GATE.get_or_init(|| Arc::new(tokio::sync::Mutex::new(()))))
            .lock_owned()
            .await;

        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url,
                max_connections: 10,
                min_connections: 1,
                connect_timeout_seconds: 5,
                idle_timeout_seconds: 60,
            },
            auth: ampflux_core::config::auth::AuthConfig {
                jwt_secret: "integration-test-secret".to_string(),
                ..Default::default()
            },
            worker: ampflux_core::config::worker::WorkerConfig {
                enabled: true,
                concurrency: 2,
                poll_interval_seconds: 1,
                max_attempts: 3,
            },
            logging: Default::default(),
        };

        let db_pool = ampflux_database::connection::create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");

        ampflux_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let accounts = Arc::new(
            ampflux_database::repositories::account::AccountRepository::new(db_pool.clone()),
        );
        let companies = Arc::new(
            ampflux_database::repositories::company::CompanyRepository::new(db_pool.clone()),
        );
        let projects = Arc::new(
            ampflux_database::repositories::project::ProjectRepository::new(db_pool.clone()),
        );
        let members = Arc::new(ampflux_database::repositories::member::MemberRepository::new(
            db_pool.clone(),
        ));
        let shares = Arc::new(ampflux_database::repositories::share::ShareRepository::new(
            db_pool.clone(),
        ));
        let versions = Arc::new(
            ampflux_database::repositories::circuit::CircuitVersionRepository::new(db_pool.clone()),
        );
        let simulations = Arc::new(
            ampflux_database::repositories::simulation::SimulationRepository::new(db_pool.clone()),
        );
        let jobs = Arc::new(ampflux_database::repositories::job::JobRepository::new(
            db_pool.clone(),
        ));
        let audit_repo = Arc::new(
            ampflux_database::repositories::audit::AuditLogRepository::new(db_pool.clone()),
        );

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

        // Background worker so simulate → poll round-trips complete.
        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
        let queue = Arc::new(ampflux_worker::queue::JobQueue::new(
            Arc::clone(&jobs),
            "worker-test".to_string(),
        ));
        let mut executor = ampflux_worker::executor::JobExecutor::new();
        executor.register(Arc::new(
            ampflux_worker::jobs::simulation::ShortCircuitJobHandler::new(),
        ));
        let runner = ampflux_worker::runner::WorkerRunner::new(
            queue,
            Arc::new(executor),
            config.worker.clone(),
            "worker-test".to_string(),
        );
        tokio::spawn(async move {
            runner.run(shutdown_rx).await;
        });

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

        let router = ampflux_api::router::build_router(app_state);

        Some(Self {
            router,
            db_pool,
            config,
            shutdown: shutdown_tx,
            _db_gate: db_gate,
        })
    }

    /// Clean all test data from the database.
    async fn clean_database(pool: &PgPool) {
        let tables = [
            "audit_log",
            "jobs",
            "simulations",
            "circuit_versions",
            "project_shares",
            "project_members",
            "projects",
            "accounts",
            "companies",
        ];

        for table in &tables {
            let query = format!("DELETE FROM {table}");
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Register an account (creating its company) and return its cookies.
    pub async fn register(&self, name: &str, email: &str, company: &str) -> AuthCookies {
        let body = serde_json::json!({
            "name": name,
            "email": email,
            "password": "correct-horse-battery",
            "company_name": company,
        });

        let response = self.post("/auth/register", Some(body), None).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Registration failed: {:?}",
            response.body
        );
        response.auth_cookies()
    }

    /// Login and return the auth cookies.
    pub async fn login(&self, email: &str, password: &str) -> AuthCookies {
        let body = serde_json::json!({"email": email, "password": password});
        let response = self.post("/auth/login", Some(body), None).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.auth_cookies()
    }

    /// Insert an account directly into an existing company.
    pub async fn create_account_in_company(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: AccountRole,
        company_id: Uuid,
    ) -> Uuid {
        let hasher = ampflux_auth::password::PasswordHasher::new();
        let hash = hasher.hash(password).expect("Failed to hash password");

        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO accounts (name, email, password_hash, role, company_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(name)
        .bind(email)
        .bind(&hash)
        .bind(role)
        .bind(company_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to create test account")
    }

    /// Look up an account's id and company id by email.
    pub async fn account_ids(&self, email: &str) -> (Uuid, Uuid) {
        sqlx::query_as::<_, (Uuid, Uuid)>(
            "SELECT id, company_id FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.db_pool)
        .await
        .expect("Account not found")
    }

    /// Create a project through the API and return its id.
    pub async fn create_project(&self, cookies: &AuthCookies, name: &str) -> Uuid {
        let response = self
            .post(
                "/projects",
                Some(serde_json::json!({"name": name})),
                Some(&cookies.header()),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Project creation failed: {:?}",
            response.body
        );
        response.body["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("No project id in response")
    }

    /// Convenience POST.
    pub async fn post(&self, path: &str, body: Option<Value>, cookies: Option<&str>) -> TestResponse {
        self.request("POST", path, body, cookies).await
    }

    /// Convenience GET.
    pub async fn get(&self, path: &str, cookies: Option<&str>) -> TestResponse {
        self.request("GET", path, None, cookies).await
    }

    /// Convenience DELETE.
    pub async fn delete(&self, path: &str, cookies: Option<&str>) -> TestResponse {
        self.request("DELETE", path, None, cookies).await
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookies: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(cookies) = cookies {
            req = req.header("Cookie", cookies);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookies = response
            .headers()
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok().map(str::to_string))
            .collect();

        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            set_cookies,
            body,
        }
    }
}
