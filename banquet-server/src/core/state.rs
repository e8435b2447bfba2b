use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::models::AdminUserCreate;
use crate::db::repository::AdminUserRepository;
use crate::mail::ContactNotifier;
use crate::pdf::PdfRenderer;

/// Server state, holding the shared handles for every request
///
/// Cloning is shallow: the database handle and the service singletons are
/// reference-counted.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB / RocksDB)
    pub db: Surreal<Db>,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
    /// HTML → PDF renderer (headless browser per request)
    pub pdf_renderer: Arc<PdfRenderer>,
    /// Best-effort contact-lead mail notifier
    pub notifier: Arc<ContactNotifier>,
}

impl ServerState {
    /// Initialize the server state
    ///
    /// 1. Ensure the working directory structure exists
    /// 2. Open the embedded database at `WORK_DIR/database`
    /// 3. Construct the JWT, PDF and mail services
    /// 4. Bootstrap the first admin account if none exists
    ///
    /// # Panics
    ///
    /// Panics when the working directory or database cannot be initialized;
    /// there is nothing useful the server can do without them.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_service = DbService::new(&config.database_dir())
            .await
            .expect("Failed to initialize database");

        let state = Self {
            config: config.clone(),
            db: db_service.db,
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            pdf_renderer: Arc::new(PdfRenderer::new()),
            notifier: Arc::new(ContactNotifier::from_config(config)),
        };

        state.bootstrap_admin().await;

        state
    }

    /// Get the database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Create the first admin account when the store has none.
    ///
    /// Credentials come from `ADMIN_EMAIL` / `ADMIN_PASSWORD`; without them
    /// the server still starts, but no one can log in until an admin record
    /// is created out of band.
    async fn bootstrap_admin(&self) {
        let repo = AdminUserRepository::new(self.db.clone());

        match repo.find_active().await {
            Ok(admins) if !admins.is_empty() => {}
            Ok(_) => match (&self.config.admin_email, &self.config.admin_password) {
                (Some(email), Some(password)) => {
                    let create = AdminUserCreate {
                        email: email.clone(),
                        password: password.clone(),
                        username: None,
                    };
                    match repo.create(create).await {
                        Ok(admin) => tracing::warn!(
                            email = %admin.email,
                            "No admin account found - bootstrapped one from ADMIN_EMAIL/ADMIN_PASSWORD"
                        ),
                        Err(e) => tracing::error!("Failed to bootstrap admin account: {}", e),
                    }
                }
                _ => tracing::warn!(
                    "No active admin account exists and ADMIN_EMAIL/ADMIN_PASSWORD are unset - \
                     admin endpoints will be unreachable until one is created"
                ),
            },
            Err(e) => tracing::error!("Failed to check for existing admin accounts: {}", e),
        }
    }
}
