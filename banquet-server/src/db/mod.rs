//! Database Module
//!
//! Embedded SurrealDB (RocksDB backend) plus the models and repositories
//! built on top of it.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "banquet";
const DATABASE: &str = "main";

/// Database service, owner of the embedded database handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at the given directory and
    /// apply the schema definitions.
    pub async fn new(path: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Self::define_schema(&db).await?;

        tracing::info!(path = %path.display(), "Database connection established");

        Ok(Self { db })
    }

    /// Schema definitions.
    ///
    /// Tables stay schemaless (documents carry their own shape); only the
    /// uniqueness constraints the admin endpoints rely on are defined.
    async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        let statements = [
            "DEFINE INDEX IF NOT EXISTS admin_user_email ON TABLE admin_user FIELDS email UNIQUE",
            "DEFINE INDEX IF NOT EXISTS admin_user_username ON TABLE admin_user FIELDS username UNIQUE",
        ];

        for statement in statements {
            db.query(statement)
                .await
                .map_err(|e| AppError::database(format!("Schema definition failed: {e}")))?;
        }

        Ok(())
    }
}
