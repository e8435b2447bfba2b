use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// Every knob can be overridden through the environment:
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Working directory (database, assets, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | COMPANY_NAME | Banquet Caterers | Branding used on generated documents |
/// | COMPANY_TAGLINE | Professional Catering Services | Document tagline |
/// | COMPANY_PHONES | (empty) | Comma-separated contact numbers |
/// | SMTP_HOST / SMTP_USERNAME / SMTP_PASSWORD | (unset) | Lead notification mail |
/// | MAIL_FROM / MAIL_NOTIFY_TO | (unset) | Sender / operator addresses |
/// | ADMIN_EMAIL / ADMIN_PASSWORD | (unset) | First-run admin bootstrap |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/var/lib/banquet HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database, document assets and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Branding applied to generated documents
    pub branding: Branding,
    /// Lead-notification mail settings
    pub mail: MailConfig,
    /// First-run admin bootstrap credentials
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

/// Company branding rendered into document headers
#[derive(Debug, Clone)]
pub struct Branding {
    pub company_name: String,
    pub tagline: String,
    pub phones: Vec<String>,
}

/// SMTP settings for best-effort contact-lead notifications
///
/// Mail is disabled unless host, credentials and both addresses are present.
#[derive(Debug, Clone, Default)]
pub struct MailConfig {
    pub smtp_host: Option<String>,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub from_address: Option<String>,
    pub notify_to: Option<String>,
}

impl MailConfig {
    fn from_env() -> Self {
        Self {
            smtp_host: std::env::var("SMTP_HOST").ok(),
            smtp_username: std::env::var("SMTP_USERNAME").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            from_address: std::env::var("MAIL_FROM").ok(),
            notify_to: std::env::var("MAIL_NOTIFY_TO").ok(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            branding: Branding {
                company_name: std::env::var("COMPANY_NAME")
                    .unwrap_or_else(|_| "Banquet Caterers".into()),
                tagline: std::env::var("COMPANY_TAGLINE")
                    .unwrap_or_else(|_| "Professional Catering Services".into()),
                phones: std::env::var("COMPANY_PHONES")
                    .map(|v| {
                        v.split(',')
                            .map(|p| p.trim().to_string())
                            .filter(|p| !p.is_empty())
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            mail: MailConfig::from_env(),
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        }
    }

    /// Override the volatile parts of the configuration.
    ///
    /// Used by tests to point the server at a temporary directory.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Database directory: `WORK_DIR/database`
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Document assets directory (logo, terms PDF): `WORK_DIR/assets`
    pub fn assets_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("assets")
    }

    /// Ensure the working directory structure exists
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.assets_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
