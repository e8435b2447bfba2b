//! Banquet Server: catering back-office API
//!
//! # Overview
//!
//! Public marketing surface (menu browsing, contact-form intake) plus an
//! admin-gated back office:
//!
//! - **Events** (`api::events`): events with embedded sub-events and
//!   quotation / category-menu / billing PDF generation
//! - **Menu catalog** (`api::menu_items`): CRUD, search, bulk availability
//! - **Contact leads** (`api::contacts`): intake with best-effort operator
//!   notification, admin status lifecycle
//! - **Auth** (`auth`): JWT + argon2, uniform 401 semantics
//!
//! # Module structure
//!
//! ```text
//! banquet-server/src/
//! ├── core/        # Config, state, server wiring
//! ├── auth/        # JWT service, middleware, extractor
//! ├── api/         # HTTP routes and handlers
//! ├── db/          # Embedded SurrealDB, models, repositories
//! ├── documents/   # Document assembler (three HTML variants)
//! ├── pdf/         # Headless-browser rendering + terms append
//! ├── mail/        # Contact-lead notifications
//! └── utils/       # Errors, validation, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod documents;
pub mod mail;
pub mod pdf;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____                              __
   / __ )____ _____  ____ ___  _____ / /_
  / __  / __ `/ __ \/ __ `/ / / / _ \ __/
 / /_/ / /_/ / / / / /_/ / /_/ /  __/ /_
/_____/\__,_/_/ /_/\__, /\__,_/\___/\__/
                     /_/
    "#
    );
}
