//! Core module: configuration, state and server wiring

pub mod config;
pub mod server;
pub mod state;

pub use config::{Branding, Config, MailConfig};
pub use server::{Server, build_app, build_router};
pub use state::ServerState;
