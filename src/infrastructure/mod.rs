//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - HTTP server setup (server)
//! - Repository implementations (repositories)
//! - Transaction handling for multi-row writes (unit_of_work)
//! - Application state (state)

pub mod repositories;
pub mod server;
pub mod state;
pub mod unit_of_work;

pub use repositories::*;
pub use state::AppState;
