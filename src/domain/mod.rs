//! Domain layer - Business abstractions
//!
//! Repository traits, their input records, the book search filter and the
//! domain error type. No Axum here; SeaORM only appears through the row
//! types the traits hand back.

pub mod errors;
pub mod repositories;

pub use errors::DomainError;
pub use repositories::*;
