// Editing sessions: one owned ResumeRecord per session, mutated only through
// RecordMutation and read back together with completeness and field warnings.

pub mod completeness;
pub mod handlers;
pub mod mutation;
pub mod store;
pub mod validation;

use uuid::Uuid;

use crate::errors::AppError;

pub use store::{Session, SessionStore};

pub(crate) fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
