//! Service layer: cross-cutting rules between handlers and storage

use common::error::DatabaseError;
use thiserror::Error;

pub mod catalog;
pub mod user;

pub use catalog::CatalogService;
pub use user::UserService;

/// Domain errors surfaced to the handlers
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("no rows")]
    NotFound,

    #[error("email already taken")]
    EmailTaken,

    #[error("wrong email or password")]
    WrongPassword,

    #[error("{0}")]
    Validation(String),

    #[error("cannot hash password: {0}")]
    Hashing(String),

    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NoRows => ServiceError::NotFound,
            DatabaseError::EmptyUpdate => {
                ServiceError::Validation("at least one field must be provided".to_string())
            }
            other => ServiceError::Database(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
