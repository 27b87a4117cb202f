use sea_orm::DbErr;
use thiserror::Error;

/// Explicit outcome of a persistence call. Handlers decide the HTTP response
/// from the variant instead of catching exceptions mid-flight.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Database(#[from] DbErr),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
