//! Operations composing the controllers with a repository.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod vouchers;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("voucher not found")]
    NotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
