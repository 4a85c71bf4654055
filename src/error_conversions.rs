//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service or repository error types, so
//! the conversions out of [`TypeConstraintError`] live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<TypeConstraintError> for crate::services::ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        crate::services::ServiceError::TypeConstraint(val.to_string())
    }
}
