//! Form definitions backing the CRM routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod lead;
pub mod template;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid lead status")]
    InvalidStatus,

    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    #[error("row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("cannot read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("cannot read upload: {0}")]
    Io(#[from] std::io::Error),
}
