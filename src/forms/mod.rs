//! Form definitions backing the salon routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod hairstylists;
pub mod members;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid member id")]
    InvalidMemberId,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid WhatsApp number")]
    InvalidPhoneNumber,

    #[error("invalid Instagram handle")]
    InvalidInstagramHandle,

    #[error("invalid visit date, expected YYYY-MM-DD")]
    InvalidVisitDate,

    #[error("invalid CSV file: {0}")]
    Csv(String),
}

/// Treats blank optional inputs as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
