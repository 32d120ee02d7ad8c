//! Draft state and validation backing the voucher editor dialog.

use thiserror::Error;

pub mod voucher;

/// Errors raised by local validation before a draft may be submitted.
///
/// Validation stops at the first failing rule; the rules run in the order the
/// variants are declared here.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("code must not be empty")]
    EmptyCode,

    #[error("usage limit must be a whole number of at least 1")]
    InvalidUsageLimit,

    #[error("start and end dates are both required")]
    MissingDates,

    #[error("end date must not be before start date")]
    EndBeforeStart,
}
