//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, normalized
//! voucher codes, well-formed base URLs) so that once a value reaches the
//! domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided url failed format validation.
    #[error("invalid url address")]
    InvalidUrl,
}

/// Unique identifier for a voucher.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct VoucherId(i32);

impl VoucherId {
    /// Creates a new identifier ensuring it is greater than zero.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveId)
        }
    }

    /// Returns the raw `i32` backing this identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for VoucherId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for VoucherId {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VoucherId> for i32 {
    fn from(value: VoucherId) -> Self {
        value.0
    }
}

/// Voucher code as printed on promo material: trimmed, upper-cased, never
/// empty. Immutable once the voucher exists.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct VoucherCode(String);

impl VoucherCode {
    /// Normalizes the raw input and rejects empty codes.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = value.into().trim().to_uppercase();
        if normalized.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(normalized))
    }

    /// Borrow the code as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for VoucherCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for VoucherCode {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for VoucherCode {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VoucherCode> for String {
    fn from(value: VoucherCode) -> Self {
        value.0
    }
}

/// Validated base URL of the storefront's admin API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ApiBaseUrl(String);

impl ApiBaseUrl {
    /// Ensures a trimmed URL is non-empty and well-formed before wrapping.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if !trimmed.as_str().validate_url() {
            return Err(TypeConstraintError::InvalidUrl);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the URL as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the owned URL.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ApiBaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ApiBaseUrl {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ApiBaseUrl {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ApiBaseUrl> for String {
    fn from(value: ApiBaseUrl) -> Self {
        value.0
    }
}
