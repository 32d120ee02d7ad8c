use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::types::VoucherCode;
use crate::domain::voucher::{NewVoucher, UpdateVoucher, Voucher};
use crate::forms::ValidationError;

/// Names of the editable voucher fields, used for touch tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VoucherFieldName {
    Code,
    UsageLimit,
    StartDate,
    EndDate,
    FreeShipping,
}

/// A single field assignment coming from the editor.
///
/// The set of assignable fields is closed: an unknown field name is a type
/// error, not a silent no-op.
#[derive(Clone, Debug, PartialEq)]
pub enum VoucherField {
    Code(String),
    /// Raw text as typed; parsed during validation.
    UsageLimit(String),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    FreeShipping(bool),
}

impl VoucherField {
    pub fn name(&self) -> VoucherFieldName {
        match self {
            VoucherField::Code(_) => VoucherFieldName::Code,
            VoucherField::UsageLimit(_) => VoucherFieldName::UsageLimit,
            VoucherField::StartDate(_) => VoucherFieldName::StartDate,
            VoucherField::EndDate(_) => VoucherFieldName::EndDate,
            VoucherField::FreeShipping(_) => VoucherFieldName::FreeShipping,
        }
    }
}

/// The in-progress, not-yet-submitted copy of a voucher's fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VoucherDraft {
    pub code: String,
    /// Kept as entered so a non-numeric value surfaces as a validation
    /// message rather than being coerced away.
    pub usage_limit: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_free_shipping: bool,
}

impl VoucherDraft {
    pub fn apply(&mut self, field: VoucherField) {
        match field {
            VoucherField::Code(code) => self.code = code,
            VoucherField::UsageLimit(limit) => self.usage_limit = limit,
            VoucherField::StartDate(date) => self.start_date = date,
            VoucherField::EndDate(date) => self.end_date = date,
            VoucherField::FreeShipping(flag) => self.is_free_shipping = flag,
        }
    }

    /// Checks the draft and returns the first failing rule, or the parsed
    /// field values ready for submission.
    pub fn validate(&self) -> Result<ValidatedVoucher, ValidationError> {
        let code = VoucherCode::new(&self.code).map_err(|_| ValidationError::EmptyCode)?;

        let usage_limit = self
            .usage_limit
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|limit| *limit >= 1)
            .ok_or(ValidationError::InvalidUsageLimit)?;

        let (start_date, end_date) = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(ValidationError::MissingDates),
        };

        if end_date < start_date {
            return Err(ValidationError::EndBeforeStart);
        }

        Ok(ValidatedVoucher {
            code,
            usage_limit,
            start_date,
            end_date,
            is_free_shipping: self.is_free_shipping,
        })
    }
}

impl From<&Voucher> for VoucherDraft {
    /// Snapshot an existing record into an editable draft.
    fn from(voucher: &Voucher) -> Self {
        Self {
            code: voucher.code.clone(),
            usage_limit: voucher.usage_limit.to_string(),
            start_date: Some(voucher.start_date),
            end_date: Some(voucher.end_date),
            is_free_shipping: voucher.is_free_shipping,
        }
    }
}

/// A draft that passed every validation rule.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedVoucher {
    pub code: VoucherCode,
    pub usage_limit: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_free_shipping: bool,
}

impl ValidatedVoucher {
    pub fn into_new(self) -> NewVoucher {
        NewVoucher::new(
            self.code,
            self.usage_limit,
            self.start_date,
            self.end_date,
            self.is_free_shipping,
        )
    }

    pub fn into_update(self) -> UpdateVoucher {
        UpdateVoucher::new(
            self.usage_limit,
            self.start_date,
            self.end_date,
            self.is_free_shipping,
        )
    }
}
