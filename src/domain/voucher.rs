use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{VoucherCode, VoucherId};

/// A discount voucher as known to both the admin panel and the backend.
///
/// `id` and `code` are immutable once the voucher exists; `used_count` is
/// maintained by the server and read-only here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub id: VoucherId,
    pub code: String,
    pub usage_limit: u32,
    #[serde(default)]
    pub used_count: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_free_shipping: bool,
}

/// Payload for creating a voucher. The server assigns `id` and starts
/// `used_count` at zero.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewVoucher {
    pub code: String,
    pub usage_limit: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_free_shipping: bool,
}

impl NewVoucher {
    #[must_use]
    pub fn new(
        code: VoucherCode,
        usage_limit: u32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        is_free_shipping: bool,
    ) -> Self {
        Self {
            code: code.into_inner(),
            usage_limit,
            start_date,
            end_date,
            is_free_shipping,
        }
    }
}

/// Payload for editing a voucher. The code cannot change after creation, so
/// it is absent here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVoucher {
    pub usage_limit: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_free_shipping: bool,
}

impl UpdateVoucher {
    #[must_use]
    pub fn new(
        usage_limit: u32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        is_free_shipping: bool,
    ) -> Self {
        Self {
            usage_limit,
            start_date,
            end_date,
            is_free_shipping,
        }
    }
}
