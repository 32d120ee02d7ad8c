//! Access to the voucher resource behind reader/writer traits.
//!
//! The traits keep the controllers and services independent of the transport:
//! the same code runs against the REST backend, the caching wrapper, the
//! in-memory fake, or a mock.

use crate::domain::types::VoucherId;
use crate::domain::voucher::{NewVoucher, UpdateVoucher, Voucher};
use crate::repository::errors::RepositoryResult;

pub mod cache;
pub mod errors;
#[cfg(feature = "http")]
pub mod http;
pub mod mem;
#[cfg(feature = "test-mocks")]
pub mod mock;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Parameters of one voucher list request. Also serves as the cache key for
/// the corresponding result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VoucherListQuery {
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl VoucherListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait VoucherReader {
    fn get_by_id(&self, id: VoucherId) -> RepositoryResult<Option<Voucher>>;
    /// Returns the total number of matching vouchers together with the
    /// requested page of items.
    fn list(&self, query: &VoucherListQuery) -> RepositoryResult<(usize, Vec<Voucher>)>;
}

pub trait VoucherWriter {
    fn create(&self, new_voucher: &NewVoucher) -> RepositoryResult<Voucher>;
    fn update(&self, id: VoucherId, updates: &UpdateVoucher) -> RepositoryResult<Voucher>;
    fn delete(&self, id: VoucherId) -> RepositoryResult<()>;
}
