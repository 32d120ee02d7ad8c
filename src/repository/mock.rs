//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::types::VoucherId;
use crate::domain::voucher::{NewVoucher, UpdateVoucher, Voucher};
use crate::repository::errors::RepositoryResult;
use crate::repository::{VoucherListQuery, VoucherReader, VoucherWriter};

mock! {
    pub Repository {}

    impl VoucherReader for Repository {
        fn get_by_id(&self, id: VoucherId) -> RepositoryResult<Option<Voucher>>;
        fn list(&self, query: &VoucherListQuery) -> RepositoryResult<(usize, Vec<Voucher>)>;
    }

    impl VoucherWriter for Repository {
        fn create(&self, new_voucher: &NewVoucher) -> RepositoryResult<Voucher>;
        fn update(&self, id: VoucherId, updates: &UpdateVoucher) -> RepositoryResult<Voucher>;
        fn delete(&self, id: VoucherId) -> RepositoryResult<()>;
    }
}
