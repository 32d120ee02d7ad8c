//! In-memory voucher repository used by tests and offline demos.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::types::VoucherId;
use crate::domain::voucher::{NewVoucher, UpdateVoucher, Voucher};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{VoucherListQuery, VoucherReader, VoucherWriter};

struct MemState {
    next_id: i32,
    vouchers: Vec<Voucher>,
    fail_next: Option<String>,
}

/// Behaves like the backend: assigns identifiers, rejects duplicate codes,
/// filters and paginates list queries.
pub struct InMemoryVoucherRepository {
    state: Mutex<MemState>,
}

impl InMemoryVoucherRepository {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    pub fn seeded(vouchers: Vec<Voucher>) -> Self {
        let next_id = vouchers.iter().map(|v| v.id.get()).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(MemState {
                next_id,
                vouchers,
                fail_next: None,
            }),
        }
    }

    /// Makes the next repository call fail with a backend-style message.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.state().fail_next = Some(message.into());
    }

    fn state(&self) -> MutexGuard<'_, MemState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryVoucherRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn take_failure(state: &mut MemState) -> RepositoryResult<()> {
    match state.fail_next.take() {
        Some(message) => Err(RepositoryError::Remote(message)),
        None => Ok(()),
    }
}

impl VoucherReader for InMemoryVoucherRepository {
    fn get_by_id(&self, id: VoucherId) -> RepositoryResult<Option<Voucher>> {
        let mut state = self.state();
        take_failure(&mut state)?;
        Ok(state.vouchers.iter().find(|v| v.id == id).cloned())
    }

    fn list(&self, query: &VoucherListQuery) -> RepositoryResult<(usize, Vec<Voucher>)> {
        let mut state = self.state();
        take_failure(&mut state)?;

        let matches: Vec<&Voucher> = state
            .vouchers
            .iter()
            .filter(|v| match &query.search {
                Some(term) => v.code.to_lowercase().contains(&term.to_lowercase()),
                None => true,
            })
            .collect();
        let total = matches.len();

        let items = match &query.pagination {
            Some(pagination) => {
                let start = pagination.page.saturating_sub(1) * pagination.per_page;
                matches
                    .into_iter()
                    .skip(start)
                    .take(pagination.per_page)
                    .cloned()
                    .collect()
            }
            None => matches.into_iter().cloned().collect(),
        };

        Ok((total, items))
    }
}

impl VoucherWriter for InMemoryVoucherRepository {
    fn create(&self, new_voucher: &NewVoucher) -> RepositoryResult<Voucher> {
        let mut state = self.state();
        take_failure(&mut state)?;

        if state.vouchers.iter().any(|v| v.code == new_voucher.code) {
            return Err(RepositoryError::Remote(
                "a voucher with this code already exists".to_string(),
            ));
        }

        let id = VoucherId::new(state.next_id)
            .map_err(|e| RepositoryError::Unexpected(e.to_string()))?;
        state.next_id += 1;

        let voucher = Voucher {
            id,
            code: new_voucher.code.clone(),
            usage_limit: new_voucher.usage_limit,
            used_count: 0,
            start_date: new_voucher.start_date,
            end_date: new_voucher.end_date,
            is_free_shipping: new_voucher.is_free_shipping,
        };
        state.vouchers.push(voucher.clone());
        Ok(voucher)
    }

    fn update(&self, id: VoucherId, updates: &UpdateVoucher) -> RepositoryResult<Voucher> {
        let mut state = self.state();
        take_failure(&mut state)?;

        let voucher = state
            .vouchers
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(RepositoryError::NotFound)?;
        voucher.usage_limit = updates.usage_limit;
        voucher.start_date = updates.start_date;
        voucher.end_date = updates.end_date;
        voucher.is_free_shipping = updates.is_free_shipping;
        Ok(voucher.clone())
    }

    fn delete(&self, id: VoucherId) -> RepositoryResult<()> {
        let mut state = self.state();
        take_failure(&mut state)?;

        let before = state.vouchers.len();
        state.vouchers.retain(|v| v.id != id);
        if state.vouchers.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
