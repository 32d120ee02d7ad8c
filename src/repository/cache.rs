//! Query cache over a voucher repository.
//!
//! List pages are cached keyed by the exact query, by-id lookups by the
//! identifier. Any successful mutation drops every cached page so the next
//! `list` goes back to the backend; there is no optimistic merging of cached
//! results. Failed calls leave the cache untouched.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;

use crate::domain::types::VoucherId;
use crate::domain::voucher::{NewVoucher, UpdateVoucher, Voucher};
use crate::repository::errors::RepositoryResult;
use crate::repository::{VoucherListQuery, VoucherReader, VoucherWriter};

#[derive(Default)]
struct CacheState {
    lists: HashMap<VoucherListQuery, (usize, Vec<Voucher>)>,
    records: HashMap<VoucherId, Voucher>,
}

impl CacheState {
    fn invalidate_lists(&mut self) {
        if !self.lists.is_empty() {
            debug!("dropping {} cached voucher page(s)", self.lists.len());
        }
        self.lists.clear();
    }
}

/// Wraps any repository with a tagged read cache. Shared by `&` reference
/// between the controllers that read and the ones that write.
pub struct CachedVoucherRepository<R> {
    inner: R,
    state: Mutex<CacheState>,
}

impl<R> CachedVoucherRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        // The lock only guards in-process map access; a poisoned value is
        // still structurally sound.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: VoucherReader> VoucherReader for CachedVoucherRepository<R> {
    fn get_by_id(&self, id: VoucherId) -> RepositoryResult<Option<Voucher>> {
        if let Some(voucher) = self.state().records.get(&id) {
            return Ok(Some(voucher.clone()));
        }
        let fetched = self.inner.get_by_id(id)?;
        if let Some(voucher) = &fetched {
            self.state().records.insert(id, voucher.clone());
        }
        Ok(fetched)
    }

    fn list(&self, query: &VoucherListQuery) -> RepositoryResult<(usize, Vec<Voucher>)> {
        if let Some(hit) = self.state().lists.get(query) {
            return Ok(hit.clone());
        }
        let (total, items) = self.inner.list(query)?;
        let mut state = self.state();
        for voucher in &items {
            state.records.insert(voucher.id, voucher.clone());
        }
        state
            .lists
            .insert(query.clone(), (total, items.clone()));
        Ok((total, items))
    }
}

impl<R: VoucherWriter> VoucherWriter for CachedVoucherRepository<R> {
    fn create(&self, new_voucher: &NewVoucher) -> RepositoryResult<Voucher> {
        let created = self.inner.create(new_voucher)?;
        let mut state = self.state();
        state.invalidate_lists();
        state.records.insert(created.id, created.clone());
        Ok(created)
    }

    fn update(&self, id: VoucherId, updates: &UpdateVoucher) -> RepositoryResult<Voucher> {
        let updated = self.inner.update(id, updates)?;
        let mut state = self.state();
        state.invalidate_lists();
        state.records.insert(updated.id, updated.clone());
        Ok(updated)
    }

    fn delete(&self, id: VoucherId) -> RepositoryResult<()> {
        self.inner.delete(id)?;
        let mut state = self.state();
        state.invalidate_lists();
        state.records.remove(&id);
        Ok(())
    }
}
