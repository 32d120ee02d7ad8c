//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;

use milkstore_admin::domain::types::VoucherId;
use milkstore_admin::domain::voucher::{NewVoucher, UpdateVoucher, Voucher};
use milkstore_admin::repository::errors::RepositoryResult;
use milkstore_admin::repository::{VoucherListQuery, VoucherReader, VoucherWriter};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn voucher(id: i32, code: &str) -> Voucher {
    Voucher {
        id: VoucherId::new(id).expect("valid id"),
        code: code.to_string(),
        usage_limit: 100,
        used_count: 0,
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        is_free_shipping: false,
    }
}

/// `count` vouchers with codes CODE01, CODE02, ...
pub fn seed(count: usize) -> Vec<Voucher> {
    (1..=count)
        .map(|i| voucher(i as i32, &format!("CODE{i:02}")))
        .collect()
}

/// Forwards to the wrapped repository while counting every call.
pub struct Recording<R> {
    inner: R,
    lists: AtomicUsize,
    gets: AtomicUsize,
    creates: AtomicUsize,
    updates: AtomicUsize,
    deletes: AtomicUsize,
}

impl<R> Recording<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            lists: AtomicUsize::new(0),
            gets: AtomicUsize::new(0),
            creates: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn list_calls(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn mutation_calls(&self) -> usize {
        self.create_calls() + self.update_calls() + self.delete_calls()
    }
}

impl<R: VoucherReader> VoucherReader for Recording<R> {
    fn get_by_id(&self, id: VoucherId) -> RepositoryResult<Option<Voucher>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get_by_id(id)
    }

    fn list(&self, query: &VoucherListQuery) -> RepositoryResult<(usize, Vec<Voucher>)> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.inner.list(query)
    }
}

impl<R: VoucherWriter> VoucherWriter for Recording<R> {
    fn create(&self, new_voucher: &NewVoucher) -> RepositoryResult<Voucher> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create(new_voucher)
    }

    fn update(&self, id: VoucherId, updates: &UpdateVoucher) -> RepositoryResult<Voucher> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update(id, updates)
    }

    fn delete(&self, id: VoucherId) -> RepositoryResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(id)
    }
}
