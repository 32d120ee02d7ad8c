use serde::Serialize;

use crate::domain::voucher::Voucher;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, clamp_page, total_pages};
use crate::repository::VoucherListQuery;
use crate::repository::errors::RepositoryResult;

/// What the voucher table should render right now.
///
/// `Loading` means no data has arrived yet (or the user retried after a
/// failure); `Failed` keeps the last good rows on screen next to the error;
/// `Loaded` includes the explicit empty list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStatus {
    Loading,
    Loaded,
    Failed,
}

/// Pagination and search state for the voucher table.
///
/// Mutators return the query to run next, or `None` when no request is
/// needed; responses come back through [`VoucherList::apply`].
#[derive(Debug)]
pub struct VoucherList {
    page: usize,
    per_page: usize,
    search: Option<String>,
    total_items: Option<usize>,
    items: Vec<Voucher>,
    status: ListStatus,
    error: Option<String>,
}

impl VoucherList {
    pub fn new(per_page: usize) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            search: None,
            total_items: None,
            items: Vec::new(),
            status: ListStatus::Loading,
            error: None,
        }
    }

    /// The request matching the current page, page size and search string.
    pub fn query(&self) -> VoucherListQuery {
        let mut query = VoucherListQuery::new().paginate(self.page, self.per_page);
        if let Some(term) = &self.search {
            query = query.search(term.clone());
        }
        query
    }

    /// Moves to `page`, clamped against the last known page count. Returns
    /// `None` when the clamped target is the page already shown.
    pub fn set_page(&mut self, page: usize) -> Option<VoucherListQuery> {
        let target = match self.total_items {
            Some(total) => clamp_page(page, total_pages(total, self.per_page)),
            None => page.max(1),
        };
        if target == self.page && self.status != ListStatus::Failed {
            return None;
        }
        self.page = target;
        Some(self.begin_fetch())
    }

    /// Changes the page size; the view always restarts from the first page.
    pub fn set_per_page(&mut self, per_page: usize) -> Option<VoucherListQuery> {
        self.per_page = per_page.max(1);
        self.page = 1;
        Some(self.begin_fetch())
    }

    /// Commits a new search string (explicit submit, not per keystroke) and
    /// restarts from the first page. An empty term clears the filter.
    pub fn search(&mut self, term: &str) -> Option<VoucherListQuery> {
        let term = term.trim();
        self.search = if term.is_empty() {
            None
        } else {
            Some(term.to_string())
        };
        self.page = 1;
        Some(self.begin_fetch())
    }

    /// Re-issues the current query, e.g. after a mutation elsewhere.
    pub fn refetch(&mut self) -> VoucherListQuery {
        self.begin_fetch()
    }

    fn begin_fetch(&mut self) -> VoucherListQuery {
        // A retry from the failed state renders as loading again; a refresh
        // with data present keeps the last good rows on screen.
        if self.total_items.is_none() || self.status == ListStatus::Failed {
            self.status = ListStatus::Loading;
        }
        self.error = None;
        self.query()
    }

    /// Feeds a response back in. Returns a follow-up query when the reported
    /// total leaves the current page out of range (e.g. the last row of the
    /// last page was just deleted); the out-of-range items are never shown.
    pub fn apply(
        &mut self,
        result: RepositoryResult<(usize, Vec<Voucher>)>,
    ) -> Option<VoucherListQuery> {
        match result {
            Ok((total, items)) => {
                self.total_items = Some(total);
                let pages = total_pages(total, self.per_page);
                if self.page > pages {
                    self.page = pages;
                    return Some(self.query());
                }
                self.items = items;
                self.status = ListStatus::Loaded;
                self.error = None;
                None
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.status = ListStatus::Failed;
                None
            }
        }
    }

    pub fn items(&self) -> &[Voucher] {
        &self.items
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn total_items(&self) -> Option<usize> {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items.unwrap_or(0), self.per_page)
    }

    pub fn status(&self) -> ListStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn search_query(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

impl Default for VoucherList {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}
