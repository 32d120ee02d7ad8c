//! REST repository backed by the storefront's admin API.
//!
//! Endpoints follow the backend's resource layout: `GET /vouchers` with
//! `page`/`limit`/`search` query parameters, and `POST`/`PUT`/`DELETE` on the
//! single-voucher routes. Non-2xx responses carry a `{"message": "..."}` body
//! whose text is surfaced to the user as-is.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde::Deserialize;

use crate::domain::types::{ApiBaseUrl, VoucherId};
use crate::domain::voucher::{NewVoucher, UpdateVoucher, Voucher};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{VoucherListQuery, VoucherReader, VoucherWriter};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VoucherListResponse {
    items: Vec<Voucher>,
    total_items: usize,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct HttpVoucherRepository {
    client: Client,
    base_url: String,
}

impl HttpVoucherRepository {
    pub fn new(base_url: ApiBaseUrl) -> RepositoryResult<Self> {
        Self::with_session(base_url, None)
    }

    /// Builds a client whose requests carry the given session cookie in
    /// addition to any cookies the backend sets along the way.
    pub fn with_session(
        base_url: ApiBaseUrl,
        session_cookie: Option<&str>,
    ) -> RepositoryResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| RepositoryError::Unexpected(format!("invalid session cookie: {e}")))?;
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into_inner(),
        })
    }

    fn vouchers_url(&self) -> String {
        format!("{}/vouchers", self.base_url)
    }

    fn voucher_url(&self, id: VoucherId) -> String {
        format!("{}/vouchers/{id}", self.base_url)
    }
}

/// Maps a non-2xx response to the message the backend supplied, falling back
/// to a generic one when the body is not the expected shape.
fn error_for(response: Response) -> RepositoryError {
    let status = response.status();
    match response.json::<ErrorBody>() {
        Ok(body) => RepositoryError::Remote(body.message),
        Err(_) => RepositoryError::Remote(format!("server returned HTTP {status}")),
    }
}

impl VoucherReader for HttpVoucherRepository {
    fn get_by_id(&self, id: VoucherId) -> RepositoryResult<Option<Voucher>> {
        let response = self.client.get(self.voucher_url(id)).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_for(response));
        }
        Ok(Some(response.json()?))
    }

    fn list(&self, query: &VoucherListQuery) -> RepositoryResult<(usize, Vec<Voucher>)> {
        let mut request = self.client.get(self.vouchers_url());
        if let Some(pagination) = &query.pagination {
            request = request.query(&[
                ("page", pagination.page),
                ("limit", pagination.per_page),
            ]);
        }
        if let Some(term) = &query.search {
            request = request.query(&[("search", term.as_str())]);
        }

        let response = request.send()?;
        if !response.status().is_success() {
            return Err(error_for(response));
        }
        let body: VoucherListResponse = response.json()?;
        Ok((body.total_items, body.items))
    }
}

impl VoucherWriter for HttpVoucherRepository {
    fn create(&self, new_voucher: &NewVoucher) -> RepositoryResult<Voucher> {
        let response = self
            .client
            .post(self.vouchers_url())
            .json(new_voucher)
            .send()?;
        if !response.status().is_success() {
            return Err(error_for(response));
        }
        Ok(response.json()?)
    }

    fn update(&self, id: VoucherId, updates: &UpdateVoucher) -> RepositoryResult<Voucher> {
        let response = self
            .client
            .put(self.voucher_url(id))
            .json(updates)
            .send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(RepositoryError::NotFound);
        }
        if !response.status().is_success() {
            return Err(error_for(response));
        }
        Ok(response.json()?)
    }

    fn delete(&self, id: VoucherId) -> RepositoryResult<()> {
        let response = self.client.delete(self.voucher_url(id)).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(RepositoryError::NotFound);
        }
        if !response.status().is_success() {
            return Err(error_for(response));
        }
        Ok(())
    }
}
