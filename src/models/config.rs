//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

#[derive(Clone, Debug, Deserialize)]
/// Settings for the admin console binary.
pub struct AdminConfig {
    /// Base URL of the storefront's admin API, e.g. `https://api.example.com/admin`.
    pub api_base_url: String,
    /// Session cookie forwarded with every request, e.g. `session=abc123`.
    #[serde(default)]
    pub session_cookie: Option<String>,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
}

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}
