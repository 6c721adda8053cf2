//! Endpoint URL builder for the catalog API.
//!
//! # Design
//! `CatalogClient` holds only the API root and the resource name and carries
//! no mutable state. It knows where things live; it never touches the network
//! and never interprets responses. The fetcher does both.

use crate::config::CatalogConfig;

#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    resource: String,
}

impl CatalogClient {
    pub fn new(base_url: &str, resource: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            resource: resource.trim_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(&config.base_url, &config.resource)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{resource}?offset={offset}&limit={limit}`
    pub fn list_page_url(&self, offset: u32, limit: u32) -> String {
        format!(
            "{}/{}?offset={offset}&limit={limit}",
            self.base_url, self.resource
        )
    }

    /// `{base}/{resource}/{id}`
    pub fn detail_url(&self, id: u32) -> String {
        format!("{}/{}/{id}", self.base_url, self.resource)
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::from_config(&CatalogConfig::default())
    }
}
