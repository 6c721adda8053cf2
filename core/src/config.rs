//! Configuration for catalog construction.

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_RESOURCE: &str = "pokemon";
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// What the page counter does when `fetch_next_page` fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageFailurePolicy {
    /// Restore the counter so the next call retries the same offset.
    #[default]
    Rollback,
    /// Keep the incremented counter; the failed page is skipped for good.
    Skip,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API root, e.g. `https://pokeapi.co/api/v2`.
    pub base_url: String,
    /// Collection path under `base_url`.
    pub resource: String,
    pub page_size: u32,
    pub failure_policy: PageFailurePolicy,
}

impl CatalogConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            resource: DEFAULT_RESOURCE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            failure_policy: PageFailurePolicy::default(),
        }
    }
}
