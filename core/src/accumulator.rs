//! Pagination state machine for the catalog list.
//!
//! # Design
//! `CatalogAccumulator` owns the page counter and the accumulated item list.
//! Both commands take `&mut self`, so one instance can never have two fetches
//! in flight: overlapping appends are ruled out at compile time rather than by
//! a runtime guard.
//!
//! ```text
//! Idle(page, items) --refresh/next--> Loading --ok--> Idle(page', items')
//!                                             \--err-> Idle(page'', items) + error event
//! ```
//!
//! Every fetch publishes `loading = true` before the request and
//! `loading = false` after its outcome has been published, success or not.
//!
//! For callers that cannot hold `&mut`, `spawn` moves the accumulator into a
//! task that drains a command queue one command at a time. That task is the
//! single writer for all list state.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::client::CatalogClient;
use crate::config::{CatalogConfig, PageFailurePolicy};
use crate::error::FetchError;
use crate::fetcher::Fetcher;
use crate::http::Transport;
use crate::localize::{NameLocalizer, NoLocalization};
use crate::mapper::map_page;
use crate::model::CatalogItem;
use crate::observable::{EventStream, Property};
use crate::types::CatalogPage;

/// Observable state of one catalog list.
#[derive(Debug, Clone)]
pub struct CatalogObservers {
    pub items: Property<Vec<CatalogItem>>,
    pub loading: Property<bool>,
    pub errors: EventStream<FetchError>,
}

impl CatalogObservers {
    fn new() -> Self {
        Self {
            items: Property::new(Vec::new()),
            loading: Property::new(false),
            errors: EventStream::new(),
        }
    }
}

pub struct CatalogAccumulator<T> {
    fetcher: Arc<Fetcher<T>>,
    client: CatalogClient,
    localizer: Arc<dyn NameLocalizer>,
    page_size: u32,
    failure_policy: PageFailurePolicy,
    page: u32,
    total_count: Option<u32>,
    has_next_page: bool,
    observers: CatalogObservers,
}

impl<T> fmt::Debug for CatalogAccumulator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogAccumulator")
            .field("client", &self.client)
            .field("page_size", &self.page_size)
            .field("failure_policy", &self.failure_policy)
            .field("page", &self.page)
            .field("total_count", &self.total_count)
            .field("has_next_page", &self.has_next_page)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> CatalogAccumulator<T> {
    /// An idle accumulator at page 0 with no items. Nothing is fetched yet.
    pub fn new(fetcher: Arc<Fetcher<T>>, config: &CatalogConfig) -> Self {
        Self {
            fetcher,
            client: CatalogClient::from_config(config),
            localizer: Arc::new(NoLocalization),
            page_size: config.page_size,
            failure_policy: config.failure_policy,
            page: 0,
            total_count: None,
            has_next_page: false,
            observers: CatalogObservers::new(),
        }
    }

    pub fn with_localizer(mut self, localizer: Arc<dyn NameLocalizer>) -> Self {
        self.localizer = localizer;
        self
    }

    pub fn items(&self) -> &Property<Vec<CatalogItem>> {
        &self.observers.items
    }

    pub fn loading(&self) -> &Property<bool> {
        &self.observers.loading
    }

    pub fn errors(&self) -> &EventStream<FetchError> {
        &self.observers.errors
    }

    pub fn observers(&self) -> CatalogObservers {
        self.observers.clone()
    }

    /// Zero-based index of the last page requested.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// `count` from the most recent successful page.
    pub fn total_count(&self) -> Option<u32> {
        self.total_count
    }

    /// Whether the most recent successful page carried a `next` cursor.
    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// Start over from offset 0, replacing the list.
    ///
    /// Returns how many items the first page contributed.
    pub async fn refresh(&mut self) -> Result<usize, FetchError> {
        self.page = 0;
        self.total_count = None;
        self.has_next_page = false;
        self.observers.items.set(Vec::new());

        let result = self.load_page(0).await;
        if let Ok(items) = &result {
            self.observers.items.set(items.clone());
        }
        self.observers.loading.set(false);
        result.map(|items| items.len())
    }

    /// Fetch the page after the current one and append its items.
    ///
    /// Returns how many items were appended. Entries without a usable id are
    /// not counted.
    pub async fn fetch_next_page(&mut self) -> Result<usize, FetchError> {
        self.page += 1;
        let page = self.page;

        let result = self.load_page(page).await;
        match &result {
            Ok(items) => {
                self.observers.items.update(|current| {
                    let mut next = Vec::with_capacity(current.len() + items.len());
                    next.extend_from_slice(current);
                    next.extend_from_slice(items);
                    next
                });
            },
            Err(_) => {
                if self.failure_policy == PageFailurePolicy::Rollback {
                    self.page -= 1;
                }
            },
        }
        self.observers.loading.set(false);
        result.map(|items| items.len())
    }

    /// Publish `loading = true`, fetch and map one page. Errors are emitted
    /// here; clearing the loading flag is left to the caller so it happens
    /// after the items are published.
    async fn load_page(&mut self, page: u32) -> Result<Vec<CatalogItem>, FetchError> {
        let offset = page.saturating_mul(self.page_size);
        let url = self.client.list_page_url(offset, self.page_size);
        self.observers.loading.set(true);
        debug!(page, offset, limit = self.page_size, "fetching catalog page");

        match self.fetcher.fetch::<CatalogPage>(&url).await {
            Ok(response) => {
                self.total_count = Some(response.count);
                self.has_next_page = response.next.is_some();
                let items = map_page(&response, self.localizer.as_ref());
                debug!(
                    page,
                    received = response.results.len(),
                    kept = items.len(),
                    "catalog page mapped"
                );
                Ok(items)
            },
            Err(err) => {
                warn!(page, offset, error = %err, "catalog page fetch failed");
                self.observers.errors.emit(err.clone());
                Err(err)
            },
        }
    }
}

/// Commands accepted by a spawned accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogCommand {
    Refresh,
    NextPage,
}

/// Handle to an accumulator running on its own task.
///
/// Commands are queued and executed strictly one after another. Dropping the
/// last handle stops the task once the queue is drained.
#[derive(Debug, Clone)]
pub struct CatalogHandle {
    commands: mpsc::UnboundedSender<CatalogCommand>,
    observers: CatalogObservers,
}

impl CatalogHandle {
    /// Queue a command. Returns `false` if the task has stopped.
    pub fn send(&self, command: CatalogCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    pub fn refresh(&self) -> bool {
        self.send(CatalogCommand::Refresh)
    }

    pub fn fetch_next_page(&self) -> bool {
        self.send(CatalogCommand::NextPage)
    }

    pub fn items(&self) -> &Property<Vec<CatalogItem>> {
        &self.observers.items
    }

    pub fn loading(&self) -> &Property<bool> {
        &self.observers.loading
    }

    pub fn errors(&self) -> &EventStream<FetchError> {
        &self.observers.errors
    }
}

impl<T: Transport + 'static> CatalogAccumulator<T> {
    /// Move the accumulator onto a tokio task driven by a command queue.
    pub fn spawn(self) -> CatalogHandle {
        let (commands, rx) = mpsc::unbounded_channel();
        let handle = CatalogHandle {
            commands,
            observers: self.observers(),
        };
        tokio::spawn(self.run(rx));
        handle
    }

    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<CatalogCommand>) {
        while let Some(command) = commands.recv().await {
            let result = match command {
                CatalogCommand::Refresh => self.refresh().await,
                CatalogCommand::NextPage => self.fetch_next_page().await,
            };
            // Failures already went out on the error stream.
            if let Ok(added) = result {
                debug!(?command, added, page = self.page, "catalog command done");
            }
        }
        info!("catalog command queue closed");
    }
}
