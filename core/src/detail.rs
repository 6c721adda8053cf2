//! Single-shot loader for one catalog entry's detail record.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::client::CatalogClient;
use crate::error::FetchError;
use crate::fetcher::Fetcher;
use crate::http::Transport;
use crate::localize::{NameLocalizer, NoLocalization};
use crate::mapper::map_detail;
use crate::model::ItemDetail;
use crate::observable::{EventStream, Property};
use crate::types::DetailRecord;

/// Loads and publishes the detail of one entry.
///
/// A failed load publishes the error and leaves the previously published
/// detail (if any) untouched.
pub struct DetailLoader<T> {
    fetcher: Arc<Fetcher<T>>,
    client: CatalogClient,
    localizer: Arc<dyn NameLocalizer>,
    id: u32,
    detail: Property<Option<ItemDetail>>,
    loading: Property<bool>,
    errors: EventStream<FetchError>,
}

impl<T> fmt::Debug for DetailLoader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetailLoader")
            .field("client", &self.client)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> DetailLoader<T> {
    /// An idle loader; call `refresh` to load.
    pub fn new(fetcher: Arc<Fetcher<T>>, client: CatalogClient, id: u32) -> Self {
        Self {
            fetcher,
            client,
            localizer: Arc::new(NoLocalization),
            id,
            detail: Property::new(None),
            loading: Property::new(false),
            errors: EventStream::new(),
        }
    }

    /// Construct and perform the initial load. The outcome is already
    /// published when this returns.
    pub async fn open(
        fetcher: Arc<Fetcher<T>>,
        client: CatalogClient,
        id: u32,
        localizer: Arc<dyn NameLocalizer>,
    ) -> Self {
        let mut loader = Self::new(fetcher, client, id).with_localizer(localizer);
        // The error is on the stream; nothing else to do with it here.
        let _ = loader.refresh().await;
        loader
    }

    pub fn with_localizer(mut self, localizer: Arc<dyn NameLocalizer>) -> Self {
        self.localizer = localizer;
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn detail(&self) -> &Property<Option<ItemDetail>> {
        &self.detail
    }

    pub fn loading(&self) -> &Property<bool> {
        &self.loading
    }

    pub fn errors(&self) -> &EventStream<FetchError> {
        &self.errors
    }

    /// Fetch the record again and publish it.
    pub async fn refresh(&mut self) -> Result<ItemDetail, FetchError> {
        self.loading.set(true);
        let url = self.client.detail_url(self.id);
        debug!(id = self.id, "fetching detail");

        let result = match self.fetcher.fetch::<DetailRecord>(&url).await {
            Ok(record) => map_detail(&record, self.localizer.as_ref()),
            Err(err) => Err(err),
        };
        match &result {
            Ok(detail) => self.detail.set(Some(detail.clone())),
            Err(err) => {
                warn!(id = self.id, error = %err, "detail fetch failed");
                self.errors.emit(err.clone());
            },
        }
        self.loading.set(false);
        result
    }
}
