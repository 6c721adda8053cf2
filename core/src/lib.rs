//! Catalog synchronization core for a PokeAPI-style REST backend.
//!
//! # Overview
//! Fetches paginated catalog pages and per-entry detail records, decodes them
//! into typed domain objects and publishes them as observable state for a
//! presentation layer to render.
//!
//! # Design
//! - `Fetcher` is the single fetch-and-decode primitive. It is built
//!   explicitly around a `Transport` and shared by `Arc`; there is no global
//!   client.
//! - `mapper` holds the pure response-to-domain functions: id extraction
//!   from resource URLs, unit conversion, type resolution, display names.
//! - `CatalogAccumulator` is the pagination state machine. Its commands take
//!   `&mut self`, so only one page fetch can be in flight per list.
//! - `DetailLoader` fetches and maps one entry per screen visit.
//! - State reaches observers through `Property` (latest value) and
//!   `EventStream` (one delivery per event) subscriptions.

pub mod accumulator;
pub mod client;
pub mod config;
pub mod detail;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod localize;
pub mod mapper;
pub mod model;
pub mod observable;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use accumulator::{CatalogAccumulator, CatalogCommand, CatalogHandle, CatalogObservers};
pub use client::CatalogClient;
pub use config::{CatalogConfig, PageFailurePolicy};
pub use detail::DetailLoader;
pub use error::{DataFetchFailure, FetchError};
pub use fetcher::Fetcher;
pub use http::{HttpRequest, HttpResponse, Transport};
pub use localize::{DictionaryLocalizer, NameLocalizer, NoLocalization};
pub use model::{CatalogItem, ItemDetail, TypeTag};
pub use observable::{EventStream, Property, Subscription};
pub use transport::UreqTransport;
pub use types::{CatalogEntryRef, CatalogPage, DetailRecord, NamedResource, TypeSlot};
