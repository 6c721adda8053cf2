//! Response models for the PokeAPI list and detail endpoints.
//!
//! # Design
//! These mirror the wire shape and nothing more. Unknown fields are ignored
//! (the real detail payload is enormous); every field listed here is
//! required, so a payload missing one fails decoding as a whole.

use serde::{Deserialize, Serialize};

/// One page of `GET /{resource}?offset=&limit=`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogPage {
    pub count: u32,
    /// Opaque cursor. Only its presence matters.
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<CatalogEntryRef>,
}

/// A named link to one catalog resource. The id is only encoded in `url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntryRef {
    pub name: String,
    pub url: String,
}

/// `GET /{resource}/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetailRecord {
    pub id: u32,
    pub name: String,
    /// Decimeters.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub types: Vec<TypeSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedResource {
    pub name: String,
}
