use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::debug;

pub const API_PREFIX: &str = "/api/v2";
pub const DEFAULT_LIMIT: u32 = 20;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListPage {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<ListEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeName {
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: TypeName,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub types: Vec<TypeSlot>,
}

impl Pokemon {
    pub fn new(id: u32, name: &str, height: u32, weight: u32, types: &[&str]) -> Self {
        Self {
            id,
            name: name.to_string(),
            height,
            weight,
            types: types
                .iter()
                .zip(1..)
                .map(|(name, slot)| TypeSlot {
                    slot,
                    kind: TypeName {
                        name: name.to_string(),
                    },
                })
                .collect(),
        }
    }
}

const STARTERS: [(u32, &str, u32, u32, &[&str]); 9] = [
    (1, "bulbasaur", 7, 69, &["grass", "poison"]),
    (2, "ivysaur", 10, 130, &["grass", "poison"]),
    (3, "venusaur", 20, 1000, &["grass", "poison"]),
    (4, "charmander", 6, 85, &["fire"]),
    (5, "charmeleon", 11, 190, &["fire"]),
    (6, "charizard", 17, 905, &["fire", "flying"]),
    (7, "squirtle", 5, 90, &["water"]),
    (8, "wartortle", 10, 225, &["water"]),
    (9, "blastoise", 16, 855, &["water"]),
];

/// The data set served by the mock API.
///
/// Entries are listed in insertion order. Offsets in `failing_offsets` answer
/// list requests with 500, and ids in `malformed_urls` are listed with a
/// resource URL whose last segment is the name instead of the id.
#[derive(Clone, Debug, Default)]
pub struct Dex {
    pub pokemon: Vec<Pokemon>,
    pub failing_offsets: HashSet<u32>,
    pub malformed_urls: HashSet<u32>,
}

impl Dex {
    /// The nine Kanto starters with their real measurements.
    pub fn starters() -> Self {
        Self {
            pokemon: STARTERS
                .iter()
                .map(|(id, name, height, weight, types)| {
                    Pokemon::new(*id, name, *height, *weight, types)
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Starters padded with synthetic `normal` entries up to `count`.
    pub fn with_count(count: u32) -> Self {
        let mut dex = Self::starters();
        dex.pokemon.truncate(count as usize);
        let next_id = dex.pokemon.len() as u32 + 1;
        for id in next_id..=count {
            dex.pokemon
                .push(Pokemon::new(id, &format!("specimen-{id}"), 10, 100, &["normal"]));
        }
        dex
    }

    pub fn fail_offset(mut self, offset: u32) -> Self {
        self.failing_offsets.insert(offset);
        self
    }

    pub fn malform_url(mut self, id: u32) -> Self {
        self.malformed_urls.insert(id);
        self
    }

    fn page(&self, public_url: &str, offset: u32, limit: u32) -> ListPage {
        let count = self.pokemon.len() as u32;
        let resource = format!("{public_url}{API_PREFIX}/pokemon");
        let results = self
            .pokemon
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|p| {
                let segment = if self.malformed_urls.contains(&p.id) {
                    p.name.clone()
                } else {
                    p.id.to_string()
                };
                ListEntry {
                    name: p.name.clone(),
                    url: format!("{resource}/{segment}/"),
                }
            })
            .collect();

        let end = offset.saturating_add(limit);
        ListPage {
            count,
            next: (end < count).then(|| format!("{resource}?offset={end}&limit={limit}")),
            previous: (offset > 0).then(|| {
                format!("{resource}?offset={}&limit={limit}", offset.saturating_sub(limit))
            }),
            results,
        }
    }
}

#[derive(Clone, Debug)]
struct AppState {
    dex: Arc<Dex>,
    public_url: String,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    offset: u32,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Router serving `dex`. `public_url` prefixes every URL placed in a body.
pub fn app(dex: Dex, public_url: &str) -> Router {
    let state = AppState {
        dex: Arc::new(dex),
        public_url: public_url.trim_end_matches('/').to_string(),
    };
    Router::new()
        .route(&format!("{API_PREFIX}/pokemon"), get(list_pokemon))
        .route(&format!("{API_PREFIX}/pokemon/{{id}}"), get(get_pokemon))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Dex::starters()).await
}

pub async fn run_with(listener: TcpListener, dex: Dex) -> Result<(), std::io::Error> {
    let public_url = format!("http://{}", listener.local_addr()?);
    axum::serve(listener, app(dex, &public_url)).await
}

async fn list_pokemon(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ListPage>, StatusCode> {
    debug!(offset = query.offset, limit = query.limit, "list request");
    if state.dex.failing_offsets.contains(&query.offset) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(state.dex.page(&state.public_url, query.offset, query.limit)))
}

async fn get_pokemon(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Pokemon>, StatusCode> {
    debug!(id, "detail request");
    state
        .dex
        .pokemon
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
