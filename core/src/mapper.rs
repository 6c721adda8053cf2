//! Response-to-domain mapping.
//!
//! # Design
//! Everything here is pure and synchronous. The list endpoint never sends an
//! id, only a resource URL with the id as its last path segment, so the id is
//! parsed out of that string. An entry whose id (and therefore image URL)
//! cannot be derived is dropped from the page and logged, never surfaced as a
//! stream error. An unknown type tag likewise nulls the primary type instead
//! of failing the record.

use tracing::warn;
use url::Url;

use crate::error::FetchError;
use crate::localize::NameLocalizer;
use crate::model::{CatalogItem, ItemDetail, TypeTag};
use crate::types::{CatalogEntryRef, CatalogPage, DetailRecord, TypeSlot};

pub const SPRITES_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// Parse the numeric id out of a resource URL like `.../pokemon/25/`.
///
/// A single trailing slash is tolerated. Returns `None` for a non-numeric or
/// zero last segment, or when fewer than two segments remain.
pub fn extract_id(resource_url: &str) -> Option<u32> {
    let mut segments: Vec<&str> = resource_url.split('/').collect();
    if segments.last() == Some(&"") {
        segments.pop();
    }
    if segments.len() < 2 {
        return None;
    }
    segments
        .last()
        .and_then(|segment| segment.parse::<u32>().ok())
        .filter(|id| *id > 0)
}

/// Small sprite shown in the list.
pub fn list_image_url(id: u32) -> Result<Url, url::ParseError> {
    Url::parse(&format!("{SPRITES_BASE_URL}/{id}.png"))
}

/// High-resolution artwork shown on the detail screen.
pub fn artwork_url(id: u32) -> Result<Url, url::ParseError> {
    Url::parse(&format!("{SPRITES_BASE_URL}/other/official-artwork/{id}.png"))
}

/// The type in slot 1, if its name is a known tag.
pub fn resolve_primary_type(types: &[TypeSlot]) -> Option<TypeTag> {
    types
        .iter()
        .find(|t| t.slot == 1)
        .and_then(|t| TypeTag::from_name(&t.kind.name))
}

pub fn display_name(raw_name: &str, localized: Option<&str>) -> String {
    match localized {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => capitalize(raw_name),
    }
}

/// Upper-case the first letter of every word and lower-case the rest.
/// Words are separated by whitespace or `-`, which are kept as-is.
pub fn capitalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for c in raw.chars() {
        if c.is_whitespace() || c == '-' {
            out.push(c);
            at_word_start = true;
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Map one list entry, or `None` if it is unusable.
pub fn map_entry(entry: &CatalogEntryRef, localizer: &dyn NameLocalizer) -> Option<CatalogItem> {
    let id = extract_id(&entry.url)?;
    let image_url = list_image_url(id).ok()?;
    let localized = localizer.localized_name(&entry.name);
    Some(CatalogItem {
        id,
        name: entry.name.clone(),
        display_name: display_name(&entry.name, localized.as_deref()),
        image_url,
    })
}

/// Map a page in server order, dropping unusable entries.
pub fn map_page(page: &CatalogPage, localizer: &dyn NameLocalizer) -> Vec<CatalogItem> {
    page.results
        .iter()
        .filter_map(|entry| {
            let item = map_entry(entry, localizer);
            if item.is_none() {
                warn!(name = %entry.name, url = %entry.url, "dropping catalog entry without a usable id");
            }
            item
        })
        .collect()
}

pub fn map_detail(
    record: &DetailRecord,
    localizer: &dyn NameLocalizer,
) -> Result<ItemDetail, FetchError> {
    let image_url = artwork_url(record.id).map_err(|e| {
        FetchError::invalid_url(
            &format!("{SPRITES_BASE_URL}/other/official-artwork/{}.png", record.id),
            e,
        )
    })?;
    let localized = localizer.localized_name(&record.name);
    Ok(ItemDetail {
        id: record.id,
        name: record.name.clone(),
        localized_name: display_name(&record.name, localized.as_deref()),
        image_url,
        height_m: f64::from(record.height) / 10.0,
        weight_kg: f64::from(record.weight) / 10.0,
        primary_type: resolve_primary_type(&record.types),
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::localize::{DictionaryLocalizer, NoLocalization};
    use crate::types::NamedResource;

    fn entry(name: &str, url: &str) -> CatalogEntryRef {
        CatalogEntryRef {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    fn slot(slot: u32, name: &str) -> TypeSlot {
        TypeSlot {
            slot,
            kind: NamedResource {
                name: name.to_string(),
            },
        }
    }

    #[test]
    fn extract_id_handles_trailing_slash() {
        assert_eq!(extract_id("https://pokeapi.co/api/v2/pokemon/1/"), Some(1));
        assert_eq!(extract_id("https://pokeapi.co/api/v2/pokemon/151"), Some(151));
        assert_eq!(extract_id("pokemon/25/"), Some(25));
    }

    #[test]
    fn extract_id_rejects_malformed_urls() {
        assert_eq!(extract_id("https://pokeapi.co/api/v2/pokemon/bulbasaur/"), None);
        assert_eq!(extract_id("https://pokeapi.co/api/v2/pokemon//"), None);
        assert_eq!(extract_id("https://pokeapi.co/api/v2/pokemon/-3/"), None);
        assert_eq!(extract_id("https://pokeapi.co/api/v2/pokemon/0/"), None);
        assert_eq!(extract_id("7"), None);
        assert_eq!(extract_id("7/"), None);
        assert_eq!(extract_id(""), None);
    }

    proptest! {
        #[test]
        fn extract_id_round_trips_resource_urls(id in 1..=u32::MAX) {
            let with_slash = format!("https://pokeapi.co/api/v2/pokemon/{id}/");
            let without_slash = format!("https://pokeapi.co/api/v2/pokemon/{id}");
            prop_assert_eq!(extract_id(&with_slash), Some(id));
            prop_assert_eq!(extract_id(&without_slash), Some(id));
        }
    }

    #[test]
    fn image_templates_embed_the_id() {
        assert_eq!(
            list_image_url(1).unwrap().as_str(),
            "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/1.png"
        );
        assert_eq!(
            artwork_url(25).unwrap().as_str(),
            "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/25.png"
        );
    }

    #[test]
    fn primary_type_is_slot_one_regardless_of_order() {
        let types = vec![slot(2, "poison"), slot(1, "fire")];
        assert_eq!(resolve_primary_type(&types), Some(TypeTag::Fire));
    }

    #[test]
    fn primary_type_is_none_when_missing_or_unknown() {
        assert_eq!(resolve_primary_type(&[]), None);
        assert_eq!(resolve_primary_type(&[slot(2, "flying")]), None);
        assert_eq!(resolve_primary_type(&[slot(1, "shadow")]), None);
    }

    #[test]
    fn display_name_prefers_non_empty_localization() {
        assert_eq!(display_name("pikachu", Some("피카츄")), "피카츄");
        assert_eq!(display_name("pikachu", Some("")), "Pikachu");
        assert_eq!(display_name("pikachu", None), "Pikachu");
    }

    #[test]
    fn capitalize_handles_each_word() {
        assert_eq!(capitalize("bulbasaur"), "Bulbasaur");
        assert_eq!(capitalize("mr-mime"), "Mr-Mime");
        assert_eq!(capitalize("TAPU koko"), "Tapu Koko");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn map_page_drops_unusable_entries_and_keeps_order() {
        let page = CatalogPage {
            count: 3,
            next: None,
            previous: None,
            results: vec![
                entry("ivysaur", "https://pokeapi.co/api/v2/pokemon/2/"),
                entry("missingno", "https://pokeapi.co/api/v2/pokemon/unknown/"),
                entry("bulbasaur", "https://pokeapi.co/api/v2/pokemon/1/"),
            ],
        };
        let items = map_page(&page, &NoLocalization);
        let ids: Vec<u32> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(items[1].display_name, "Bulbasaur");
        assert!(items[1].image_url.as_str().ends_with("/1.png"));
    }

    #[test]
    fn map_entry_uses_localizer() {
        let dict = DictionaryLocalizer::new([("bulbasaur", "이상해씨")]);
        let item = map_entry(&entry("bulbasaur", "https://pokeapi.co/api/v2/pokemon/1/"), &dict).unwrap();
        assert_eq!(item.display_name, "이상해씨");
        assert_eq!(item.name, "bulbasaur");
    }

    #[test]
    fn map_detail_converts_units_and_derives_fields() {
        let record = DetailRecord {
            id: 1,
            name: "bulbasaur".to_string(),
            height: 17,
            weight: 69,
            types: vec![slot(2, "poison"), slot(1, "grass")],
        };
        let detail = map_detail(&record, &NoLocalization).unwrap();
        assert_eq!(detail.height_m, 1.7);
        assert_eq!(detail.weight_kg, 6.9);
        assert_eq!(detail.primary_type, Some(TypeTag::Grass));
        assert_eq!(detail.localized_name, "Bulbasaur");
        assert!(detail.image_url.as_str().ends_with("/official-artwork/1.png"));
    }
}
