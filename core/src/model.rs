//! Domain models handed to the presentation layer.

use std::fmt;

use url::Url;

/// One row of the catalog list.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub id: u32,
    /// Source name as sent by the server, e.g. `"bulbasaur"`.
    pub name: String,
    pub display_name: String,
    pub image_url: Url,
}

/// Everything the detail screen shows for one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetail {
    pub id: u32,
    pub name: String,
    pub localized_name: String,
    pub image_url: Url,
    pub height_m: f64,
    pub weight_kg: f64,
    pub primary_type: Option<TypeTag>,
}

impl ItemDetail {
    pub fn display_name(&self) -> &str {
        &self.localized_name
    }

    pub fn display_height(&self) -> String {
        format!("{:.1} m", self.height_m)
    }

    pub fn display_weight(&self) -> String {
        format!("{:.1} Kg", self.weight_kg)
    }
}

/// The closed set of type tags the catalog knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl TypeTag {
    pub const ALL: [TypeTag; 18] = [
        TypeTag::Normal,
        TypeTag::Fire,
        TypeTag::Water,
        TypeTag::Electric,
        TypeTag::Grass,
        TypeTag::Ice,
        TypeTag::Fighting,
        TypeTag::Poison,
        TypeTag::Ground,
        TypeTag::Flying,
        TypeTag::Psychic,
        TypeTag::Bug,
        TypeTag::Rock,
        TypeTag::Ghost,
        TypeTag::Dragon,
        TypeTag::Dark,
        TypeTag::Steel,
        TypeTag::Fairy,
    ];

    /// Resolve a wire name. Unknown names (e.g. `"shadow"`) are `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Normal => "normal",
            TypeTag::Fire => "fire",
            TypeTag::Water => "water",
            TypeTag::Electric => "electric",
            TypeTag::Grass => "grass",
            TypeTag::Ice => "ice",
            TypeTag::Fighting => "fighting",
            TypeTag::Poison => "poison",
            TypeTag::Ground => "ground",
            TypeTag::Flying => "flying",
            TypeTag::Psychic => "psychic",
            TypeTag::Bug => "bug",
            TypeTag::Rock => "rock",
            TypeTag::Ghost => "ghost",
            TypeTag::Dragon => "dragon",
            TypeTag::Dark => "dark",
            TypeTag::Steel => "steel",
            TypeTag::Fairy => "fairy",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
