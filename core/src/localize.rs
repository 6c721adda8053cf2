//! Name localization seam.
//!
//! The translation dictionary itself lives outside this crate. The mapper
//! only asks for a localized name and falls back to the source name.

use std::collections::HashMap;

pub trait NameLocalizer: Send + Sync {
    /// Localized name for a source name such as `"pikachu"`, if one exists.
    fn localized_name(&self, name: &str) -> Option<String>;
}

/// Never localizes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocalization;

impl NameLocalizer for NoLocalization {
    fn localized_name(&self, _name: &str) -> Option<String> {
        None
    }
}

/// In-memory dictionary keyed by source name.
#[derive(Debug, Clone, Default)]
pub struct DictionaryLocalizer {
    names: HashMap<String, String>,
}

impl DictionaryLocalizer {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            names: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl NameLocalizer for DictionaryLocalizer {
    fn localized_name(&self, name: &str) -> Option<String> {
        self.names.get(name).cloned()
    }
}
