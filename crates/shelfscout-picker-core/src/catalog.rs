use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDescriptor {
    pub id: String,
    pub display_name: String,
}

/// Lookup table scanned from the option rows in the page markup. The page
/// owns the data; the picker rebuilds this each render so renamed or
/// re-ordered rows win over anything remembered from earlier clicks.
#[derive(Debug, Clone, Default)]
pub struct OptionCatalog {
    entries: Vec<OptionDescriptor>,
    index_by_id: BTreeMap<String, usize>,
}

impl OptionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_descriptors<I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = OptionDescriptor>,
    {
        let mut catalog = Self::default();
        for descriptor in descriptors {
            catalog.push(&descriptor.id, &descriptor.display_name);
        }
        catalog
    }

    /// First declaration of an id wins, matching document order of the rows.
    pub fn push(&mut self, id: &str, display_name: &str) {
        if self.index_by_id.contains_key(id) {
            return;
        }
        self.index_by_id.insert(id.to_string(), self.entries.len());
        self.entries.push(OptionDescriptor {
            id: id.to_string(),
            display_name: display_name.to_string(),
        });
    }

    pub fn display_name(&self, id: &str) -> Option<&str> {
        let index = self.index_by_id.get(id).copied()?;
        self.entries
            .get(index)
            .map(|descriptor| descriptor.display_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
