use std::collections::HashMap;

use recursive_did::InscriptionId;
use serde::{Deserialize, Serialize};

/// Maps trait names to the inscriptions holding their layer images.
///
/// Categories are kept in insertion order; that order is the z-order of the
/// composite, bottom layer first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitDictionary {
    categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub traits: HashMap<String, InscriptionId>,
}

impl TraitDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(
        mut self,
        name: impl Into<String>,
        traits: impl IntoIterator<Item = (String, InscriptionId)>,
    ) -> Self {
        self.categories.push(Category {
            name: name.into(),
            traits: traits.into_iter().collect(),
        });
        self
    }

    /// Whether the dictionary knows the category at all.
    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    pub fn lookup(&self, category: &str, trait_name: &str) -> Option<&InscriptionId> {
        self.categories
            .iter()
            .find(|c| c.name == category)?
            .traits
            .get(trait_name)
    }

    /// Category names in layer order, bottom first.
    pub fn layer_order(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }
}
