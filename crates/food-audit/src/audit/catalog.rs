use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weight applied to Yes/No questions that carry no explicit maximum.
pub const DEFAULT_ITEM_WEIGHT: f64 = 1.0;

/// Template metadata for one audit question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Question metadata keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCatalog {
    items: BTreeMap<String, ItemMetadata>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, question_id: impl Into<String>, metadata: ItemMetadata) -> Self {
        self.insert(question_id, metadata);
        self
    }

    pub fn insert(&mut self, question_id: impl Into<String>, metadata: ItemMetadata) {
        self.items.insert(question_id.into(), metadata);
    }

    pub fn get(&self, question_id: &str) -> Option<&ItemMetadata> {
        self.items.get(question_id)
    }

    pub fn max_points(&self, question_id: &str) -> Option<f64> {
        self.get(question_id).and_then(|item| item.max_points)
    }

    pub fn title(&self, question_id: &str) -> Option<&str> {
        self.get(question_id).and_then(|item| item.title.as_deref())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<(String, ItemMetadata)> for ItemCatalog {
    fn from_iter<T: IntoIterator<Item = (String, ItemMetadata)>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
