use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::content::{record_id, text};
use crate::resource::list_records;

/// Read-only lookup collections used to populate form selectors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Topic,
    Language,
    Writer,
    Translator,
    Tag,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 5] = [
        ReferenceKind::Topic,
        ReferenceKind::Language,
        ReferenceKind::Writer,
        ReferenceKind::Translator,
        ReferenceKind::Tag,
    ];

    pub fn endpoint(&self) -> &'static str {
        match self {
            ReferenceKind::Topic => "topics",
            ReferenceKind::Language => "languages",
            ReferenceKind::Writer => "writers",
            ReferenceKind::Translator => "translators",
            ReferenceKind::Tag => "tags",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReferenceKind::Topic => "Topics",
            ReferenceKind::Language => "Languages",
            ReferenceKind::Writer => "Writers",
            ReferenceKind::Translator => "Translators",
            ReferenceKind::Tag => "Tags",
        }
    }
}

/// One `{id, displayValue}` entry of a reference list.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceItem {
    pub id: String,
    pub display_value: String,
    /// Writers carry a designation that pre-fills the form field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
}

/// Keys the backend uses for the human-readable value, by preference.
const DISPLAY_KEYS: &[&str] = &["displayValue", "name", "title", "topic", "tag", "language"];

impl ReferenceItem {
    /// Build from any backend record shape. Records without a usable
    /// display value fall back to their id; records with neither are dropped.
    pub fn from_value(value: &Value) -> Option<Self> {
        let display = DISPLAY_KEYS
            .iter()
            .map(|key| text(value, key))
            .find(|v| !v.trim().is_empty());
        let id = record_id(value).or_else(|| display.clone())?;
        let designation = Some(text(value, "designation")).filter(|d| !d.trim().is_empty());
        Some(Self {
            display_value: display.unwrap_or_else(|| id.clone()),
            id,
            designation,
        })
    }
}

impl<'de> Deserialize<'de> for ReferenceItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ReferenceItem::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom("reference record has no id or display value"))
    }
}

/// Parse a reference list response: either a bare array or an object
/// wrapping the array under `data` or the collection name.
pub fn parse_reference_list(kind: ReferenceKind, body: &Value) -> Vec<ReferenceItem> {
    list_records(kind.endpoint(), body)
        .iter()
        .filter_map(ReferenceItem::from_value)
        .collect()
}

/// All lookup collections a content form needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub topics: Vec<ReferenceItem>,
    pub languages: Vec<ReferenceItem>,
    pub writers: Vec<ReferenceItem>,
    pub translators: Vec<ReferenceItem>,
    pub tags: Vec<ReferenceItem>,
}

impl ReferenceData {
    pub fn list(&self, kind: ReferenceKind) -> &[ReferenceItem] {
        match kind {
            ReferenceKind::Topic => &self.topics,
            ReferenceKind::Language => &self.languages,
            ReferenceKind::Writer => &self.writers,
            ReferenceKind::Translator => &self.translators,
            ReferenceKind::Tag => &self.tags,
        }
    }

    pub fn set(&mut self, kind: ReferenceKind, items: Vec<ReferenceItem>) {
        match kind {
            ReferenceKind::Topic => self.topics = items,
            ReferenceKind::Language => self.languages = items,
            ReferenceKind::Writer => self.writers = items,
            ReferenceKind::Translator => self.translators = items,
            ReferenceKind::Tag => self.tags = items,
        }
    }

    /// Writer by id, or by display name for records that stored the name.
    pub fn writer(&self, key: &str) -> Option<&ReferenceItem> {
        self.writers
            .iter()
            .find(|w| w.id == key)
            .or_else(|| self.writers.iter().find(|w| w.display_value == key))
    }
}
