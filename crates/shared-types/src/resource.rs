use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::content::{record_id, text};

/// A displayed table column: wire key and header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
}

/// Entities managed through plain list screens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Book,
    Gallery,
    Feedback,
    Topic,
    Tag,
    Writer,
    Translator,
    Language,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Book,
        ResourceKind::Gallery,
        ResourceKind::Feedback,
        ResourceKind::Topic,
        ResourceKind::Tag,
        ResourceKind::Writer,
        ResourceKind::Translator,
        ResourceKind::Language,
    ];

    pub fn endpoint(&self) -> &'static str {
        match self {
            ResourceKind::Book => "books",
            ResourceKind::Gallery => "galleries",
            ResourceKind::Feedback => "feedback",
            ResourceKind::Topic => "topics",
            ResourceKind::Tag => "tags",
            ResourceKind::Writer => "writers",
            ResourceKind::Translator => "translators",
            ResourceKind::Language => "languages",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Book => "Books",
            ResourceKind::Gallery => "Galleries",
            ResourceKind::Feedback => "Feedback",
            ResourceKind::Topic => "Topics",
            ResourceKind::Tag => "Tags",
            ResourceKind::Writer => "Writers",
            ResourceKind::Translator => "Translators",
            ResourceKind::Language => "Languages",
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        match self {
            ResourceKind::Book => &BOOK_COLUMNS,
            ResourceKind::Gallery => &GALLERY_COLUMNS,
            ResourceKind::Feedback => &FEEDBACK_COLUMNS,
            ResourceKind::Topic => &[Column {
                key: "topic",
                label: "Topic",
            }],
            ResourceKind::Tag => &[Column {
                key: "tag",
                label: "Tag",
            }],
            ResourceKind::Writer => &WRITER_COLUMNS,
            ResourceKind::Translator => &[Column {
                key: "name",
                label: "Name",
            }],
            ResourceKind::Language => &[Column {
                key: "language",
                label: "Language",
            }],
        }
    }
}

const BOOK_COLUMNS: [Column; 4] = [
    Column {
        key: "title",
        label: "Title",
    },
    Column {
        key: "author",
        label: "Author",
    },
    Column {
        key: "language",
        label: "Language",
    },
    Column {
        key: "date",
        label: "Date",
    },
];

const GALLERY_COLUMNS: [Column; 2] = [
    Column {
        key: "title",
        label: "Title",
    },
    Column {
        key: "date",
        label: "Date",
    },
];

const FEEDBACK_COLUMNS: [Column; 4] = [
    Column {
        key: "name",
        label: "Name",
    },
    Column {
        key: "email",
        label: "Email",
    },
    Column {
        key: "message",
        label: "Message",
    },
    Column {
        key: "createdAt",
        label: "Received",
    },
];

const WRITER_COLUMNS: [Column; 2] = [
    Column {
        key: "name",
        label: "Name",
    },
    Column {
        key: "designation",
        label: "Designation",
    },
];

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.endpoint())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|k| k.endpoint() == s.to_lowercase())
            .ok_or_else(|| format!("unknown resource: {s}"))
    }
}

/// Unwrap a list response: a bare array, or an array under `data` or
/// under the collection name.
pub fn list_records<'a>(endpoint: &str, body: &'a Value) -> &'a [Value] {
    body.as_array()
        .or_else(|| body.get("data").and_then(|d| d.as_array()))
        .or_else(|| body.get(endpoint).and_then(|d| d.as_array()))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Display strings of a record for the given columns.
pub fn record_cells(record: &Value, columns: &[Column]) -> Vec<String> {
    columns.iter().map(|c| text(record, c.key)).collect()
}

/// Id of a record, as used in `DELETE /{endpoint}/{id}`.
pub fn resource_id(record: &Value) -> Option<String> {
    record_id(record)
}
