use serde_json::Value;
use std::cmp::Ordering;

use crate::common::{normalize_date, PaginationMeta};
use crate::content::{record_id, ContentItem, ContentKind, PublicationState};
use crate::editor::plain_text;
use crate::reference::ReferenceData;
use crate::resource::{record_cells, Column, ResourceKind};

/// Columns of the article/question/event tables.
pub fn content_columns(kind: ContentKind) -> [Column; 5] {
    [
        Column {
            key: kind.primary_field(),
            label: kind.primary_label(),
        },
        Column {
            key: "topic",
            label: "Topic",
        },
        Column {
            key: "writer",
            label: "Writer",
        },
        Column {
            key: "date",
            label: "Date",
        },
        Column {
            key: "isPublished",
            label: "Status",
        },
    ]
}

/// One table row, already reduced to display strings.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub id: String,
    pub cells: Vec<String>,
    /// `None` for entities without a publication flag.
    pub published: Option<bool>,
}

impl ListRow {
    /// Row for a content record. Reference ids resolve to display names.
    pub fn from_content(kind: ContentKind, record: &Value, refs: &ReferenceData) -> Option<Self> {
        let id = record_id(record)?;
        let item = ContentItem::from_record(kind, record, refs);
        let topic = refs
            .topics
            .iter()
            .find(|t| t.id == item.metadata.topic)
            .map(|t| t.display_value.clone())
            .unwrap_or(item.metadata.topic);
        let writer = match item.metadata.writer.resolved() {
            Some(key) => refs
                .writer(key)
                .map(|w| w.display_value.clone())
                .unwrap_or_else(|| key.to_string()),
            None => String::new(),
        };
        let primary = if item.primary.is_empty() {
            item.blocks
                .first_non_empty_title()
                .map(|(_, t)| t.to_string())
                .unwrap_or_default()
        } else {
            item.primary
        };
        Some(Self {
            id,
            cells: vec![
                primary,
                topic,
                writer,
                item.metadata.date,
                item.publication.label().to_string(),
            ],
            published: Some(item.publication == PublicationState::Published),
        })
    }

    pub fn from_resource(kind: ResourceKind, record: &Value) -> Option<Self> {
        let id = record_id(record)?;
        let cells = record_cells(record, kind.columns())
            .into_iter()
            .map(|c| plain_text(&c))
            .collect();
        Some(Self { id, cells, published: None })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublicationFilter {
    #[default]
    All,
    Draft,
    Published,
}

impl PublicationFilter {
    pub const ALL: [PublicationFilter; 3] =
        [PublicationFilter::All, PublicationFilter::Draft, PublicationFilter::Published];

    pub fn key(&self) -> &'static str {
        match self {
            PublicationFilter::All => "all",
            PublicationFilter::Draft => "draft",
            PublicationFilter::Published => "published",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PublicationFilter::All => "All",
            PublicationFilter::Draft => "Drafts",
            PublicationFilter::Published => "Published",
        }
    }

    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|f| f.key() == key)
            .unwrap_or_default()
    }

    fn matches(&self, row: &ListRow) -> bool {
        match (self, row.published) {
            (PublicationFilter::All, _) | (_, None) => true,
            (PublicationFilter::Draft, Some(p)) => !p,
            (PublicationFilter::Published, Some(p)) => p,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Asc => "\u{25B2}",
            SortDirection::Desc => "\u{25BC}",
        }
    }
}

/// Search, filter, sort and page state of a list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub search: String,
    pub filter: PublicationFilter,
    pub sort: Option<(usize, SortDirection)>,
    pub page: usize,
    pub page_size: usize,
}

impl ListQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            filter: PublicationFilter::All,
            sort: None,
            page: 1,
            page_size,
        }
    }

    /// Clicking a header sorts ascending, a second click flips direction.
    pub fn sort_by(&mut self, column: usize) {
        self.sort = match self.sort {
            Some((current, dir)) if current == column => Some((column, dir.toggled())),
            _ => Some((column, SortDirection::Asc)),
        };
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_filter(&mut self, filter: PublicationFilter) {
        self.filter = filter;
        self.page = 1;
    }

    /// Visible rows for the current page plus pagination metadata.
    pub fn apply(&self, rows: &[ListRow]) -> ListPage {
        let needle = self.search.trim().to_lowercase();
        let mut matched: Vec<ListRow> = rows
            .iter()
            .filter(|row| self.filter.matches(row))
            .filter(|row| {
                needle.is_empty()
                    || row.cells.iter().any(|c| c.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();

        if let Some((column, direction)) = self.sort {
            matched.sort_by(|a, b| {
                let ord = compare_cells(a.cells.get(column), b.cells.get(column));
                match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        let meta = PaginationMeta::new(self.page, self.page_size, matched.len());
        let rows = matched[meta.range()].to_vec();
        ListPage { rows, meta }
    }
}

/// Dates compare chronologically, everything else case-insensitively.
fn compare_cells(a: Option<&String>, b: Option<&String>) -> Ordering {
    let a = a.map(String::as_str).unwrap_or("");
    let b = b.map(String::as_str).unwrap_or("");
    match (normalize_date(a), normalize_date(b)) {
        (Ok(da), Ok(db)) => da.cmp(&db),
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub rows: Vec<ListRow>,
    pub meta: PaginationMeta,
}
