use dioxus::prelude::*;
use shared_types::{preview_text, Column, ListQuery, ListRow};
use shared_ui::{
    Badge, BadgeVariant, Button, ButtonVariant, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableHeader, DataTableMessage, DataTableRow, Pagination,
};

use crate::format_helpers::format_date_human;

const CELL_MAX_CHARS: usize = 80;

fn badge_variant(published: Option<bool>) -> BadgeVariant {
    if published == Some(true) {
        BadgeVariant::Primary
    } else {
        BadgeVariant::Secondary
    }
}

/// Sortable, paged table over already-fetched rows.
///
/// Search, filter, sort and page live in `query`; the table only applies
/// them. `date_column` cells are shown human-readable and `status_column`
/// cells as a badge.
#[component]
pub fn ListTable(
    columns: Vec<Column>,
    rows: Vec<ListRow>,
    query: Signal<ListQuery>,
    #[props(default)] date_column: Option<usize>,
    #[props(default)] status_column: Option<usize>,
    #[props(default)] on_open: Option<EventHandler<String>>,
    on_delete: EventHandler<ListRow>,
) -> Element {
    let mut query = query;
    let page = query.read().apply(&rows);
    let sort = query.read().sort;
    let colspan = columns.len() + 1;

    rsx! {
        DataTable {
            DataTableHeader {
                for (index, column) in columns.iter().enumerate() {
                    DataTableColumn {
                        key: "{column.key}",
                        onclick: move |_| query.write().sort_by(index),
                        indicator: match sort {
                            Some((c, dir)) if c == index => dir.indicator().to_string(),
                            _ => String::new(),
                        },
                        "{column.label}"
                    }
                }
                DataTableColumn { "" }
            }
            DataTableBody {
                if page.rows.is_empty() {
                    DataTableMessage { colspan, "No records found." }
                }
                for row in page.rows.iter().cloned() {
                    DataTableRow {
                        key: "{row.id}",
                        onclick: {
                            let id = row.id.clone();
                            move |_| {
                                if let Some(handler) = &on_open {
                                    handler.call(id.clone());
                                }
                            }
                        },
                        for (index, cell) in row.cells.iter().enumerate() {
                            DataTableCell {
                                if Some(index) == status_column {
                                    Badge {
                                        variant: badge_variant(row.published),
                                        "{cell}"
                                    }
                                } else if Some(index) == date_column {
                                    "{format_date_human(cell)}"
                                } else {
                                    "{preview_text(cell, CELL_MAX_CHARS)}"
                                }
                            }
                        }
                        DataTableCell {
                            div {
                                class: "row-actions",
                                onclick: move |evt: MouseEvent| evt.stop_propagation(),
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    onclick: {
                                        let row = row.clone();
                                        move |_| on_delete.call(row.clone())
                                    },
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }
        }
        Pagination {
            meta: page.meta.clone(),
            on_page: move |p: usize| query.write().page = p,
        }
    }
}
