use dioxus::prelude::*;

/// Scrollable table wrapper.
#[component]
pub fn DataTable(children: Element) -> Element {
    rsx! {
        div { class: "data-table",
            table { {children} }
        }
    }
}

/// Table header section; wraps `th` elements in a `thead > tr`.
#[component]
pub fn DataTableHeader(children: Element) -> Element {
    rsx! {
        thead {
            tr { {children} }
        }
    }
}

#[component]
pub fn DataTableBody(children: Element) -> Element {
    rsx! {
        tbody { {children} }
    }
}

/// Column header. Clickable when `onclick` is set; `indicator` shows the
/// current sort direction.
#[component]
pub fn DataTableColumn(
    #[props(default)] onclick: Option<EventHandler<MouseEvent>>,
    #[props(default)] indicator: String,
    children: Element,
) -> Element {
    let sortable = onclick.is_some();
    rsx! {
        th {
            class: if sortable { "sortable" } else { "" },
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            {children}
            if !indicator.is_empty() {
                span { class: "sort-indicator", " {indicator}" }
            }
        }
    }
}

#[component]
pub fn DataTableRow(
    #[props(default)] onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let has_click = onclick.is_some();
    rsx! {
        tr {
            class: if has_click { "data-table-row clickable" } else { "data-table-row" },
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}

#[component]
pub fn DataTableCell(children: Element) -> Element {
    rsx! {
        td { {children} }
    }
}

/// Single full-width row for loading, empty and error states.
#[component]
pub fn DataTableMessage(colspan: usize, children: Element) -> Element {
    rsx! {
        tr { class: "data-table-message",
            td { colspan: "{colspan}", {children} }
        }
    }
}
