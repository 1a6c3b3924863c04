use dioxus::prelude::*;
use shared_types::PaginationMeta;

use crate::components::button::{Button, ButtonVariant};

/// Page-based pagination controls with Previous/Next buttons.
#[component]
pub fn Pagination(meta: PaginationMeta, on_page: EventHandler<usize>) -> Element {
    let page = meta.page;
    let total_pages = meta.total_pages;
    let total = meta.total;

    rsx! {
        div { class: "pagination",
            if meta.has_prev {
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_page.call(page - 1),
                    "Previous"
                }
            }
            span { class: "pagination-info",
                "Page {page} of {total_pages} ({total} total)"
            }
            if meta.has_next {
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_page.call(page + 1),
                    "Next"
                }
            }
        }
    }
}
