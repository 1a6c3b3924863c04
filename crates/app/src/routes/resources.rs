use dioxus::prelude::*;
use shared_types::{ListQuery, ListRow, ResourceKind};
use shared_ui::{use_toast, ConfirmDialog, PageHeader, PageTitle, SearchBar};

use crate::components::list_table::ListTable;
use crate::routes::content::list::LoadError;
use crate::use_services;

/// Plain list screen for books, galleries, feedback and the lookup
/// collections: fetch, search, sort, page and delete.
#[component]
pub fn ResourceListPage(resource: ResourceKind) -> Element {
    let services = use_services();
    let mut toast = use_toast();
    let mut query = use_signal(|| ListQuery::new(services.config.listing.page_size));
    let mut pending_delete = use_signal(|| Option::<ListRow>::None);
    let mut deleting = use_signal(|| false);

    let api = services.api.clone();
    let mut data = use_resource(move || {
        let api = api.clone();
        async move {
            client::content::list(&api, resource.endpoint())
                .await
                .map(|records| {
                    records
                        .iter()
                        .filter_map(|r| ListRow::from_resource(resource, r))
                        .collect::<Vec<_>>()
                })
        }
    });

    let handle_delete = move |_| {
        let Some(row) = pending_delete() else {
            return;
        };
        let api = services.api.clone();
        spawn(async move {
            deleting.set(true);
            match client::content::delete(&api, resource.endpoint(), &row.id).await {
                Ok(()) => {
                    tracing::info!(entity = %resource, id = %row.id, "deleted");
                    toast.success("Record deleted");
                    data.restart();
                }
                Err(e) => toast.error(e.friendly_message()),
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    };

    let search = query.read().search.clone();

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "{resource.label()}" }
            }

            SearchBar {
                value: search,
                on_search: move |s: String| query.write().set_search(s),
            }

            match &*data.read() {
                Some(Ok(rows)) => rsx! {
                    ListTable {
                        columns: resource.columns().to_vec(),
                        rows: rows.clone(),
                        query,
                        on_delete: move |row: ListRow| pending_delete.set(Some(row)),
                    }
                },
                Some(Err(err)) => rsx! {
                    LoadError { error: err.clone(), on_retry: move |_| data.restart() }
                },
                None => rsx! {
                    div { class: "loading", "Loading {resource.label().to_lowercase()}..." }
                },
            }

            ConfirmDialog {
                open: pending_delete.read().is_some(),
                title: "Delete record?",
                message: "This record will be removed permanently.",
                confirm_label: "Delete",
                busy: deleting(),
                on_confirm: handle_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}
