use dioxus::prelude::*;
use shared_types::{content_columns, AppError, ContentKind, ListQuery, ListRow, PublicationFilter};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, ConfirmDialog, FormSelect, PageActions,
    PageHeader, PageTitle, SearchBar,
};

use crate::components::list_table::ListTable;
use crate::routes::Route;
use crate::use_services;

/// Article, question or event list with search, publication filter, sort
/// and delete.
///
/// The fetch lives in a resource owned by this component; leaving the
/// screen drops it and with it any request still in flight.
#[component]
pub fn ContentListPage(kind: ContentKind) -> Element {
    let services = use_services();
    let mut toast = use_toast();
    let mut query = use_signal(|| ListQuery::new(services.config.listing.page_size));
    let mut pending_delete = use_signal(|| Option::<ListRow>::None);
    let mut deleting = use_signal(|| false);

    let api = services.api.clone();
    let mut data = use_resource(move || {
        let api = api.clone();
        async move {
            let (records, refs) = futures::join!(
                client::content::list(&api, kind.endpoint()),
                client::reference::load_reference_data(&api),
            );
            records.map(|records| {
                records
                    .iter()
                    .filter_map(|r| ListRow::from_content(kind, r, &refs.data))
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
            match client::content::delete(&api, kind.endpoint(), &row.id).await {
                Ok(()) => {
                    tracing::info!(entity = %kind, id = %row.id, "deleted");
                    toast.success(format!("{} deleted", kind.label()));
                    data.restart();
                }
                Err(e) => toast.error(e.friendly_message()),
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    };

    let search = query.read().search.clone();
    let filter = query.read().filter;

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "{kind.plural_label()}" }
                PageActions {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| {
                            navigator().push(Route::ContentCreate { kind });
                        },
                        "New {kind.label()}"
                    }
                }
            }

            SearchBar {
                value: search,
                on_search: move |s: String| query.write().set_search(s),
                FormSelect {
                    value: filter.key().to_string(),
                    onchange: move |evt: Event<FormData>| {
                        query.write().set_filter(PublicationFilter::from_key(&evt.value()));
                    },
                    for f in PublicationFilter::ALL {
                        option { key: "{f.key()}", value: f.key(), "{f.label()}" }
                    }
                }
            }

            match &*data.read() {
                Some(Ok(rows)) => rsx! {
                    ListTable {
                        columns: content_columns(kind).to_vec(),
                        rows: rows.clone(),
                        query,
                        date_column: Some(3),
                        status_column: Some(4),
                        on_open: move |id: String| {
                            navigator().push(Route::ContentEdit { kind, id });
                        },
                        on_delete: move |row: ListRow| pending_delete.set(Some(row)),
                    }
                },
                Some(Err(err)) => rsx! {
                    LoadError { error: err.clone(), on_retry: move |_| data.restart() }
                },
                None => rsx! {
                    div { class: "loading", "Loading {kind.plural_label().to_lowercase()}..." }
                },
            }

            ConfirmDialog {
                open: pending_delete.read().is_some(),
                title: "Delete {kind.label().to_lowercase()}?",
                message: match &*pending_delete.read() {
                    Some(row) => format!(
                        "\"{}\" will be removed permanently.",
                        row.cells.first().cloned().unwrap_or_default()
                    ),
                    None => String::new(),
                },
                confirm_label: "Delete",
                busy: deleting(),
                on_confirm: handle_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

/// Card shown when a list could not be fetched.
#[component]
pub fn LoadError(
    error: AppError,
    on_retry: EventHandler<()>,
    #[props(default = "Retry".to_string())] action_label: String,
) -> Element {
    rsx! {
        Card {
            CardContent {
                p { class: "load-error-text", "{error.friendly_message()}" }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_retry.call(()),
                    "{action_label}"
                }
            }
        }
    }
}
