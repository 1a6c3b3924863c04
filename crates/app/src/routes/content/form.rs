use client::media::{ConfiguredPresetStore, PresetStore};
use client::submit::SubmissionPipeline;
use dioxus::prelude::*;
use shared_types::{
    default_preset, AnsweredStatus, AppError, ContentForm, ContentKind, ContentLanguage,
    KindFields, Preview, PreviewSlot, ReferenceData, ReferenceItem, WriterChoice, PRESET_IMAGES,
};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, FormSelect, Input, MessageDialog,
    PageActions, PageHeader, PageTitle, ProgressBar,
};
use std::collections::BTreeMap;
use std::rc::Rc;

use super::language_block::LanguageBlockEditor;
use super::list::LoadError;
use super::media_picker::{show_preview, MediaPicker};
use crate::routes::Route;
use crate::use_services;

/// Create or edit screen for one article, question or event.
///
/// Reference lists and, when editing, the record load together; the form
/// renders once both have settled. The stored-image probe runs afterwards
/// and never overrides a choice the user already made.
#[component]
pub fn ContentFormPage(kind: ContentKind, id: Option<String>) -> Element {
    let services = use_services();
    let mut toast = use_toast();
    let max_bytes = services.config.media.max_image_bytes;
    let title = match &id {
        Some(_) => format!("Edit {}", kind.label()),
        None => format!("New {}", kind.label()),
    };

    let mut form = use_signal(|| limited(ContentForm::create(kind), max_bytes));
    let mut refs = use_signal(ReferenceData::default);
    let mut preview = use_signal(PreviewSlot::default);
    let mut ready = use_signal(|| false);
    let mut load_error = use_signal(|| Option::<AppError>::None);
    let mut field_errors = use_signal(BTreeMap::<String, String>::new);
    let mut submitting = use_signal(|| false);
    let mut progress = use_signal(|| 0u8);
    let mut failure = use_signal(|| Option::<String>::None);

    let pipeline = use_hook(|| {
        Rc::new(SubmissionPipeline::new(
            services.api.clone(),
            ConfiguredPresetStore::from_config(&services.api, &services.config.media),
        ))
    });
    let preset_urls: Vec<String> = PRESET_IMAGES
        .iter()
        .map(|p| pipeline.store().preview_url(p))
        .collect();

    // Upload progress
    {
        let pipeline = pipeline.clone();
        use_future(move || {
            let mut rx = pipeline.progress();
            async move {
                while rx.changed().await.is_ok() {
                    let pct = *rx.borrow_and_update();
                    progress.set(pct);
                }
            }
        });
    }

    // Hydration
    {
        let api = services.api.clone();
        let default_preview = pipeline.store().preview_url(default_preset());
        use_future(move || {
            let api = api.clone();
            let id = id.clone();
            let default_preview = default_preview.clone();
            async move {
                let Some(id) = id else {
                    let load = client::reference::load_reference_data(&api).await;
                    if let Some(summary) = load.failure_summary() {
                        toast.error(summary);
                    }
                    refs.set(load.data);
                    show_preview(&mut preview, Preview::Preset(default_preview));
                    ready.set(true);
                    return;
                };

                let (load, record) = futures::join!(
                    client::reference::load_reference_data(&api),
                    client::content::fetch_record(&api, kind, &id),
                );
                let record = match record {
                    Ok(record) => record,
                    Err(e) => {
                        tracing::warn!(
                            entity = %kind,
                            id = %id,
                            error = %e,
                            "could not load record"
                        );
                        load_error.set(Some(e));
                        return;
                    }
                };
                if let Some(summary) = load.failure_summary() {
                    toast.error(summary);
                }
                let hydrated = ContentForm::edit(kind, id.clone(), &record, &load.data);
                form.set(limited(hydrated, max_bytes));
                refs.set(load.data);
                ready.set(true);

                spawn(async move {
                    let existing = client::content::probe_image(&api, kind, &id).await;
                    let applied = form.write().media.apply_probe(existing.clone());
                    if !applied {
                        tracing::debug!(
                            entity = %kind,
                            id = %id,
                            "image probe arrived after a user choice"
                        );
                        return;
                    }
                    match existing {
                        Some(url) => show_preview(&mut preview, Preview::Remote(url)),
                        None => show_preview(&mut preview, Preview::Preset(default_preview)),
                    }
                });
            }
        });
    }

    let submit = use_callback(move |publish: bool| {
        if submitting() {
            return;
        }
        let current = form.read().clone();
        if let Err(e) = current.validate() {
            field_errors.set(e.field_errors.clone());
            toast.error(e.message);
            return;
        }
        field_errors.set(BTreeMap::new());
        submitting.set(true);
        let pipeline = pipeline.clone();
        spawn(async move {
            match pipeline.submit(&current, publish).await {
                Ok(outcome) => {
                    toast.success(outcome.message);
                    navigator().push(Route::ContentList { kind });
                }
                Err(e) => {
                    tracing::warn!(entity = %kind, kind = %e.kind, error = %e, "submission failed");
                    if e.is_validation() {
                        field_errors.set(e.field_errors.clone());
                    }
                    failure.set(Some(e.friendly_message()));
                }
            }
            submitting.set(false);
        });
    });

    if let Some(err) = load_error() {
        return rsx! {
            div { class: "container",
                PageHeader { PageTitle { "{title}" } }
                LoadError {
                    error: err,
                    action_label: "Back to list",
                    on_retry: move |_| {
                        navigator().push(Route::ContentList { kind });
                    },
                }
            }
        };
    }
    if !ready() {
        return rsx! {
            div { class: "container",
                PageHeader { PageTitle { "{title}" } }
                div { class: "loading", "Loading..." }
            }
        };
    }

    let current = form.read().clone();
    let item = &current.item;
    let meta = &item.metadata;
    let lists = refs.read().clone();
    let errors = field_errors.read().clone();
    let busy = submitting();

    rsx! {
        div { class: "container content-form",
            PageHeader {
                PageTitle { "{title}" }
                PageActions {
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: busy,
                        onclick: move |_| {
                            navigator().push(Route::ContentList { kind });
                        },
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        disabled: busy,
                        onclick: move |_| submit.call(false),
                        if busy { "Saving..." } else { "Save Draft" }
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: busy,
                        onclick: move |_| submit.call(true),
                        if busy { "Saving..." } else { "Publish" }
                    }
                }
            }

            if busy {
                ProgressBar { value: progress(), label: "Uploading" }
            }

            Card {
                CardContent {
                    div { class: "form-grid",
                        Input {
                            label: kind.primary_label().to_string(),
                            required: true,
                            value: item.primary.clone(),
                            disabled: busy,
                            error: errors.get(kind.primary_field()).cloned(),
                            on_input: move |e: FormEvent| form.write().set_primary(e.value()),
                        }
                        ReferenceSelect {
                            label: "Topic",
                            required: true,
                            value: meta.topic.clone(),
                            items: lists.topics.clone(),
                            disabled: busy,
                            error: errors.get("topic").cloned(),
                            on_change: move |v: String| form.write().set_topic(v),
                        }
                        ReferenceSelect {
                            label: "Language",
                            required: true,
                            value: meta.language.clone(),
                            items: lists.languages.clone(),
                            disabled: busy,
                            error: errors.get("language").cloned(),
                            on_change: move |v: String| form.write().set_language(v),
                        }
                        Input {
                            label: "Date",
                            required: true,
                            input_type: "date",
                            value: meta.date.clone(),
                            disabled: busy,
                            error: errors.get("date").cloned(),
                            on_input: move |e: FormEvent| form.write().set_date(e.value()),
                        }
                    }

                    WriterFields {
                        writer: meta.writer.clone(),
                        designation: meta.writer_designation.clone(),
                        writers: lists.writers.clone(),
                        disabled: busy,
                        error: errors.get("writer").cloned(),
                        on_select: move |id: String| {
                            let lists = refs.read().clone();
                            form.write().select_writer(&id, &lists);
                        },
                        on_custom_mode: move |on: bool| form.write().set_custom_writer_mode(on),
                        on_custom_name: move |n: String| form.write().set_custom_writer_name(n),
                        on_designation: move |d: String| form.write().set_writer_designation(d),
                    }

                    div { class: "form-grid",
                        ReferenceSelect {
                            label: "Translator",
                            value: meta.translator.clone(),
                            items: lists.translators.clone(),
                            disabled: busy,
                            on_change: move |v: String| form.write().set_translator(v),
                        }
                        ReferenceSelect {
                            label: "Tag",
                            value: meta.tag.clone(),
                            items: lists.tags.clone(),
                            disabled: busy,
                            on_change: move |v: String| form.write().set_tag(v),
                        }
                        match &item.extra {
                            KindFields::Article => rsx! {},
                            KindFields::Question { answered_status } => rsx! {
                                FormSelect {
                                    label: "Status",
                                    value: answered_status.as_str().to_string(),
                                    disabled: busy,
                                    onchange: move |evt: Event<FormData>| {
                                        let value = evt.value();
                                        let status = AnsweredStatus::from_str_or_default(&value);
                                        form.write().set_answered_status(status);
                                    },
                                    option { value: "unanswered", "Unanswered" }
                                    option { value: "answered", "Answered" }
                                }
                            },
                            KindFields::Event { venue, time } => rsx! {
                                Input {
                                    label: "Venue",
                                    required: true,
                                    value: venue.clone(),
                                    disabled: busy,
                                    error: errors.get("venue").cloned(),
                                    on_input: move |e: FormEvent| form.write().set_venue(e.value()),
                                }
                                Input {
                                    label: "Time",
                                    input_type: "time",
                                    value: time.clone(),
                                    disabled: busy,
                                    on_input: move |e: FormEvent| {
                                        form.write().set_event_time(e.value())
                                    },
                                }
                            },
                        }
                    }
                }
            }

            Card {
                CardContent {
                    MediaPicker { form, preview, preset_urls, disabled: busy }
                }
            }

            for lang in ContentLanguage::ALL {
                Card { key: "{lang.key()}",
                    CardContent {
                        LanguageBlockEditor {
                            kind,
                            lang,
                            block: item.blocks.get(lang).clone(),
                            disabled: busy,
                            on_title: move |v: String| form.write().set_block_title(lang, v),
                            on_title_commit: move |_| form.write().commit_block_title(),
                            on_body: move |v: String| form.write().set_block_body(lang, v),
                        }
                    }
                }
            }

            MessageDialog {
                open: failure.read().is_some(),
                title: "Could not save",
                message: failure().unwrap_or_default(),
                on_close: move |_| failure.set(None),
            }
        }
    }
}

/// Apply the configured upload limit to a fresh form.
fn limited(mut form: ContentForm, max_bytes: u64) -> ContentForm {
    form.media = form.media.with_max_bytes(max_bytes);
    form
}

/// Select over one reference list with an empty "choose" entry.
#[component]
fn ReferenceSelect(
    label: String,
    value: String,
    items: Vec<ReferenceItem>,
    on_change: EventHandler<String>,
    #[props(default = false)] required: bool,
    #[props(default = false)] disabled: bool,
    #[props(default)] error: Option<String>,
) -> Element {
    // A stored value missing from the list is still shown.
    let orphan = !value.is_empty() && !items.iter().any(|i| i.id == value);
    rsx! {
        FormSelect {
            label: label.clone(),
            value: value.clone(),
            required,
            disabled,
            error,
            onchange: move |evt: Event<FormData>| on_change.call(evt.value()),
            option { value: "", "Select {label.to_lowercase()}" }
            if orphan {
                option { value: "{value}", "{value}" }
            }
            for item in items {
                option { key: "{item.id}", value: "{item.id}", "{item.display_value}" }
            }
        }
    }
}

/// Writer picker with the free-text toggle and designation.
#[component]
fn WriterFields(
    writer: WriterChoice,
    designation: String,
    writers: Vec<ReferenceItem>,
    on_select: EventHandler<String>,
    on_custom_mode: EventHandler<bool>,
    on_custom_name: EventHandler<String>,
    on_designation: EventHandler<String>,
    #[props(default = false)] disabled: bool,
    #[props(default)] error: Option<String>,
) -> Element {
    let custom = writer.is_custom();
    rsx! {
        div { class: "form-grid writer-fields",
            label { class: "checkbox-label",
                input {
                    r#type: "checkbox",
                    checked: custom,
                    disabled,
                    onchange: move |evt: FormEvent| on_custom_mode.call(evt.checked()),
                }
                "Writer not in list"
            }
            match &writer {
                WriterChoice::Custom(name) => rsx! {
                    Input {
                        label: "Writer name",
                        required: true,
                        value: name.clone(),
                        disabled,
                        error: error.clone(),
                        on_input: move |e: FormEvent| on_custom_name.call(e.value()),
                    }
                },
                WriterChoice::Known(_) | WriterChoice::Unset => rsx! {
                    ReferenceSelect {
                        label: "Writer",
                        required: true,
                        value: writer.resolved().unwrap_or_default().to_string(),
                        items: writers.clone(),
                        disabled,
                        error: error.clone(),
                        on_change: move |id: String| on_select.call(id),
                    }
                },
            }
            Input {
                label: "Writer designation",
                value: designation,
                disabled,
                on_input: move |e: FormEvent| on_designation.call(e.value()),
            }
        }
    }
}
