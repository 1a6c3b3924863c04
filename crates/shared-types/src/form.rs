use serde_json::Value;
use std::collections::BTreeMap;

use crate::common::normalize_date;
use crate::content::{
    AnsweredStatus, ContentItem, ContentKind, KindFields, PublicationState, WriterChoice,
};
use crate::editor::is_blank_html;
use crate::error::AppError;
use crate::language::ContentLanguage;
use crate::media::MediaSelection;
use crate::reference::ReferenceData;
use crate::slug::derive_slug_once;

/// Controls whether the form creates a new record or edits one.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Ordered multipart text fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Add the field only when it has a non-blank value.
    pub fn push_optional(&mut self, name: &str, value: &str) {
        if !value.trim().is_empty() {
            self.push(name, value.trim());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for FormFields {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// State of one multilingual content form: the item being edited, its
/// media selection and whether it creates or updates.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentForm {
    pub item: ContentItem,
    pub media: MediaSelection,
    mode: FormMode,
}

impl ContentForm {
    pub fn create(kind: ContentKind) -> Self {
        Self {
            item: ContentItem::empty(kind),
            media: MediaSelection::for_create(),
            mode: FormMode::Create,
        }
    }

    /// Edit form hydrated from a fetched record. Media starts as
    /// "unchanged" until the image probe reports back.
    pub fn edit(
        kind: ContentKind,
        id: impl Into<String>,
        record: &Value,
        refs: &ReferenceData,
    ) -> Self {
        let id = id.into();
        let mut item = ContentItem::from_record(kind, record, refs);
        item.id = Some(id.clone());
        Self {
            item,
            media: MediaSelection::for_edit(),
            mode: FormMode::Edit { id },
        }
    }

    pub fn kind(&self) -> ContentKind {
        self.item.kind
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn edit_id(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Edit { id } => Some(id),
            FormMode::Create => None,
        }
    }

    pub fn set_primary(&mut self, value: impl Into<String>) {
        self.item.primary = value.into();
    }

    pub fn set_block_title(&mut self, lang: ContentLanguage, value: impl Into<String>) {
        self.item.blocks.set_title(lang, value);
    }

    /// Called once a question text is committed (the field loses focus).
    /// Seeds an empty slug from the question texts; an existing slug is
    /// never touched. No-op for other kinds.
    pub fn commit_block_title(&mut self) {
        if let Some(slug) = self.derived_slug() {
            self.item.primary = slug;
        }
    }

    fn derived_slug(&self) -> Option<String> {
        if self.kind() != ContentKind::Question {
            return None;
        }
        derive_slug_once(&self.item.primary, &self.item.blocks)
    }

    /// Primary value as it will be sent. A question whose slug is still
    /// empty falls back to one derived from its texts.
    pub fn primary_value(&self) -> String {
        self.derived_slug()
            .unwrap_or_else(|| self.item.primary.trim().to_string())
    }

    pub fn set_block_body(&mut self, lang: ContentLanguage, html: impl Into<String>) {
        self.item.blocks.set_body(lang, html);
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.item.metadata.topic = topic.into();
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.item.metadata.language = language.into();
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.item.metadata.date = date.into();
    }

    pub fn set_translator(&mut self, translator: impl Into<String>) {
        self.item.metadata.translator = translator.into();
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.item.metadata.tag = tag.into();
    }

    /// Pick a writer from the reference list; the designation follows the
    /// writer's record. An empty id clears the selection.
    pub fn select_writer(&mut self, id: &str, refs: &ReferenceData) {
        let meta = &mut self.item.metadata;
        if id.trim().is_empty() {
            meta.writer = WriterChoice::Unset;
            meta.writer_designation.clear();
            return;
        }
        meta.writer = WriterChoice::Known(id.to_string());
        meta.writer_designation = refs
            .writer(id)
            .and_then(|w| w.designation.clone())
            .unwrap_or_default();
    }

    /// Toggle free-text writer entry. Entering drops the selected writer and
    /// its designation; leaving drops the custom name and the designation.
    pub fn set_custom_writer_mode(&mut self, custom: bool) {
        let meta = &mut self.item.metadata;
        if custom == meta.writer.is_custom() {
            return;
        }
        meta.writer = if custom {
            WriterChoice::Custom(String::new())
        } else {
            WriterChoice::Unset
        };
        meta.writer_designation.clear();
    }

    /// Ignored unless custom mode is on.
    pub fn set_custom_writer_name(&mut self, name: impl Into<String>) {
        if let WriterChoice::Custom(current) = &mut self.item.metadata.writer {
            *current = name.into();
        }
    }

    pub fn set_writer_designation(&mut self, designation: impl Into<String>) {
        self.item.metadata.writer_designation = designation.into();
    }

    pub fn set_answered_status(&mut self, status: AnsweredStatus) {
        if let KindFields::Question { answered_status } = &mut self.item.extra {
            *answered_status = status;
        }
    }

    pub fn set_venue(&mut self, value: impl Into<String>) {
        if let KindFields::Event { venue, .. } = &mut self.item.extra {
            *venue = value.into();
        }
    }

    pub fn set_event_time(&mut self, value: impl Into<String>) {
        if let KindFields::Event { time, .. } = &mut self.item.extra {
            *time = value.into();
        }
    }

    /// Check every required field and report all problems in one error.
    pub fn validate(&self) -> Result<(), AppError> {
        let kind = self.kind();
        let meta = &self.item.metadata;
        let mut missing: Vec<(&str, &str)> = Vec::new();

        if self.primary_value().is_empty() {
            missing.push((kind.primary_field(), kind.primary_label()));
        }
        if meta.topic.trim().is_empty() {
            missing.push(("topic", "Topic"));
        }
        if meta.language.trim().is_empty() {
            missing.push(("language", "Language"));
        }
        if meta.date.trim().is_empty() {
            missing.push(("date", "Date"));
        }
        if meta.writer.resolved().is_none() {
            missing.push(("writer", "Writer"));
        }
        if let KindFields::Event { venue, .. } = &self.item.extra {
            if venue.trim().is_empty() {
                missing.push(("venue", "Venue"));
            }
        }

        let bad_date = if meta.date.trim().is_empty() {
            None
        } else {
            normalize_date(&meta.date).err()
        };

        match (missing.is_empty(), bad_date) {
            (true, None) => Ok(()),
            (true, Some(date_err)) => Err(date_err),
            (false, None) => Err(AppError::missing_fields(&missing)),
            (false, Some(date_err)) => {
                let mut err = AppError::missing_fields(&missing);
                let mut field_errors: BTreeMap<String, String> = err.field_errors;
                field_errors.extend(date_err.field_errors);
                err.field_errors = field_errors;
                err.message = format!("{}. {}", err.message, date_err.message);
                Err(err)
            }
        }
    }

    /// Flatten the validated form into multipart text fields.
    ///
    /// Every language-block field is present, possibly empty. Optional
    /// metadata is left out when blank.
    pub fn to_fields(&self, publish: bool) -> Result<FormFields, AppError> {
        self.validate()?;
        let kind = self.kind();
        let meta = &self.item.metadata;
        let mut fields = FormFields::default();

        fields.push(kind.primary_field(), self.primary_value());

        for (lang, block) in self.item.blocks.iter() {
            let (title_field, body_field) = kind.block_fields(lang);
            fields.push(title_field, block.title.trim());
            let body = if is_blank_html(&block.body) { "" } else { block.body.as_str() };
            fields.push(body_field, body);
        }

        fields.push("topic", meta.topic.trim());
        fields.push("language", meta.language.trim());
        fields.push("date", normalize_date(&meta.date)?);

        if let Some(writer) = meta.writer.resolved() {
            fields.push("writer", writer);
            if meta.writer.is_custom() {
                fields.push("customWriter", writer);
            }
        }
        fields.push_optional("writerDesignation", &meta.writer_designation);
        fields.push_optional("translator", &meta.translator);
        fields.push_optional("tag", &meta.tag);

        match &self.item.extra {
            KindFields::Article => {}
            KindFields::Question { answered_status } => {
                fields.push("answeredStatus", answered_status.as_str());
            }
            KindFields::Event { venue, time } => {
                fields.push("venue", venue.trim());
                fields.push_optional("time", time);
            }
        }

        fields.push("isPublished", PublicationState::from_publish(publish).as_flag());
        Ok(fields)
    }
}
