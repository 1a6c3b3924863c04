use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::common::normalize_date;
use crate::language::{ContentLanguage, LanguageBlocks};
use crate::reference::ReferenceData;

/// Content types that share the multilingual entry pattern.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Article,
    Question,
    Event,
}

/// HTTP verb used for updates; the backend differs per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMethod {
    Put,
    Patch,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [
        ContentKind::Article,
        ContentKind::Question,
        ContentKind::Event,
    ];

    /// Collection path segment, e.g. `articles` in `POST /articles`.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ContentKind::Article => "articles",
            ContentKind::Question => "questions",
            ContentKind::Event => "events",
        }
    }

    pub fn update_method(&self) -> UpdateMethod {
        match self {
            ContentKind::Question => UpdateMethod::Patch,
            ContentKind::Article | ContentKind::Event => UpdateMethod::Put,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Article => "Article",
            ContentKind::Question => "Question",
            ContentKind::Event => "Event",
        }
    }

    pub fn plural_label(&self) -> &'static str {
        match self {
            ContentKind::Article => "Articles",
            ContentKind::Question => "Questions",
            ContentKind::Event => "Events",
        }
    }

    /// Wire name of the required primary field.
    pub fn primary_field(&self) -> &'static str {
        match self {
            ContentKind::Question => "slug",
            ContentKind::Article | ContentKind::Event => "title",
        }
    }

    pub fn primary_label(&self) -> &'static str {
        match self {
            ContentKind::Question => "Slug",
            ContentKind::Article | ContentKind::Event => "Title",
        }
    }

    /// Wire names of the title and body fields of one language block.
    ///
    /// Articles and events use `englishTitle` / `englishDescription`;
    /// questions use `questionEnglish` / `answerEnglish`.
    pub fn block_fields(&self, lang: ContentLanguage) -> (String, String) {
        match self {
            ContentKind::Question => (
                format!("question{}", lang.suffix()),
                format!("answer{}", lang.suffix()),
            ),
            ContentKind::Article | ContentKind::Event => (
                format!("{}Title", lang.key()),
                format!("{}Description", lang.key()),
            ),
        }
    }

    /// UI labels for the title and body inputs of a language block.
    pub fn block_labels(&self) -> (&'static str, &'static str) {
        match self {
            ContentKind::Question => ("Question", "Answer"),
            ContentKind::Article => ("Title", "Body"),
            ContentKind::Event => ("Title", "Description"),
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.endpoint())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "article" | "articles" => Ok(ContentKind::Article),
            "question" | "questions" => Ok(ContentKind::Question),
            "event" | "events" => Ok(ContentKind::Event),
            other => Err(format!("unknown content kind: {other}")),
        }
    }
}

/// Who wrote the content: a writer from the reference list or a free-text
/// name typed by the editor. Never both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum WriterChoice {
    #[default]
    Unset,
    Known(String),
    Custom(String),
}

impl WriterChoice {
    pub fn is_custom(&self) -> bool {
        matches!(self, WriterChoice::Custom(_))
    }

    /// Resolved value, `None` when nothing usable was chosen.
    pub fn resolved(&self) -> Option<&str> {
        match self {
            WriterChoice::Known(id) | WriterChoice::Custom(id) if !id.trim().is_empty() => {
                Some(id.trim())
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnsweredStatus {
    #[default]
    Unanswered,
    Answered,
}

impl AnsweredStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnsweredStatus::Unanswered => "unanswered",
            AnsweredStatus::Answered => "answered",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "answered" | "true" => AnsweredStatus::Answered,
            _ => AnsweredStatus::Unanswered,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PublicationState {
    #[default]
    Draft,
    Published,
}

impl PublicationState {
    pub fn from_publish(publish: bool) -> Self {
        if publish {
            PublicationState::Published
        } else {
            PublicationState::Draft
        }
    }

    /// Value of the `isPublished` multipart field.
    pub fn as_flag(&self) -> &'static str {
        match self {
            PublicationState::Draft => "false",
            PublicationState::Published => "true",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PublicationState::Draft => "Draft",
            PublicationState::Published => "Published",
        }
    }
}

/// Shared metadata of every content item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentMetadata {
    pub topic: String,
    pub writer: WriterChoice,
    pub writer_designation: String,
    pub translator: String,
    pub tag: String,
    /// Primary content language, independent of the four language blocks.
    pub language: String,
    /// As entered; normalized on the way out.
    pub date: String,
}

/// Fields only one content kind carries.
#[derive(Debug, Clone, PartialEq)]
pub enum KindFields {
    Article,
    Question { answered_status: AnsweredStatus },
    Event { venue: String, time: String },
}

impl KindFields {
    pub fn for_kind(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Article => KindFields::Article,
            ContentKind::Question => KindFields::Question {
                answered_status: AnsweredStatus::default(),
            },
            ContentKind::Event => KindFields::Event {
                venue: String::new(),
                time: String::new(),
            },
        }
    }
}

/// In-memory state of one article, question or event.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub kind: ContentKind,
    pub id: Option<String>,
    /// Title for articles and events, slug for questions.
    pub primary: String,
    pub blocks: LanguageBlocks,
    pub metadata: ContentMetadata,
    pub extra: KindFields,
    pub publication: PublicationState,
}

impl ContentItem {
    pub fn empty(kind: ContentKind) -> Self {
        Self {
            kind,
            id: None,
            primary: String::new(),
            blocks: LanguageBlocks::default(),
            metadata: ContentMetadata::default(),
            extra: KindFields::for_kind(kind),
            publication: PublicationState::default(),
        }
    }

    /// Hydrate from a record returned by `GET /{entity}/{id}`.
    ///
    /// A writer value that is not in `refs.writers` is treated as a custom
    /// name. Unparseable dates are kept verbatim so the editor can fix them.
    pub fn from_record(kind: ContentKind, record: &Value, refs: &ReferenceData) -> Self {
        let mut item = Self::empty(kind);
        item.id = record_id(record);
        item.primary = text(record, kind.primary_field());

        for lang in ContentLanguage::ALL {
            let (title_field, body_field) = kind.block_fields(lang);
            item.blocks.set_title(lang, text(record, &title_field));
            item.blocks.set_body(lang, text(record, &body_field));
        }

        let writer = text(record, "writer");
        let custom = text(record, "customWriter");
        item.metadata = ContentMetadata {
            topic: text(record, "topic"),
            writer: if !custom.trim().is_empty() {
                WriterChoice::Custom(custom)
            } else if writer.trim().is_empty() {
                WriterChoice::Unset
            } else if refs.writer(&writer).is_some() {
                WriterChoice::Known(writer)
            } else {
                WriterChoice::Custom(writer)
            },
            writer_designation: text(record, "writerDesignation"),
            translator: text(record, "translator"),
            tag: text(record, "tag"),
            language: text(record, "language"),
            date: {
                let raw = text(record, "date");
                normalize_date(&raw).unwrap_or(raw)
            },
        };

        item.extra = match kind {
            ContentKind::Article => KindFields::Article,
            ContentKind::Question => KindFields::Question {
                answered_status: AnsweredStatus::from_str_or_default(&text(
                    record,
                    "answeredStatus",
                )),
            },
            ContentKind::Event => KindFields::Event {
                venue: text(record, "venue"),
                time: text(record, "time"),
            },
        };

        item.publication = PublicationState::from_publish(flag(record, "isPublished"));
        item
    }
}

/// `_id` (document stores) or `id`, as a string.
pub fn record_id(record: &Value) -> Option<String> {
    ["_id", "id"].iter().find_map(|key| match record.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// String view of a scalar field; nested `{name}` objects collapse to their
/// name so populated references hydrate like plain ids.
pub fn text(record: &Value, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(obj @ Value::Object(_)) => record_id(obj)
            .or_else(|| obj.get("name").and_then(|n| n.as_str()).map(str::to_string))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn flag(record: &Value, key: &str) -> bool {
    match record.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceItem;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn refs_with_writer(id: &str) -> ReferenceData {
        ReferenceData {
            writers: vec![ReferenceItem {
                id: id.to_string(),
                display_value: "Mufti Ahmad".to_string(),
                designation: Some("Mufti".to_string()),
            }],
            ..ReferenceData::default()
        }
    }

    #[test]
    fn block_field_names_per_kind() {
        assert_eq!(
            ContentKind::Article.block_fields(ContentLanguage::English),
            ("englishTitle".to_string(), "englishDescription".to_string())
        );
        assert_eq!(
            ContentKind::Question.block_fields(ContentLanguage::Roman),
            ("questionRoman".to_string(), "answerRoman".to_string())
        );
        assert_eq!(
            ContentKind::Event.block_fields(ContentLanguage::Urdu).0,
            "urduTitle"
        );
    }

    #[test]
    fn update_method_per_kind() {
        assert_eq!(ContentKind::Question.update_method(), UpdateMethod::Patch);
        assert_eq!(ContentKind::Article.update_method(), UpdateMethod::Put);
        assert_eq!(ContentKind::Event.update_method(), UpdateMethod::Put);
    }

    #[test]
    fn kind_parses_from_route_segment() {
        assert_eq!("questions".parse::<ContentKind>(), Ok(ContentKind::Question));
        assert_eq!(ContentKind::Event.to_string(), "events");
        assert!("books".parse::<ContentKind>().is_err());
    }

    #[test]
    fn hydrate_question_record() {
        let record = json!({
            "_id": "q-17",
            "slug": "what-is-zakat",
            "questionEnglish": "What is Zakat?",
            "answerEnglish": "<p>Obligatory charity.</p>",
            "questionUrdu": "زکوٰۃ کیا ہے؟",
            "topic": "Fiqh",
            "writer": "w-1",
            "writerDesignation": "Mufti",
            "language": "English",
            "date": "2024-03-10T00:00:00.000Z",
            "answeredStatus": "answered",
            "isPublished": true
        });
        let item =
            ContentItem::from_record(ContentKind::Question, &record, &refs_with_writer("w-1"));

        assert_eq!(item.id.as_deref(), Some("q-17"));
        assert_eq!(item.primary, "what-is-zakat");
        assert_eq!(item.blocks.get(ContentLanguage::English).title, "What is Zakat?");
        assert_eq!(item.blocks.get(ContentLanguage::Hindi).title, "");
        assert_eq!(item.metadata.writer, WriterChoice::Known("w-1".to_string()));
        assert_eq!(item.metadata.date, "2024-03-10");
        assert_eq!(
            item.extra,
            KindFields::Question {
                answered_status: AnsweredStatus::Answered,
            }
        );
        assert_eq!(item.publication, PublicationState::Published);
    }

    #[test]
    fn hydrate_unknown_writer_becomes_custom() {
        let record = json!({
            "id": 4,
            "title": "Eid Gathering",
            "writer": "Guest Speaker",
            "venue": "Main Hall"
        });
        let item = ContentItem::from_record(ContentKind::Event, &record, &ReferenceData::default());
        assert_eq!(item.id.as_deref(), Some("4"));
        assert_eq!(item.metadata.writer, WriterChoice::Custom("Guest Speaker".to_string()));
        assert_eq!(
            item.extra,
            KindFields::Event {
                venue: "Main Hall".to_string(),
                time: String::new(),
            }
        );
        assert_eq!(item.publication, PublicationState::Draft);
    }

    #[test]
    fn populated_reference_objects_collapse_to_id() {
        let record = json!({ "topic": { "_id": "t-9", "name": "Fiqh" } });
        assert_eq!(text(&record, "topic"), "t-9");
    }

    #[test]
    fn writer_choice_resolution() {
        assert_eq!(WriterChoice::Unset.resolved(), None);
        assert_eq!(WriterChoice::Custom("  ".into()).resolved(), None);
        assert_eq!(WriterChoice::Custom(" Guest ".into()).resolved(), Some("Guest"));
        assert_eq!(WriterChoice::Known("w-1".into()).resolved(), Some("w-1"));
    }
}
