use serde::{Deserialize, Serialize};

/// The four parallel content languages, in slug-derivation priority order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentLanguage {
    English,
    Urdu,
    Roman,
    Hindi,
}

/// Text direction of a language block's inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

impl ContentLanguage {
    pub const ALL: [ContentLanguage; 4] = [
        ContentLanguage::English,
        ContentLanguage::Urdu,
        ContentLanguage::Roman,
        ContentLanguage::Hindi,
    ];

    fn index(self) -> usize {
        match self {
            ContentLanguage::English => 0,
            ContentLanguage::Urdu => 1,
            ContentLanguage::Roman => 2,
            ContentLanguage::Hindi => 3,
        }
    }

    /// Lowercase key, also the prefix of article/event field names.
    pub fn key(&self) -> &'static str {
        match self {
            ContentLanguage::English => "english",
            ContentLanguage::Urdu => "urdu",
            ContentLanguage::Roman => "roman",
            ContentLanguage::Hindi => "hindi",
        }
    }

    /// Capitalized key, the suffix of question field names.
    pub fn suffix(&self) -> &'static str {
        match self {
            ContentLanguage::English => "English",
            ContentLanguage::Urdu => "Urdu",
            ContentLanguage::Roman => "Roman",
            ContentLanguage::Hindi => "Hindi",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentLanguage::English => "English",
            ContentLanguage::Urdu => "Urdu",
            ContentLanguage::Roman => "Roman Urdu",
            ContentLanguage::Hindi => "Hindi",
        }
    }

    pub fn direction(&self) -> TextDirection {
        match self {
            ContentLanguage::Urdu => TextDirection::Rtl,
            _ => TextDirection::Ltr,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "english" => Some(ContentLanguage::English),
            "urdu" => Some(ContentLanguage::Urdu),
            "roman" | "roman urdu" => Some(ContentLanguage::Roman),
            "hindi" => Some(ContentLanguage::Hindi),
            _ => None,
        }
    }
}

/// Title and rich-text body for one language.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LanguageBlock {
    pub title: String,
    /// HTML produced by the rich-text editor.
    pub body: String,
}

/// All four language blocks. Backed by a fixed array so no language can be
/// missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageBlocks {
    blocks: [LanguageBlock; 4],
}

impl LanguageBlocks {
    pub fn get(&self, lang: ContentLanguage) -> &LanguageBlock {
        &self.blocks[lang.index()]
    }

    pub fn get_mut(&mut self, lang: ContentLanguage) -> &mut LanguageBlock {
        &mut self.blocks[lang.index()]
    }

    pub fn set_title(&mut self, lang: ContentLanguage, title: impl Into<String>) {
        self.get_mut(lang).title = title.into();
    }

    pub fn set_body(&mut self, lang: ContentLanguage, body: impl Into<String>) {
        self.get_mut(lang).body = body.into();
    }

    /// Blocks in fixed display order.
    pub fn iter(&self) -> impl Iterator<Item = (ContentLanguage, &LanguageBlock)> {
        ContentLanguage::ALL
            .into_iter()
            .map(move |lang| (lang, self.get(lang)))
    }

    /// First non-blank title, checked English, Urdu, Roman, Hindi.
    pub fn first_non_empty_title(&self) -> Option<(ContentLanguage, &str)> {
        self.iter()
            .find(|(_, block)| !block.title.trim().is_empty())
            .map(|(lang, block)| (lang, block.title.trim()))
    }
}
