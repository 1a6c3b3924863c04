use crate::language::ContentLanguage;

/// A font the rich-text editor offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontFamily {
    pub key: &'static str,
    pub label: &'static str,
    pub css_stack: &'static str,
}

pub const FONT_FAMILIES: &[FontFamily] = &[
    FontFamily {
        key: "sans",
        label: "Sans Serif",
        css_stack: "'Inter', 'Segoe UI', sans-serif",
    },
    FontFamily {
        key: "serif",
        label: "Serif",
        css_stack: "'Georgia', 'Times New Roman', serif",
    },
    FontFamily {
        key: "nastaleeq",
        label: "Nastaleeq",
        css_stack: "'Jameel Noori Nastaleeq', 'Noto Nastaliq Urdu', serif",
    },
    FontFamily {
        key: "naskh",
        label: "Naskh",
        css_stack: "'Noto Naskh Arabic', 'Amiri', serif",
    },
    FontFamily {
        key: "devanagari",
        label: "Devanagari",
        css_stack: "'Noto Sans Devanagari', 'Mangal', sans-serif",
    },
];

/// Formatting commands on the editor toolbar, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarFormat {
    Bold,
    Italic,
    Underline,
    Heading,
    Quote,
    OrderedList,
    BulletList,
    Link,
}

impl ToolbarFormat {
    pub fn label(&self) -> &'static str {
        match self {
            ToolbarFormat::Bold => "B",
            ToolbarFormat::Italic => "I",
            ToolbarFormat::Underline => "U",
            ToolbarFormat::Heading => "H",
            ToolbarFormat::Quote => "\u{201C}",
            ToolbarFormat::OrderedList => "1.",
            ToolbarFormat::BulletList => "\u{2022}",
            ToolbarFormat::Link => "\u{1F517}",
        }
    }

    /// Opening and closing markup wrapped around the selection.
    pub fn markup(&self) -> (&'static str, &'static str) {
        match self {
            ToolbarFormat::Bold => ("<strong>", "</strong>"),
            ToolbarFormat::Italic => ("<em>", "</em>"),
            ToolbarFormat::Underline => ("<u>", "</u>"),
            ToolbarFormat::Heading => ("<h3>", "</h3>"),
            ToolbarFormat::Quote => ("<blockquote>", "</blockquote>"),
            ToolbarFormat::OrderedList => ("<ol><li>", "</li></ol>"),
            ToolbarFormat::BulletList => ("<ul><li>", "</li></ul>"),
            ToolbarFormat::Link => ("<a href=\"\">", "</a>"),
        }
    }
}

pub const TOOLBAR_FORMATS: &[ToolbarFormat] = &[
    ToolbarFormat::Bold,
    ToolbarFormat::Italic,
    ToolbarFormat::Underline,
    ToolbarFormat::Heading,
    ToolbarFormat::Quote,
    ToolbarFormat::OrderedList,
    ToolbarFormat::BulletList,
    ToolbarFormat::Link,
];

pub fn font_by_key(key: &str) -> Option<&'static FontFamily> {
    FONT_FAMILIES.iter().find(|f| f.key == key)
}

/// Font an editor starts with for a given language block.
pub fn default_font(lang: ContentLanguage) -> &'static FontFamily {
    let key = match lang {
        ContentLanguage::Urdu => "nastaleeq",
        ContentLanguage::Hindi => "devanagari",
        ContentLanguage::English | ContentLanguage::Roman => "sans",
    };
    font_by_key(key).unwrap_or(&FONT_FAMILIES[0])
}

/// Append a formatting snippet to the editor's HTML.
pub fn apply_format(html: &str, format: ToolbarFormat) -> String {
    let (open, close) = format.markup();
    format!("{html}{open}{close}")
}

/// Text content of an HTML fragment with tags removed and whitespace
/// collapsed. Used for previews and list search.
pub fn plain_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                out.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    let decoded = out
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Editors emit `<p><br></p>` for an empty document.
pub fn is_blank_html(html: &str) -> bool {
    plain_text(html).is_empty()
}

/// First `max_chars` characters of the plain text, with an ellipsis when cut.
pub fn preview_text(html: &str, max_chars: usize) -> String {
    let text = plain_text(html);
    if text.chars().count() <= max_chars {
        return text;
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_editor_output_is_empty() {
        assert!(is_blank_html("<p><br></p>"));
        assert!(is_blank_html("<p>&nbsp;</p>"));
        assert!(!is_blank_html("<p>Zakat</p>"));
    }

    #[test]
    fn plain_text_strips_tags() {
        assert_eq!(
            plain_text("<h3>Rules</h3><p>Fast from <strong>dawn</strong> &amp; pray</p>"),
            "Rules Fast from dawn & pray"
        );
    }

    #[test]
    fn preview_cuts_on_char_boundary() {
        assert_eq!(preview_text("<p>روزہ رکھنا فرض ہے</p>", 4), "روزہ...");
        assert_eq!(preview_text("short", 10), "short");
    }

    #[test]
    fn default_fonts_follow_script() {
        assert_eq!(default_font(ContentLanguage::Urdu).key, "nastaleeq");
        assert_eq!(default_font(ContentLanguage::Hindi).key, "devanagari");
        assert_eq!(default_font(ContentLanguage::Roman).key, "sans");
    }

    #[test]
    fn apply_format_appends_markup() {
        assert_eq!(apply_format("<p>a</p>", ToolbarFormat::Bold), "<p>a</p><strong></strong>");
    }
}
