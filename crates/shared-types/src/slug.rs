use crate::language::LanguageBlocks;

/// Lowercase, hyphen-separated slug. Letters and digits of any script are
/// kept so Urdu and Hindi questions still produce a usable slug.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c == '\'' || c == '\u{2019}' {
            // apostrophes join words: "what's" -> "whats"
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// One-shot slug derivation for questions.
///
/// Returns a new slug only while `current` is empty; once a slug exists it is
/// left alone no matter how the question texts change afterwards.
pub fn derive_slug_once(current: &str, questions: &LanguageBlocks) -> Option<String> {
    if !current.trim().is_empty() {
        return None;
    }
    questions
        .first_non_empty_title()
        .map(|(_, text)| slugify(text))
        .filter(|slug| !slug.is_empty())
}
