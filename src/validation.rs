//! Input validation for form submissions.
//!
//! Field-level rules shared by the web handlers: the comment moderation
//! filter and note slug resolution. Validation errors are plain strings
//! attached to a form field by the caller; nothing here touches HTTP.

use uuid::Uuid;

use crate::slug::slugify;

/// Length of the random suffix used when a title yields an empty slug.
const SLUG_FALLBACK_LEN: usize = 8;

/// Reject comment text containing any of the disallowed substrings.
///
/// Matching is case-insensitive and positional: the word may occur
/// anywhere in the text, including inside another word.
pub fn validate_comment_text(text: &str, forbidden_words: &[String]) -> Result<(), String> {
    let lowered = text.to_lowercase();
    for word in forbidden_words {
        if word.is_empty() {
            continue;
        }
        if lowered.contains(&word.to_lowercase()) {
            return Err(format!("Text may not contain the word '{word}'"));
        }
    }
    Ok(())
}

/// Resolve the slug for a note form: use the supplied slug when present,
/// otherwise derive one from the title.
///
/// Supplied slugs are normalized through the same derivation so the
/// URL-safety invariant holds regardless of input. A title with no
/// representable characters falls back to a generated identifier.
pub fn resolve_note_slug(supplied: Option<&str>, title: &str) -> String {
    let source = match supplied {
        Some(s) if !s.trim().is_empty() => s,
        _ => title,
    };

    let resolved = slugify(source);
    if resolved.is_empty() {
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(SLUG_FALLBACK_LEN)
            .collect();
        format!("note-{suffix}")
    } else {
        resolved
    }
}

/// Error message for a slug that already names another note.
pub fn slug_conflict_error(slug: &str) -> String {
    format!("slug '{slug}' is already in use by another note")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn clean_text_passes_moderation() {
        assert!(validate_comment_text("a perfectly civil remark", &words(&["rascal"])).is_ok());
    }

    #[test]
    fn forbidden_word_is_rejected_anywhere_in_text() {
        let forbidden = words(&["rascal", "scoundrel"]);
        assert!(validate_comment_text("you rascal!", &forbidden).is_err());
        assert!(validate_comment_text("what a scoundrelly move", &forbidden).is_err());
    }

    #[test]
    fn moderation_is_case_insensitive() {
        let forbidden = words(&["rascal"]);
        assert!(validate_comment_text("RaScAl", &forbidden).is_err());
    }

    #[test]
    fn empty_forbidden_entries_are_ignored() {
        assert!(validate_comment_text("anything", &words(&[""])).is_ok());
    }

    #[test]
    fn supplied_slug_wins_over_title() {
        assert_eq!(resolve_note_slug(Some("custom-slug"), "Some Title"), "custom-slug");
    }

    #[test]
    fn blank_supplied_slug_falls_back_to_title() {
        assert_eq!(resolve_note_slug(Some("   "), "Some Title"), "some-title");
        assert_eq!(resolve_note_slug(None, "Заголовок"), "zagolovok");
    }

    #[test]
    fn unrepresentable_title_gets_generated_slug() {
        let slug = resolve_note_slug(None, "!!!");
        assert!(slug.starts_with("note-"));
        assert_eq!(slug.len(), "note-".len() + 8);
    }

    #[test]
    fn conflict_error_names_the_slug() {
        assert!(slug_conflict_error("taken").contains("'taken'"));
    }
}
