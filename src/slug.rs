//! # Slug Derivation
//!
//! Turns a note title into a URL-safe identifier: lowercase ASCII
//! alphanumerics separated by single dashes. Cyrillic input is
//! transliterated rather than dropped, so non-Latin titles still produce
//! readable slugs; anything else that cannot be represented is skipped.

/// Derive a slug from free-form text.
///
/// The result contains only `[a-z0-9-]`, never starts or ends with a dash,
/// and never contains two dashes in a row. It is empty when the input has
/// no representable characters at all.
pub fn slugify(text: &str) -> String {
    let mut out = String::new();
    let mut prev_dash = false;

    for c in text.chars().flat_map(|c| c.to_lowercase()) {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            prev_dash = false;
        } else if let Some(mapped) = transliterate(c) {
            out.push_str(mapped);
            prev_dash = false;
        } else if (c.is_whitespace() || c == '-' || c == '_') && !prev_dash && !out.is_empty() {
            out.push('-');
            prev_dash = true;
        }
    }

    out.trim_end_matches('-').to_string()
}

/// Map one lowercase Cyrillic character to its Latin rendering.
///
/// Characters with no sound of their own (hard and soft signs) map to
/// nothing and are handled by the caller as skips.
fn transliterate(c: char) -> Option<&'static str> {
    let mapped = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' | 'й' => "i",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ы' => "y",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    if mapped.is_empty() {
        None
    } else {
        Some(mapped)
    }
}
