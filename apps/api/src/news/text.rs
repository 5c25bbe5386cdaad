//! Cleanup for scraped article text.
//!
//! Scraped pages arrive with collapsed markup artifacts: glued sentences
//! ("world.The"), timestamp prefixes ("BST 14:02..."), navigation crumbs
//! before the first real sentence. The cleaner normalizes those before the
//! text is cut down to a description.

/// Length of the generated article description.
pub const DESCRIPTION_MAX_CHARS: usize = 200;

/// Collapses all whitespace runs to single spaces and trims.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes scraped article text.
pub fn clean_article_text(raw: &str) -> String {
    let mut text = collapse_whitespace(raw);

    // Guardian pages often lead with a "BST ..." timestamp fragment
    if text
        .get(..3)
        .map(|p| p.eq_ignore_ascii_case("bst"))
        .unwrap_or(false)
    {
        text = text[3..].trim_start().to_string();
    }

    // Drop navigation/byline crumbs before the first capitalized word
    if let Some(pos) = text.find(|c: char| c.is_ascii_uppercase()) {
        if pos > 0 {
            text = text[pos..].to_string();
        }
    }

    collapse_whitespace(&respace(&text))
}

/// Re-inserts the spaces that tag-stripping swallowed: after sentence
/// punctuation, between digit/letter runs and at camelCase joins.
fn respace(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 16);

    for (i, &c) in chars.iter().enumerate() {
        out.push(c);
        let Some(&next) = chars.get(i + 1) else {
            break;
        };

        let sentence_join = matches!(c, '.' | '!' | '?')
            && next.is_ascii_alphabetic()
            && i > 0
            && chars[i - 1].is_ascii_alphabetic();
        let digit_join = c.is_ascii_digit() && next.is_ascii_alphabetic();
        let camel_join = c.is_ascii_lowercase() && next.is_ascii_uppercase();

        if sentence_join || digit_join || camel_join {
            out.push(' ');
        }
    }

    out
}

/// Char-boundary-safe prefix of at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
