//! Keyword extraction from article text.
//!
//! Feeds both article enrichment (tags on fetched articles) and the journal
//! interest analysis behind recommendations.

/// Maximum keywords kept per text.
pub const MAX_KEYWORDS: usize = 5;

/// Minimum token length. Shorter words carry almost no topical signal.
const MIN_TOKEN_LEN: usize = 4;

/// English stopwords, restricted to words long enough to survive the token
/// length floor.
const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "because", "been", "before", "being", "below",
    "between", "both", "could", "does", "doing", "down", "during", "each", "everything", "from",
    "further", "have", "having", "here", "into", "itself", "just", "more", "most", "much", "many",
    "once", "only", "other", "over", "said", "same", "says", "should", "some", "such", "than",
    "that", "their", "theirs", "them", "then", "there", "these", "they", "this", "those",
    "through", "under", "until", "very", "well", "were", "what", "when", "where", "which",
    "while", "will", "with", "would", "your", "yours",
];

fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Extracts up to [`MAX_KEYWORDS`] keywords from free text.
///
/// Lowercases, tokenizes into ASCII-alphabetic runs of at least four
/// characters, drops stopwords, and dedupes preserving first occurrence.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut keywords: Vec<String> = Vec::new();

    for token in lower.split(|c: char| !c.is_ascii_alphabetic()) {
        if token.len() < MIN_TOKEN_LEN || is_stopword(token) {
            continue;
        }
        if keywords.iter().any(|k| k == token) {
            continue;
        }
        keywords.push(token.to_string());
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
    }

    keywords
}
