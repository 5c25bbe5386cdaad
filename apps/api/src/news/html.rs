//! Minimal HTML extraction for article enrichment.
//!
//! Article pages are scraped for a lead image and readable body text only, so
//! a full HTML parser is overkill: plain string scanning over an
//! ASCII-lowercased copy keeps the byte offsets valid for slicing the
//! original document.

/// Cap on extracted body text when falling back to the whole `<body>`.
pub const BODY_TEXT_MAX_CHARS: usize = 2000;

/// Returns the `src` of the first `<img>` tag, if any.
pub fn first_img_src(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let tag_start = lower.find("<img")?;
    let tag_end = lower[tag_start..].find('>')? + tag_start;
    let tag = &html[tag_start..tag_end];
    let tag_lower = &lower[tag_start..tag_end];

    // whitespace-prefixed match so data-src and friends don't qualify
    let src_pos = tag_lower.find(" src=")? + 5;
    let rest = &tag[src_pos..];
    let mut chars = rest.chars();
    let (quote, value_start) = match chars.next()? {
        q @ ('"' | '\'') => (Some(q), src_pos + 1),
        _ => (None, src_pos),
    };

    let value = &tag[value_start..];
    let end = match quote {
        Some(q) => value.find(q)?,
        None => value
            .find(|c: char| c.is_whitespace() || c == '>')
            .unwrap_or(value.len()),
    };

    let src = value[..end].trim();
    if src.is_empty() {
        None
    } else {
        Some(src.to_string())
    }
}

/// Returns the inner markup of the first `<tag ...>...</tag>` element.
fn element_inner<'a>(html: &'a str, lower: &str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");

    let open_pos = lower.find(&open)?;
    let content_start = lower[open_pos..].find('>')? + open_pos + 1;
    let content_end = lower[content_start..].find(&close)? + content_start;
    Some(&html[content_start..content_end])
}

/// Strips `<script>`/`<style>` blocks, removes the remaining tags and decodes
/// the handful of entities that actually show up in news markup.
pub fn strip_tags(html: &str) -> String {
    let without_blocks = remove_blocks(&remove_blocks(html, "script"), "style");

    let mut text = String::with_capacity(without_blocks.len());
    let mut in_tag = false;
    for c in without_blocks.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                // tags act as word separators once removed
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    decode_entities(&text)
}

fn remove_blocks(html: &str, tag: &str) -> String {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    let lower = html.to_ascii_lowercase();

    let mut out = String::with_capacity(html.len());
    let mut pos = 0;
    while let Some(start) = lower[pos..].find(&open) {
        let start = pos + start;
        out.push_str(&html[pos..start]);
        match lower[start..].find(&close) {
            Some(end) => pos = start + end + close.len(),
            None => return out, // unterminated block: drop the rest
        }
    }
    out.push_str(&html[pos..]);
    out
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Extracts readable body text: the first `<article>` element when present,
/// otherwise the `<body>` (or the whole document) capped at
/// [`BODY_TEXT_MAX_CHARS`].
pub fn extract_body_text(html: &str) -> String {
    let lower = html.to_ascii_lowercase();

    if let Some(inner) = element_inner(html, &lower, "article") {
        return strip_tags(inner);
    }

    let inner = element_inner(html, &lower, "body").unwrap_or(html);
    strip_tags(inner).chars().take(BODY_TEXT_MAX_CHARS).collect()
}
