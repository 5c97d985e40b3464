/// Characters shown when the query does not occur in the text
const FALLBACK_SNIPPET_CHARS: usize = 60;
const ELLIPSIS: &str = "...";

/// Cuts a snippet around the first case-insensitive occurrence of `query_lower`.
///
/// Up to `context_chars` characters are kept on each side of the match, and `...` marks each
/// side that was cut. Positions are counted in characters of the original text, including when
/// lowercasing changes a character's length. Without a match the first 60 characters are
/// returned.
///
/// `query_lower` must already be lowercase.
pub fn create_snippet(text: &str, query_lower: &str, context_chars: usize) -> String {
    let chars: Vec<char> = text.chars().collect();

    match find_char_range(&chars, query_lower) {
        Some((match_start, match_end)) => {
            let start = match_start.saturating_sub(context_chars);
            let end = match_end.saturating_add(context_chars).min(chars.len());

            let mut snippet = String::new();
            if start > 0 {
                snippet.push_str(ELLIPSIS);
            }
            snippet.extend(&chars[start..end]);
            if end < chars.len() {
                snippet.push_str(ELLIPSIS);
            }
            snippet
        }
        None => {
            let mut snippet: String = chars.iter().take(FALLBACK_SNIPPET_CHARS).collect();
            if chars.len() > FALLBACK_SNIPPET_CHARS {
                snippet.push_str(ELLIPSIS);
            }
            snippet
        }
    }
}

/// Original-text character range `[start, end)` of the first match
fn find_char_range(chars: &[char], query_lower: &str) -> Option<(usize, usize)> {
    if query_lower.is_empty() {
        return None;
    }

    // (byte offset in the lowered text, index of the original char it came from)
    let mut origins = Vec::with_capacity(chars.len());
    let mut lowered = String::with_capacity(chars.len());
    for (index, ch) in chars.iter().enumerate() {
        for lower in ch.to_lowercase() {
            origins.push((lowered.len(), index));
            lowered.push(lower);
        }
    }

    let byte_start = lowered.find(query_lower)?;
    let byte_end = byte_start + query_lower.len();

    let first = origins.partition_point(|(offset, _)| *offset < byte_start);
    let last = origins.partition_point(|(offset, _)| *offset < byte_end).checked_sub(1)?;

    let (_, start) = *origins.get(first)?;
    let (_, end) = *origins.get(last)?;
    Some((start, end + 1))
}
