/// Characters that close a sentence
const SENTENCE_ENDS: &[char] = &['.', '。', '!', '?', '！', '？'];

/// Shorten `text` to at most `max_chars` characters, cutting back to the last
/// sentence terminator (kept in the output).
///
/// Without a terminator the cut falls on the last whitespace; text with no
/// whitespace at all (CJK runs) keeps the plain `max_chars` prefix.
pub fn truncate_at_sentence(text: &str, max_chars: usize) -> String {
    let end = match text.char_indices().nth(max_chars) {
        Some((idx, _)) => idx,
        None => return text.to_string(),
    };
    let head = &text[..end];

    if let Some((idx, ch)) = head
        .char_indices()
        .rev()
        .find(|(_, c)| SENTENCE_ENDS.contains(c))
    {
        return head[..idx + ch.len_utf8()].to_string();
    }

    if let Some(idx) = head.rfind(char::is_whitespace) {
        let cut = head[..idx].trim_end();
        if !cut.is_empty() {
            return cut.to_string();
        }
    }

    head.to_string()
}
