//! Text helpers for outbound messages (chunking, truncation).

/// First `max_chars` characters of `s` (char-boundary safe).
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate to `max_len` chars, appending `...` when something was cut.
pub fn truncate_text(s: &str, max_len: usize) -> String {
    let head = take_chars(s, max_len);
    if head.len() == s.len() {
        s.to_string()
    } else {
        format!("{head}...")
    }
}

/// Split `text` into sequential chunks of at most `limit` characters.
///
/// Telegram rejects messages over 4096 chars; replies are sent chunk by chunk
/// in order. Empty input yields no chunks.
pub fn split_chunks(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut out = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let head = take_chars(rest, limit);
        out.push(head.to_string());
        rest = &rest[head.len()..];
    }
    out
}
