//! Small text helpers shared by the thought and reply builders.

/// Marker appended to text cut by [`truncate_chars`].
pub const ELLIPSIS: &str = "...";

/// Truncate a string to at most `max` characters, appending [`ELLIPSIS`] if
/// anything was cut. Counts Unicode scalar values, so multi-byte text is
/// never split mid-character.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + ELLIPSIS.len());
            out.extend(s.chars().take(max));
            out.push_str(ELLIPSIS);
            out
        }
        None => s.to_string(),
    }
}

/// Trimmed view of an optional string, `None` when empty after trimming.
pub fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|t| !t.is_empty())
}
