//! Small string helpers shared by the HTTP clients.

/// Truncate to at most `max` bytes, backing off to a char boundary so
/// multi-byte characters are never split.
pub fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
