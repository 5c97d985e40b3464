const BACKSPACE: char = '\u{0008}';

/// Resolves backspace control characters in producer text.
///
/// Each U+0008 deletes the character emitted just before it; a backspace with nothing before it
/// is dropped. Text without backspaces is returned unchanged, so repairing twice is the same as
/// repairing once.
///
/// # Examples
///
/// ```
/// use transcript_viewer::content::repair;
///
/// assert_eq!(repair("ab\u{8}c"), "ac");
/// assert_eq!(repair("\u{8}abc"), "abc");
/// ```
pub fn repair(raw: &str) -> String {
    if !raw.contains(BACKSPACE) {
        return raw.to_string();
    }

    let mut repaired = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == BACKSPACE {
            repaired.pop();
        } else {
            repaired.push(ch);
        }
    }
    repaired
}
