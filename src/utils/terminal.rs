//! Terminal output sanitization
//!
//! Transcript text is user-controlled. Anything printed by the CLI goes through [`sanitize`]
//! first so escape sequences embedded in a transcript cannot clear the screen, move the cursor
//! or restyle the terminal.

use std::borrow::Cow;

/// Strips ANSI CSI sequences (`ESC [ ... letter`) and control characters other than tab,
/// newline and carriage return.
///
/// Returns the input borrowed when there is nothing to strip.
///
/// # Examples
///
/// ```
/// use transcript_viewer::utils::terminal::sanitize;
///
/// assert_eq!(sanitize("\x1b[31mRed text\x1b[0m"), "Red text");
/// assert_eq!(sanitize("clean"), "clean");
/// ```
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_stripped_control) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for next_ch in chars.by_ref() {
                if next_ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        if is_stripped_control(ch) {
            continue;
        }

        result.push(ch);
    }

    Cow::Owned(result)
}

fn is_stripped_control(ch: char) -> bool {
    ch.is_control() && !matches!(ch, '\t' | '\n' | '\r')
}
