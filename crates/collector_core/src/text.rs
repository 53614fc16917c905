use std::sync::LazyLock;

use regex::Regex;

/// Markup line break in any spelling: `<br>`, `<BR/>`, `<br />`, `<br\n/>`.
static BREAK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("break marker pattern is valid"));

/// Flatten free text into a single line.
///
/// `<br>` markers and line terminators become spaces, whitespace runs collapse to
/// one space and both ends are trimmed. Applying it twice yields the same string.
pub fn clean_text(input: &str) -> String {
    let mut text = input.to_string();
    // A replacement can join the halves of a nested marker (`<br<br>>`).
    while BREAK_MARKER.is_match(&text) {
        text = BREAK_MARKER.replace_all(&text, " ").into_owned();
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
