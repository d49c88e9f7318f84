//! Delimiter splitting that respects quoted regions and escapes.

use std::borrow::Cow;

use crate::quote::{is_quote, unwrap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unquoted,
    InQuote(char),
    /// After a backslash; remembers the quote to return to.
    Escaped(Option<char>),
}

/// Splits `raw` on `delimiter`, skipping delimiters inside quotes or after a
/// backslash.
///
/// Each segment is trimmed, [`unwrap`]ped and trimmed again; segments that
/// end up empty are dropped, so blank input yields an empty vector. With
/// `unwrap_full` the whole trimmed input is unwrapped before splitting, which
/// lets a single quoted value carry a delimited list.
///
/// # Examples
///
/// ```
/// use cascade_values::split;
///
/// assert_eq!(split("hello, world", ',', false), vec!["hello", "world"]);
/// assert_eq!(split(r#"a,"b,c",d"#, ',', false), vec!["a", "b,c", "d"]);
/// assert_eq!(split(r"a\,b, c", ',', false), vec![r"a\,b", "c"]);
/// assert_eq!(split("'x, y'", ',', false), vec!["x, y"]);
/// assert_eq!(split("'x, y'", ',', true), vec!["x", "y"]);
/// assert!(split("   ", ' ', false).is_empty());
/// ```
pub fn split(raw: &str, delimiter: char, unwrap_full: bool) -> Vec<String> {
    let input: Cow<'_, str> = if unwrap_full {
        unwrap(raw.trim())
    } else {
        Cow::Borrowed(raw)
    };

    let mut tokens = Vec::new();
    let mut state = State::Unquoted;
    let mut start = 0;

    for (idx, ch) in input.char_indices() {
        state = match state {
            State::Escaped(Some(quote)) => State::InQuote(quote),
            State::Escaped(None) => State::Unquoted,
            State::Unquoted if ch == '\\' => State::Escaped(None),
            State::Unquoted if ch == delimiter => {
                push_token(&mut tokens, &input[start..idx]);
                start = idx + ch.len_utf8();
                State::Unquoted
            }
            State::Unquoted if is_quote(ch) => State::InQuote(ch),
            State::Unquoted => State::Unquoted,
            State::InQuote(quote) if ch == '\\' => State::Escaped(Some(quote)),
            State::InQuote(quote) if ch == quote => State::Unquoted,
            State::InQuote(quote) => State::InQuote(quote),
        };
    }
    push_token(&mut tokens, &input[start..]);

    tokens
}

fn push_token(tokens: &mut Vec<String>, segment: &str) {
    let segment = segment.trim();
    if segment.is_empty() {
        return;
    }
    let unwrapped = unwrap(segment);
    let token = unwrapped.trim();
    if !token.is_empty() {
        tokens.push(token.to_string());
    }
}
