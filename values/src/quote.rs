//! Single-value unwrapping.

use std::borrow::Cow;

/// Characters that open and close a quoted region.
pub const QUOTE_CHARS: [char; 3] = ['\'', '"', '`'];

/// Returns `true` if `ch` is one of [`QUOTE_CHARS`].
pub fn is_quote(ch: char) -> bool {
    QUOTE_CHARS.contains(&ch)
}

/// Returns the text between a matching pair of outer quotes.
///
/// `None` unless `raw` has at least two characters and starts and ends with
/// the same quote character.
pub fn quoted_interior(raw: &str) -> Option<&str> {
    let mut chars = raw.chars();
    let first = chars.next()?;
    let last = chars.next_back()?;
    if first != last || !is_quote(first) {
        return None;
    }
    Some(&raw[first.len_utf8()..raw.len() - last.len_utf8()])
}

/// Strips one layer of matching outer quotes and resolves backslash escapes.
///
/// A value that is not fully wrapped in matching quotes is returned verbatim,
/// backslashes included. Inside quotes, a backslash followed by any character
/// yields that character; a trailing lone backslash is kept.
///
/// # Examples
///
/// ```
/// use cascade_values::unwrap;
///
/// assert_eq!(unwrap("''"), "");
/// assert_eq!(unwrap(r"'something\'s escaped'"), "something's escaped");
/// assert_eq!(unwrap(r#""c:\\tacotown""#), r"c:\tacotown");
/// assert_eq!(unwrap(r"something\'s still backslashed"), r"something\'s still backslashed");
/// assert_eq!(unwrap("'unbalanced\""), "'unbalanced\"");
/// ```
pub fn unwrap(raw: &str) -> Cow<'_, str> {
    match quoted_interior(raw) {
        Some(interior) => Cow::Owned(unescape(interior)),
        None => Cow::Borrowed(raw),
    }
}

fn unescape(interior: &str) -> String {
    let mut out = String::with_capacity(interior.len());
    let mut chars = interior.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(escaped) => out.push(escaped),
            None => out.push(ch),
        }
    }

    out
}
