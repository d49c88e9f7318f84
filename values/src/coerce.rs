//! Typed interpretation of raw values.
//!
//! Every function here first [`unwrap`]s its input, so `'4GB'` and `4GB`
//! coerce identically.

use regex::Regex;

use crate::error::{Result, ValueError};
use crate::quote::unwrap;

const KIB: u64 = 1024;

/// Interprets a boolean.
///
/// Case-insensitive; `1`, `true`, `on`, `yes` are true and the empty string,
/// `0`, `false`, `off`, `no` are false.
///
/// # Errors
///
/// [`ValueError::InvalidBoolean`] for any other spelling.
///
/// # Examples
///
/// ```
/// use cascade_values::coerce::parse_bool;
///
/// assert_eq!(parse_bool("ON"), Ok(true));
/// assert_eq!(parse_bool("''"), Ok(false));
/// assert!(parse_bool("maybe").is_err());
/// ```
pub fn parse_bool(raw: &str) -> Result<bool> {
    let value = unwrap(raw);
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "" | "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ValueError::InvalidBoolean(value.into_owned())),
    }
}

/// Interprets a signed decimal integer.
///
/// # Errors
///
/// [`ValueError::InvalidInteger`] for empty or non-numeric input.
pub fn parse_int(raw: &str) -> Result<i64> {
    let value = unwrap(raw);
    value
        .parse::<i64>()
        .map_err(|_| ValueError::InvalidInteger(value.into_owned()))
}

/// Interprets a byte count with an optional unit.
///
/// The empty string is zero. An optional trailing `b` is ignored, then a
/// `k`, `m` or `g` suffix (any case) multiplies by 1024, 1024² or 1024³.
///
/// # Errors
///
/// [`ValueError::InvalidBytes`] for negative, fractional, overflowing or
/// unknown-unit input.
///
/// # Examples
///
/// ```
/// use cascade_values::coerce::parse_bytes;
///
/// assert_eq!(parse_bytes("123k"), Ok(125952));
/// assert_eq!(parse_bytes("4GB"), Ok(4294967296));
/// assert_eq!(parse_bytes(""), Ok(0));
/// assert!(parse_bytes("55t").is_err());
/// ```
pub fn parse_bytes(raw: &str) -> Result<u64> {
    let value = unwrap(raw);
    if value.is_empty() {
        return Ok(0);
    }
    let invalid = || ValueError::InvalidBytes(value.to_string());

    let lower = value.to_ascii_lowercase();
    let number = lower.strip_suffix('b').unwrap_or(&lower);
    let (digits, multiplier) = match number.chars().last() {
        Some('k') => (&number[..number.len() - 1], KIB),
        Some('m') => (&number[..number.len() - 1], KIB * KIB),
        Some('g') => (&number[..number.len() - 1], KIB * KIB * KIB),
        _ => (number, 1),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    digits
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(invalid)
}

/// Matches a value case-insensitively against an allowed set.
///
/// Returns the allowed set's spelling. The empty string always succeeds and
/// stands for "unset".
///
/// # Errors
///
/// [`ValueError::InvalidEnumValue`] when a non-empty value matches nothing.
///
/// # Examples
///
/// ```
/// use cascade_values::coerce::parse_enum;
///
/// assert_eq!(parse_enum("bar", &["BAW", "BaR"]).unwrap(), "BaR");
/// assert_eq!(parse_enum("", &["x"]).unwrap(), "");
/// assert!(parse_enum("nope", &["dope"]).is_err());
/// ```
pub fn parse_enum<S: AsRef<str>>(raw: &str, allowed: &[S]) -> Result<String> {
    let value = unwrap(raw);
    if value.is_empty() {
        return Ok(String::new());
    }
    let lowered = value.to_lowercase();
    allowed
        .iter()
        .map(AsRef::as_ref)
        .find(|candidate| candidate.to_lowercase() == lowered)
        .map(str::to_string)
        .ok_or_else(|| ValueError::InvalidEnumValue {
            value: value.into_owned(),
            allowed: allowed.iter().map(|a| a.as_ref().to_string()).collect(),
        })
}

/// Compiles a regular expression.
///
/// The empty string means "no pattern" and yields `Ok(None)`.
///
/// # Errors
///
/// [`ValueError::InvalidRegex`] when the pattern does not compile.
///
/// # Examples
///
/// ```
/// use cascade_values::coerce::parse_regex;
///
/// assert!(parse_regex("^test").unwrap().unwrap().is_match("testing"));
/// assert!(parse_regex("").unwrap().is_none());
/// assert!(parse_regex("+++").is_err());
/// ```
pub fn parse_regex(raw: &str) -> Result<Option<Regex>> {
    let value = unwrap(raw);
    if value.is_empty() {
        return Ok(None);
    }
    Regex::new(&value)
        .map(Some)
        .map_err(|err| ValueError::InvalidRegex {
            pattern: value.to_string(),
            message: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_spellings() {
        for raw in ["1", "true", "TRUE", "on", "yes", "'1'"] {
            assert_eq!(parse_bool(raw), Ok(true), "input {raw:?}");
        }
        for raw in ["", "0", "false", "Off", "no", "''"] {
            assert_eq!(parse_bool(raw), Ok(false), "input {raw:?}");
        }
        assert_eq!(
            parse_bool("set off cli"),
            Err(ValueError::InvalidBoolean("set off cli".to_string()))
        );
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), Ok(42));
        assert_eq!(parse_int("'-7'"), Ok(-7));
        assert!(parse_int("").is_err());
        assert!(parse_int("4.5").is_err());
    }

    #[test]
    fn test_parse_bytes() {
        let ok = [
            ("1234", 1234),
            ("123k", 123 * 1024),
            ("234K", 234 * 1024),
            ("12M", 12 * 1024 * 1024),
            ("440mB", 440 * 1024 * 1024),
            ("4GB", 4 * 1024 * 1024 * 1024),
            ("12b", 12),
            ("\"8k\"", 8 * 1024),
            ("", 0),
        ];
        for (raw, expected) in ok {
            assert_eq!(parse_bytes(raw), Ok(expected), "input {raw:?}");
        }

        for raw in ["-3", "4.5", "55t", "b", "k", "+5", "99999999999999999999g"] {
            assert_eq!(
                parse_bytes(raw),
                Err(ValueError::InvalidBytes(raw.to_string())),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn test_parse_enum() {
        assert_eq!(parse_enum("bar", &["baw", "bar", "bat"]).unwrap(), "bar");
        assert_eq!(parse_enum("bar", &["BAW", "BaR", "baT"]).unwrap(), "BaR");
        assert_eq!(
            parse_enum("SHOUTING", &["yelling", "shouting"]).unwrap(),
            "shouting"
        );
        assert_eq!(parse_enum("", &["nonblank1", "nonblank2"]).unwrap(), "");

        let err = parse_enum("bar", &["nope", "dope"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value \"bar\"; allowed values: nope, dope"
        );
    }

    #[test]
    fn test_parse_regex() {
        let re = parse_regex("^test").unwrap().unwrap();
        assert!(re.is_match("testing"));
        assert!(parse_regex("").unwrap().is_none());
        assert!(matches!(
            parse_regex("+++"),
            Err(ValueError::InvalidRegex { .. })
        ));
    }
}
