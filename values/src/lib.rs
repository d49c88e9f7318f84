//! Shell-style parsing of raw option values.
//!
//! Raw values arrive as text from command lines and option files, possibly
//! wrapped in `'`, `"` or `` ` `` quotes with backslash escapes. This crate
//! turns that text into usable values:
//!
//! - [`unwrap`]: strip one layer of matching outer quotes and resolve
//!   escapes inside them.
//! - [`split`]: split on a delimiter outside quoted regions, unwrapping
//!   each element.
//! - [`coerce`]: booleans, integers, byte sizes, enums and regular
//!   expressions, each returning [`ValueError`] on bad input.
//!
//! None of the quote handling can fail: malformed input such as an
//! unterminated quote still produces a deterministic string.
//!
//! # Example
//!
//! ```
//! use cascade_values::{coerce, split, unwrap};
//!
//! assert_eq!(unwrap("'hello world'"), "hello world");
//! assert_eq!(split("a, 'b, c'", ',', false), vec!["a", "b, c"]);
//! assert_eq!(coerce::parse_bytes("'2k'").unwrap(), 2048);
//! ```

pub mod coerce;
mod error;
mod quote;
mod split;

pub use error::{Result, ValueError};
pub use quote::{QUOTE_CHARS, is_quote, quoted_interior, unwrap};
pub use split::split;
