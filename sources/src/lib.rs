//! Raw option value sources for the cascading resolver.
//!
//! A [`Source`] answers "what raw text, if any, was given for this option?"
//! and says where its answers came from ([`Origin`]). This crate provides
//! the trait plus the sources the resolver is normally fed:
//!
//! - [`CliSource`]: values collected by a command-line tokenizer, with
//!   explicit off-toggles and bare value-optional flags.
//! - [`SimpleSource`]: a plain name/value map, used for defaults and as the
//!   result of the text loaders below.
//! - [`OptionFile`]: INI-style option-file text with `[section]`s.
//! - [`document_from_yaml`] / [`document_from_json`]: flat key/value
//!   documents.
//!
//! Nothing here touches the filesystem; callers read text and hand it in.
//!
//! # Quick start
//!
//! ```
//! use cascade_sources::{CliSource, OptionFile, Source};
//!
//! let file = OptionFile::parse("app.cnf", "port=3306\n[prod]\nport=3307\n").unwrap();
//! let from_file = file.source(&["prod"]);
//!
//! let mut cli = CliSource::new("command line");
//! cli.set("host", "db1");
//!
//! let chain: Vec<Box<dyn Source>> = vec![Box::new(cli), Box::new(from_file)];
//! assert_eq!(chain[1].value("port"), Some("3307"));
//! ```

mod document;
mod error;
mod option_file;
mod source;

pub use document::{document_from_json, document_from_yaml};
pub use error::{Result, SourceError};
pub use option_file::OptionFile;
pub use source::{CliSource, Origin, SimpleSource, Source};
