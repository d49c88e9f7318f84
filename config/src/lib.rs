//! Cascading option resolution with provenance tracking.
//!
//! A command registry from `cascade-core` says which options and arguments
//! exist; sources from `cascade-sources` say what values were given where.
//! This crate joins the two:
//!
//! - [`parse_cli`] tokenizes process arguments into a [`CommandLine`],
//!   selecting sub-commands along the way.
//! - [`Config`] resolves every option and argument of the selected scope
//!   against an ordered source chain and records, for each one, whether it
//!   was supplied, supplied on the command line, and changed from its
//!   default.
//!
//! # Example
//!
//! ```
//! use cascade_config::parse_cli;
//! use cascade_core::{ArgSpec, Command, OptionSpec};
//! use cascade_sources::{OptionFile, Source};
//!
//! let mut cmd = Command::new("dump", "Dump tables", "");
//! cmd.add_option(OptionSpec::string("ignore-table", None, "", "")).unwrap();
//! cmd.add_option(OptionSpec::boolean("compress", Some('c'), true, "")).unwrap();
//! cmd.add_arg(ArgSpec::required("schema")).unwrap();
//!
//! let file = OptionFile::parse("my.cnf", "ignore-table='^_tmp, ^old_'\n").unwrap();
//! let cfg = parse_cli(&cmd, &["--skip-compress", "app"])
//!     .unwrap()
//!     .into_config(vec![Box::new(file.source(&[])) as Box<dyn Source>]);
//!
//! assert_eq!(cfg.get_slice("ignore-table", ',', true), ["^_tmp", "^old_"]);
//! assert_eq!(cfg.get_bool("compress"), Ok(false));
//! assert!(cfg.changed("compress") && cfg.on_cli("compress"));
//! assert_eq!(cfg.get("schema"), "app");
//! ```

mod cli;
mod error;
mod resolve;

pub use cli::{CLI_SOURCE_NAME, CommandLine, parse_cli};
pub use error::{CliError, ConfigError};
pub use resolve::{Config, Resolved, TOGGLED_OFF_RAW};
